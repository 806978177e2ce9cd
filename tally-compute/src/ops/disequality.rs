//! The disequality operator.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;
use super::equality;

pub const DISEQUALITY: &str = "!=";

pub fn make(lhs: Term, rhs: Term) -> Term {
    Term::apply(DISEQUALITY, vec![lhs, rhs])
}

/// Folds disequalities decided by the constant conventions.
pub fn simplify(term: &Term, ctx: &Context) -> Option<Term> {
    if term.functor() != Some(DISEQUALITY) || term.args().len() != 2 {
        return None;
    }
    match equality::decide(&term.args()[0], &term.args()[1], ctx) {
        Some(equal) => Some(Term::boolean(!equal)),
        None => None,
    }
}

pub fn rule() -> Rule {
    Rule { name: "disequality", labels: &[DISEQUALITY], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decided_by_conventions() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("X != X"), &ctx), Some(parse("false")));
        assert_eq!(simplify(&parse("a != b"), &ctx), Some(parse("true")));
        assert_eq!(simplify(&parse("X != a"), &ctx), None);
    }
}
