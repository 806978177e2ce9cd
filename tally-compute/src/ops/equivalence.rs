//! Logical equivalence.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;
use super::not;

pub const EQUIVALENCE: &str = "<=>";

pub fn make(lhs: Term, rhs: Term) -> Term {
    Term::apply(EQUIVALENCE, vec![lhs, rhs])
}

/// Folds equivalences with a constant or identical operand.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if term.functor() != Some(EQUIVALENCE) || term.args().len() != 2 {
        return None;
    }
    let lhs = &term.args()[0];
    let rhs = &term.args()[1];
    if lhs == rhs {
        return Some(Term::boolean(true));
    }
    if lhs.is_true() {
        return Some(rhs.clone());
    }
    if rhs.is_true() {
        return Some(lhs.clone());
    }
    if lhs.is_false() {
        return Some(not::make(rhs.clone()));
    }
    if rhs.is_false() {
        return Some(not::make(lhs.clone()));
    }
    None
}

pub fn rule() -> Rule {
    Rule { name: "equivalence", labels: &[EQUIVALENCE], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn folds() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("X = a <=> X = a"), &ctx), Some(parse("true")));
        assert_eq!(simplify(&parse("true <=> X = a"), &ctx), Some(parse("X = a")));
        assert_eq!(simplify(&parse("X = a <=> false"), &ctx), Some(parse("X != a")));
        assert_eq!(simplify(&parse("X = a <=> Y = b"), &ctx), None);
    }
}
