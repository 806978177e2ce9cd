//! Logical negation.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;
use super::{disequality, equality};

pub const NOT: &str = "not";

/// Makes the negation of a term, folding constants, double negation, and equality literals
/// (`not (a = b)` becomes `a != b` and vice versa).
pub fn make(term: Term) -> Term {
    match simplify_negation(&term) {
        Some(negated) => negated,
        None => Term::apply(NOT, vec![term]),
    }
}

fn simplify_negation(operand: &Term) -> Option<Term> {
    if operand.is_true() {
        return Some(Term::boolean(false));
    }
    if operand.is_false() {
        return Some(Term::boolean(true));
    }
    if operand.functor() == Some(NOT) && operand.args().len() == 1 {
        return Some(operand.args()[0].clone());
    }
    if operand.functor() == Some(equality::EQUALITY) && operand.args().len() == 2 {
        return Some(disequality::make(operand.args()[0].clone(), operand.args()[1].clone()));
    }
    if operand.functor() == Some(disequality::DISEQUALITY) && operand.args().len() == 2 {
        return Some(equality::make(operand.args()[0].clone(), operand.args()[1].clone()));
    }
    None
}

/// Folds `not true`, `not false`, double negation, and negated equality literals.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if term.functor() != Some(NOT) || term.args().len() != 1 {
        return None;
    }
    simplify_negation(&term.args()[0])
}

pub fn rule() -> Rule {
    Rule { name: "not", labels: &[NOT], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn negation_folds() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("not true"), &ctx), Some(parse("false")));
        assert_eq!(simplify(&parse("not not X = a"), &ctx), Some(parse("X = a")));
        assert_eq!(simplify(&parse("not X = a"), &ctx), Some(parse("X != a")));
        assert_eq!(simplify(&parse("not X != a"), &ctx), Some(parse("X = a")));
        assert_eq!(simplify(&parse("not (X = a and Y = b)"), &ctx), None);
    }
}
