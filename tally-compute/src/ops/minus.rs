//! Binary subtraction and unary negation. Both share the `-` functor, distinguished by arity.

use crate::context::Context;
use crate::primitive::int;
use crate::rewrite::Rule;
use crate::term::Term;

pub const MINUS: &str = "-";

/// Makes `minuend - subtrahend`, folding literal operands and subtraction of zero.
pub fn make(minuend: Term, subtrahend: Term) -> Term {
    if subtrahend.is_integer(0) {
        return minuend;
    }
    if let (Some(a), Some(b)) = (minuend.as_integer(), subtrahend.as_integer()) {
        return Term::integer(int(a.clone() - b));
    }
    Term::apply(MINUS, vec![minuend, subtrahend])
}

/// Folds literal subtraction and negation, `a - 0`, `a - a` and double negation.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if term.functor() != Some(MINUS) {
        return None;
    }
    match term.args() {
        [minuend, subtrahend] => {
            if subtrahend.is_integer(0) {
                return Some(minuend.clone());
            }
            if let (Some(a), Some(b)) = (minuend.as_integer(), subtrahend.as_integer()) {
                return Some(Term::integer(int(a.clone() - b)));
            }
            if minuend == subtrahend {
                return Some(Term::integer(0));
            }
            None
        },
        [operand] => {
            if let Some(value) = operand.as_integer() {
                return Some(Term::integer(int(-value.clone())));
            }
            if operand.functor() == Some(MINUS) && operand.args().len() == 1 {
                return Some(operand.args()[0].clone());
            }
            None
        },
        _ => None,
    }
}

pub fn rule() -> Rule {
    Rule { name: "minus", labels: &[MINUS], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn folds_trivial_cases() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("5 - 2"), &ctx), Some(parse("3")));
        assert_eq!(simplify(&parse("X - 0"), &ctx), Some(parse("X")));
        assert_eq!(simplify(&parse("X - X"), &ctx), Some(parse("0")));
        assert_eq!(simplify(&parse("| Everything | - 1"), &ctx), None);
    }

    #[test]
    fn make_folds_zero_subtrahend() {
        let card = parse("| Everything |");
        assert!(Term::same(&make(card.clone(), Term::integer(0)), &card));
    }
}
