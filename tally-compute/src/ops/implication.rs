//! Logical implication.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;
use super::not;

pub const IMPLICATION: &str = "=>";

pub fn make(antecedent: Term, consequent: Term) -> Term {
    Term::apply(IMPLICATION, vec![antecedent, consequent])
}

/// Folds implications with a constant operand.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if term.functor() != Some(IMPLICATION) || term.args().len() != 2 {
        return None;
    }
    let antecedent = &term.args()[0];
    let consequent = &term.args()[1];
    if antecedent.is_false() || consequent.is_true() {
        return Some(Term::boolean(true));
    }
    if antecedent.is_true() {
        return Some(consequent.clone());
    }
    if consequent.is_false() {
        return Some(not::make(antecedent.clone()));
    }
    None
}

pub fn rule() -> Rule {
    Rule { name: "implication", labels: &[IMPLICATION], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn constant_operands() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("false => X = a"), &ctx), Some(parse("true")));
        assert_eq!(simplify(&parse("true => X = a"), &ctx), Some(parse("X = a")));
        assert_eq!(simplify(&parse("X = a => false"), &ctx), Some(parse("X != a")));
        assert_eq!(simplify(&parse("X = a => Y = b"), &ctx), None);
    }
}
