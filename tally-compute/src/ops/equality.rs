//! The equality operator. Equality is n-ary: `=` applied to three terms asserts that all three
//! are equal.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;

pub const EQUALITY: &str = "=";

pub fn make(lhs: Term, rhs: Term) -> Term {
    Term::apply(EQUALITY, vec![lhs, rhs])
}

/// Decides the equality of two terms, when possible: `Some(true)` if they are the same term,
/// `Some(false)` if they are distinct constants, `None` otherwise.
pub fn decide(lhs: &Term, rhs: &Term, ctx: &Context) -> Option<bool> {
    if lhs == rhs {
        return Some(true);
    }
    if ctx.is_constant(lhs) && ctx.is_constant(rhs) {
        return Some(false);
    }
    None
}

/// Folds equalities decided by the constant conventions: any two arguments that are distinct
/// constants falsify the whole equality, duplicated arguments are dropped, and an equality with
/// fewer than two distinct arguments is `true`.
pub fn simplify(term: &Term, ctx: &Context) -> Option<Term> {
    if term.functor() != Some(EQUALITY) || term.args().len() < 2 {
        return None;
    }

    let mut distinct: Vec<Term> = Vec::with_capacity(term.args().len());
    for arg in term.args() {
        if !distinct.contains(arg) {
            distinct.push(arg.clone());
        }
    }
    for (index, lhs) in distinct.iter().enumerate() {
        for rhs in &distinct[index + 1..] {
            if decide(lhs, rhs, ctx) == Some(false) {
                return Some(Term::boolean(false));
            }
        }
    }

    match distinct.len() {
        1 => Some(Term::boolean(true)),
        n if n < term.args().len() => Some(Term::apply(EQUALITY, distinct)),
        _ => None,
    }
}

pub fn rule() -> Rule {
    Rule { name: "equality", labels: &[EQUALITY], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decided_by_conventions() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("X = X"), &ctx), Some(parse("true")));
        assert_eq!(simplify(&parse("a = b"), &ctx), Some(parse("false")));
        assert_eq!(simplify(&parse("a = 1"), &ctx), Some(parse("false")));
        assert_eq!(simplify(&parse("X = a"), &ctx), None);
        assert_eq!(simplify(&parse("X = Y"), &ctx), None);
    }

    #[test]
    fn nary_duplicates() {
        let ctx = Context::new();
        let term = Term::apply(EQUALITY, vec![
            Term::symbol("X"),
            Term::symbol("X"),
            Term::symbol("Y"),
        ]);
        assert_eq!(simplify(&term, &ctx), Some(parse("X = Y")));
    }
}
