//! The n-ary conjunction operator.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;

pub const AND: &str = "and";

/// Makes a conjunction of the given terms: drops `true`, collapses to `false` on any `false`
/// conjunct, and unwraps trivial conjunctions.
pub fn make(terms: Vec<Term>) -> Term {
    let mut terms: Vec<Term> = terms.into_iter().filter(|term| !term.is_true()).collect();
    if terms.iter().any(Term::is_false) {
        return Term::boolean(false);
    }
    match terms.len() {
        0 => Term::boolean(true),
        1 => terms.pop().unwrap(),
        _ => Term::apply(AND, terms),
    }
}

/// Flattens nested conjunctions, drops `true` conjuncts and collapses on `false`.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if term.functor() != Some(AND) {
        return None;
    }

    let mut changed = false;
    let mut conjuncts: Vec<Term> = Vec::with_capacity(term.args().len());
    for arg in term.args() {
        if arg.is_false() {
            return Some(Term::boolean(false));
        }
        if arg.is_true() {
            changed = true;
        } else if arg.functor() == Some(AND) {
            changed = true;
            conjuncts.extend(arg.args().iter().cloned());
        } else {
            conjuncts.push(arg.clone());
        }
    }

    if !changed {
        return None;
    }
    Some(match conjuncts.len() {
        0 => Term::boolean(true),
        1 => conjuncts.pop().unwrap(),
        _ => Term::apply(AND, conjuncts),
    })
}

pub fn rule() -> Rule {
    Rule { name: "and", labels: &[AND], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn units_and_absorbers() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("true and X = a"), &ctx), Some(parse("X = a")));
        assert_eq!(
            simplify(&parse("X = a and false and Y = b"), &ctx),
            Some(parse("false")),
        );
        assert_eq!(simplify(&parse("X = a and Y = b"), &ctx), None);
    }
}
