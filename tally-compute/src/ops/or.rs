//! The n-ary disjunction operator.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;

pub const OR: &str = "or";

/// Makes a disjunction of the given terms: drops `false`, collapses to `true` on any `true`
/// disjunct, and unwraps trivial disjunctions.
pub fn make(terms: Vec<Term>) -> Term {
    let mut terms: Vec<Term> = terms.into_iter().filter(|term| !term.is_false()).collect();
    if terms.iter().any(Term::is_true) {
        return Term::boolean(true);
    }
    match terms.len() {
        0 => Term::boolean(false),
        1 => terms.pop().unwrap(),
        _ => Term::apply(OR, terms),
    }
}

/// Flattens nested disjunctions, drops `false` disjuncts and collapses on `true`.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if term.functor() != Some(OR) {
        return None;
    }

    let mut changed = false;
    let mut disjuncts: Vec<Term> = Vec::with_capacity(term.args().len());
    for arg in term.args() {
        if arg.is_true() {
            return Some(Term::boolean(true));
        }
        if arg.is_false() {
            changed = true;
        } else if arg.functor() == Some(OR) {
            changed = true;
            disjuncts.extend(arg.args().iter().cloned());
        } else {
            disjuncts.push(arg.clone());
        }
    }

    if !changed {
        return None;
    }
    Some(match disjuncts.len() {
        0 => Term::boolean(false),
        1 => disjuncts.pop().unwrap(),
        _ => Term::apply(OR, disjuncts),
    })
}

pub fn rule() -> Rule {
    Rule { name: "or", labels: &[OR], apply: simplify }
}
