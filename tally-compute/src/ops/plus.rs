//! The n-ary addition operator.

use crate::context::Context;
use crate::primitive::int;
use crate::rewrite::Rule;
use crate::term::Term;
use rug::Integer;
use super::minus;

pub const PLUS: &str = "+";

/// Makes a sum of the given terms, dropping zeros and unwrapping trivial sums. Does not perform
/// any further simplification; pair with the [`rule`] for that.
pub fn make(terms: Vec<Term>) -> Term {
    let mut terms: Vec<Term> = terms.into_iter().filter(|term| !term.is_integer(0)).collect();
    match terms.len() {
        0 => Term::integer(0),
        1 => terms.pop().unwrap(),
        _ => Term::apply(PLUS, terms),
    }
}

/// Negates a term: integer literals by value, unary minus otherwise (folding double negation).
pub fn negate(term: &Term) -> Term {
    if let Some(value) = term.as_integer() {
        return Term::integer(int(-value.clone()));
    }
    if term.functor() == Some(minus::MINUS) && term.args().len() == 1 {
        return term.args()[0].clone();
    }
    Term::apply(minus::MINUS, vec![term.clone()])
}

/// Flattens nested sums (splicing `a - b` arguments into `a + -b`), folds integer literals into
/// a single literal at the position of the first one, and drops zeros.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if term.functor() != Some(PLUS) {
        return None;
    }

    let mut changed = false;
    let mut flat: Vec<Term> = Vec::with_capacity(term.args().len());
    for arg in term.args() {
        if arg.functor() == Some(PLUS) {
            changed = true;
            flat.extend(arg.args().iter().cloned());
        } else if arg.functor() == Some(minus::MINUS) && arg.args().len() == 2 {
            // a - b contributes a and -b to the enclosing sum
            changed = true;
            flat.push(arg.args()[0].clone());
            flat.push(negate(&arg.args()[1]));
        } else {
            flat.push(arg.clone());
        }
    }

    let mut sum = int(0);
    let mut literal_slot: Option<usize> = None;
    let mut terms: Vec<Term> = Vec::with_capacity(flat.len());
    for arg in flat {
        match arg.as_integer() {
            Some(value) => {
                sum += value;
                match literal_slot {
                    None => {
                        literal_slot = Some(terms.len());
                        terms.push(arg);
                    },
                    Some(_) => changed = true,
                }
            },
            None => terms.push(arg),
        }
    }
    if let Some(slot) = literal_slot {
        if sum == 0 && terms.len() > 1 {
            terms.remove(slot);
            changed = true;
        } else if terms[slot].as_integer() != Some(&sum) {
            terms[slot] = Term::integer(sum.clone());
        }
    }

    if !changed {
        return None;
    }
    Some(downgrade(terms, &sum, literal_slot.is_some()))
}

fn downgrade(mut terms: Vec<Term>, sum: &Integer, had_literal: bool) -> Term {
    match terms.len() {
        0 if had_literal => Term::integer(sum.clone()),
        0 => Term::integer(0),
        1 => terms.pop().unwrap(),
        _ => Term::apply(PLUS, terms),
    }
}

pub fn rule() -> Rule {
    Rule { name: "plus", labels: &[PLUS], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(source: &str) -> Term {
        let ctx = Context::new();
        let term = parse(source);
        simplify(&term, &ctx).unwrap_or(term)
    }

    #[test]
    fn folds_literals_in_place() {
        assert_eq!(simplified("1 + X + 2"), parse("3 + X"));
        assert_eq!(simplified("X + 0"), parse("X"));
        assert_eq!(simplified("1 + 2"), parse("3"));
    }

    #[test]
    fn splices_binary_minus() {
        assert_eq!(
            simplified("(| Everything | - 1) + 2"),
            parse("| Everything | + 1"),
        );
        assert_eq!(simplified("1 + (| Everything | - 1)"), parse("| Everything |"));
    }

    #[test]
    fn no_change_returns_none() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("X + Y"), &ctx), None);
        assert_eq!(simplify(&parse("| Everything | + -1"), &ctx), None);
    }
}
