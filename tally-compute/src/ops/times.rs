//! The n-ary multiplication operator.

use crate::context::Context;
use crate::primitive::int;
use crate::rewrite::Rule;
use crate::term::Term;

pub const TIMES: &str = "*";

/// Makes a product of the given terms, dropping ones and unwrapping trivial products.
pub fn make(terms: Vec<Term>) -> Term {
    let mut terms: Vec<Term> = terms.into_iter().filter(|term| !term.is_integer(1)).collect();
    match terms.len() {
        0 => Term::integer(1),
        1 => terms.pop().unwrap(),
        _ => Term::apply(TIMES, terms),
    }
}

/// Flattens nested products, absorbs on a zero factor, folds integer literals into a single
/// literal at the position of the first one, and drops ones.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if term.functor() != Some(TIMES) {
        return None;
    }

    let mut changed = false;
    let mut flat: Vec<Term> = Vec::with_capacity(term.args().len());
    for arg in term.args() {
        if arg.functor() == Some(TIMES) {
            changed = true;
            flat.extend(arg.args().iter().cloned());
        } else {
            flat.push(arg.clone());
        }
    }

    let mut product = int(1);
    let mut literal_slot: Option<usize> = None;
    let mut factors: Vec<Term> = Vec::with_capacity(flat.len());
    for arg in flat {
        match arg.as_integer() {
            Some(value) => {
                if *value == 0 {
                    return Some(Term::integer(0));
                }
                product *= value;
                match literal_slot {
                    None => {
                        literal_slot = Some(factors.len());
                        factors.push(arg);
                    },
                    Some(_) => changed = true,
                }
            },
            None => factors.push(arg),
        }
    }
    if let Some(slot) = literal_slot {
        if product == 1 && factors.len() > 1 {
            factors.remove(slot);
            changed = true;
        } else if factors[slot].as_integer() != Some(&product) {
            factors[slot] = Term::integer(product.clone());
        }
    }

    if !changed {
        return None;
    }
    Some(match factors.len() {
        0 => Term::integer(product),
        1 => factors.pop().unwrap(),
        _ => Term::apply(TIMES, factors),
    })
}

pub fn rule() -> Rule {
    Rule { name: "times", labels: &[TIMES], apply: simplify }
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
    fn absorbs_on_zero() {
        assert_eq!(simplified("0 * (X + Y) * 3"), parse("0"));
    }

    #[test]
    fn folds_and_drops_ones() {
        assert_eq!(simplified("2 * X * 3"), parse("6 * X"));
        assert_eq!(simplified("1 * X * 1"), parse("X"));
    }

    #[test]
    fn symbolic_products_are_stable() {
        let ctx = Context::new();
        let term = parse("(| Everything | - 1) * | Everything |");
        assert_eq!(simplify(&term, &ctx), None);
    }
}
