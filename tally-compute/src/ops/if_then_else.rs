//! Conditional expressions, `if condition then a else b`. The functor name keeps the original
//! mixfix spelling with argument slots.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;

pub const IF_THEN_ELSE: &str = "if . then . else .";

/// Makes a conditional, folding constant conditions and identical branches. No simplification is
/// applied to the condition itself.
pub fn make(condition: Term, then_branch: Term, else_branch: Term) -> Term {
    if condition.is_true() {
        return then_branch;
    }
    if condition.is_false() {
        return else_branch;
    }
    if then_branch == else_branch {
        return then_branch;
    }
    Term::apply(IF_THEN_ELSE, vec![condition, then_branch, else_branch])
}

/// Like [`make`], but returns the original conditional instance when all three components are the
/// same instances as the original's. Used by transformations that may leave a conditional
/// untouched and must preserve its identity in that case.
pub fn make_if_distinct_from(
    original: &Term,
    condition: Term,
    then_branch: Term,
    else_branch: Term,
) -> Term {
    if Term::same(&condition, self::condition(original))
        && Term::same(&then_branch, self::then_branch(original))
        && Term::same(&else_branch, self::else_branch(original))
    {
        original.clone()
    } else {
        make(condition, then_branch, else_branch)
    }
}

/// Returns true if the term is a conditional.
pub fn is_if_then_else(term: &Term) -> bool {
    term.functor() == Some(IF_THEN_ELSE) && term.args().len() == 3
}

/// The condition of a conditional term.
pub fn condition(term: &Term) -> &Term {
    &term.args()[0]
}

/// The branch taken when the condition holds.
pub fn then_branch(term: &Term) -> &Term {
    &term.args()[1]
}

/// The branch taken when the condition does not hold.
pub fn else_branch(term: &Term) -> &Term {
    &term.args()[2]
}

/// Folds conditionals with a constant condition or identical branches.
pub fn simplify(term: &Term, _ctx: &Context) -> Option<Term> {
    if !is_if_then_else(term) {
        return None;
    }
    if condition(term).is_true() {
        return Some(then_branch(term).clone());
    }
    if condition(term).is_false() {
        return Some(else_branch(term).clone());
    }
    if then_branch(term) == else_branch(term) {
        return Some(then_branch(term).clone());
    }
    None
}

pub fn rule() -> Rule {
    Rule { name: "if_then_else", labels: &[IF_THEN_ELSE], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn trivial_conditions() {
        let ctx = Context::new();
        assert_eq!(simplify(&parse("if true then 1 else 0"), &ctx), Some(parse("1")));
        assert_eq!(simplify(&parse("if false then 1 else 0"), &ctx), Some(parse("0")));
        assert_eq!(simplify(&parse("if X = a then 1 else 1"), &ctx), Some(parse("1")));
        assert_eq!(simplify(&parse("if X = a then 1 else 0"), &ctx), None);
    }

    #[test]
    fn make_preserves_instances_when_unchanged() {
        let original = parse("if X = a then 1 else 0");
        let rebuilt = make_if_distinct_from(
            &original,
            condition(&original).clone(),
            then_branch(&original).clone(),
            else_branch(&original).clone(),
        );
        assert!(Term::same(&original, &rebuilt));
    }
}
