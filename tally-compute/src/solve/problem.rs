//! Problem types: the commutative-monoid structure a solve combines branch results with.
//!
//! The solver itself only knows that branch results can be added, that adding a value for every
//! one of `n` assignments is a single operation, and that some values saturate the combination
//! (so the other branch need not be computed). Each problem type supplies those operations:
//! counting adds counts, satisfiability is an `or` saturated by `true`, tautologicality is an
//! `and` saturated by `false`, and summation multiplies the body by the number of assignments.

use crate::context::Context;
use crate::ops::{self, if_then_else, not, plus, times};
use crate::primitive::int;
use crate::rewrite::Rewriter;
use crate::term::Term;

/// The combination structure for one kind of solve.
pub trait ProblemType {
    /// The value contributed by an empty or contradictory branch.
    fn additive_identity(&self) -> Term;

    /// Whether the value saturates the combination, making the other branch irrelevant.
    fn is_absorbing(&self, value: &Term) -> bool;

    /// Combines two unconditional branch values.
    fn add(&self, a: &Term, b: &Term, ctx: &Context) -> Term;

    /// The result of adding `value` once per assignment, for `count` assignments. `count` may be
    /// conditional on free-variable splitters, in which case the operation distributes over its
    /// branches.
    fn add_n_times(&self, value: &Term, count: &Term, ctx: &Context) -> Term;
}

/// Distributes an `add_n_times` over a conditional count, folding boolean-shaped results back
/// into their condition.
fn distribute<P: ProblemType + ?Sized>(
    problem: &P,
    value: &Term,
    count: &Term,
    ctx: &Context,
) -> Term {
    let condition = if_then_else::condition(count);
    let then_result = problem.add_n_times(value, if_then_else::then_branch(count), ctx);
    let else_result = problem.add_n_times(value, if_then_else::else_branch(count), ctx);
    if then_result.is_true() && else_result.is_false() {
        return condition.clone();
    }
    if then_result.is_false() && else_result.is_true() {
        return not::make(condition.clone());
    }
    if_then_else::make(condition.clone(), then_result, else_result)
}

/// Counting the assignments that make a boolean formula true.
pub struct ModelCounting {
    arithmetic: Rewriter,
}

impl Default for ModelCounting {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelCounting {
    pub fn new() -> Self {
        Self {
            arithmetic: Rewriter::new("plus and minus", ops::arithmetic_rules()),
        }
    }
}

impl ProblemType for ModelCounting {
    fn additive_identity(&self) -> Term {
        Term::integer(0)
    }

    fn is_absorbing(&self, _value: &Term) -> bool {
        false
    }

    fn add(&self, a: &Term, b: &Term, ctx: &Context) -> Term {
        if a.is_integer(0) {
            return b.clone();
        }
        if b.is_integer(0) {
            return a.clone();
        }
        if let (Some(a), Some(b)) = (a.as_integer(), b.as_integer()) {
            return Term::integer(int(a.clone() + b));
        }
        self.arithmetic.rewrite(&plus::make(vec![a.clone(), b.clone()]), ctx)
    }

    fn add_n_times(&self, value: &Term, count: &Term, ctx: &Context) -> Term {
        if if_then_else::is_if_then_else(count) {
            return distribute(self, value, count, ctx);
        }
        if value.is_true() {
            return count.clone();
        }
        if value.is_false() {
            return Term::integer(0);
        }
        panic!("model counting requires the formula to simplify to a boolean, got {value}");
    }
}

/// Deciding whether any assignment satisfies the formula.
#[derive(Default)]
pub struct Satisfiability;

impl ProblemType for Satisfiability {
    fn additive_identity(&self) -> Term {
        Term::boolean(false)
    }

    fn is_absorbing(&self, value: &Term) -> bool {
        value.is_true()
    }

    fn add(&self, a: &Term, b: &Term, _ctx: &Context) -> Term {
        if a.is_true() || b.is_true() {
            return Term::boolean(true);
        }
        if a.is_false() {
            return b.clone();
        }
        if b.is_false() {
            return a.clone();
        }
        ops::or::make(vec![a.clone(), b.clone()])
    }

    fn add_n_times(&self, value: &Term, count: &Term, ctx: &Context) -> Term {
        if if_then_else::is_if_then_else(count) {
            return distribute(self, value, count, ctx);
        }
        // a population of unknown symbolic size is assumed non-empty
        if value.is_false() || count.is_integer(0) {
            return Term::boolean(false);
        }
        if value.is_true() {
            return Term::boolean(true);
        }
        panic!("satisfiability requires the formula to simplify to a boolean, got {value}");
    }
}

/// Deciding whether every assignment satisfies the formula.
#[derive(Default)]
pub struct Tautologicality;

impl ProblemType for Tautologicality {
    fn additive_identity(&self) -> Term {
        Term::boolean(true)
    }

    fn is_absorbing(&self, value: &Term) -> bool {
        value.is_false()
    }

    fn add(&self, a: &Term, b: &Term, _ctx: &Context) -> Term {
        if a.is_false() || b.is_false() {
            return Term::boolean(false);
        }
        if a.is_true() {
            return b.clone();
        }
        if b.is_true() {
            return a.clone();
        }
        ops::and::make(vec![a.clone(), b.clone()])
    }

    fn add_n_times(&self, value: &Term, count: &Term, ctx: &Context) -> Term {
        if if_then_else::is_if_then_else(count) {
            return distribute(self, value, count, ctx);
        }
        // over an empty population the formula holds vacuously
        if value.is_true() || count.is_integer(0) {
            return Term::boolean(true);
        }
        if value.is_false() {
            return Term::boolean(false);
        }
        panic!("tautologicality requires the formula to simplify to a boolean, got {value}");
    }
}

/// Summing a numeric body over the assignments.
pub struct Sum {
    arithmetic: Rewriter,
}

impl Default for Sum {
    fn default() -> Self {
        Self::new()
    }
}

impl Sum {
    pub fn new() -> Self {
        Self {
            arithmetic: Rewriter::new("plus and minus", ops::arithmetic_rules()),
        }
    }
}

impl ProblemType for Sum {
    fn additive_identity(&self) -> Term {
        Term::integer(0)
    }

    fn is_absorbing(&self, _value: &Term) -> bool {
        false
    }

    fn add(&self, a: &Term, b: &Term, ctx: &Context) -> Term {
        if a.is_integer(0) {
            return b.clone();
        }
        if b.is_integer(0) {
            return a.clone();
        }
        if let (Some(a), Some(b)) = (a.as_integer(), b.as_integer()) {
            return Term::integer(int(a.clone() + b));
        }
        self.arithmetic.rewrite(&plus::make(vec![a.clone(), b.clone()]), ctx)
    }

    fn add_n_times(&self, value: &Term, count: &Term, ctx: &Context) -> Term {
        if if_then_else::is_if_then_else(count) {
            return distribute(self, value, count, ctx);
        }
        if value.is_integer(0) || count.is_integer(0) {
            return Term::integer(0);
        }
        if value.is_integer(1) {
            return count.clone();
        }
        if count.is_integer(1) {
            return value.clone();
        }
        self.arithmetic
            .rewrite(&times::make(vec![value.clone(), count.clone()]), ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn counting_combines_symbolically() {
        let ctx = Context::new();
        let counting = ModelCounting::new();
        assert_eq!(
            counting.add(&parse("0"), &parse("| Everything | - 1"), &ctx),
            parse("| Everything | - 1"),
        );
        assert_eq!(
            counting.add(&parse("1"), &parse("| Everything | - 1"), &ctx),
            parse("| Everything |"),
        );
        assert_eq!(
            counting.add(&parse("| Everything | - 1"), &parse("(| Everything | - 1) * | Everything |"), &ctx),
            parse("| Everything | + -1 + (| Everything | - 1) * | Everything |"),
        );
    }

    #[test]
    fn counting_distributes_over_conditional_counts() {
        let ctx = Context::new();
        let counting = ModelCounting::new();
        assert_eq!(
            counting.add_n_times(&parse("true"), &parse("if Y = a then 0 else 2"), &ctx),
            parse("if Y = a then 0 else 2"),
        );
        assert_eq!(
            counting.add_n_times(&parse("false"), &parse("if Y = a then 0 else 2"), &ctx),
            parse("0"),
        );
    }

    #[test]
    fn satisfiability_saturates_on_true() {
        let ctx = Context::new();
        let sat = Satisfiability;
        assert!(sat.is_absorbing(&parse("true")));
        assert_eq!(sat.add_n_times(&parse("true"), &parse("| Everything | - 1"), &ctx), parse("true"));
        assert_eq!(sat.add_n_times(&parse("true"), &parse("0"), &ctx), parse("false"));
        assert_eq!(
            sat.add_n_times(&parse("true"), &parse("if Y = a then 1 else 0"), &ctx),
            parse("Y = a"),
        );
    }

    #[test]
    fn sum_multiplies_by_the_population() {
        let ctx = Context::new();
        let sum = Sum::new();
        assert_eq!(
            sum.add_n_times(&parse("3"), &parse("| Everything | - 1"), &ctx),
            parse("3 * (| Everything | - 1)"),
        );
        assert_eq!(sum.add_n_times(&parse("X + 2"), &parse("1"), &ctx), parse("X + 2"));
    }
}
