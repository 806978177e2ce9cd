//! The case-splitting solver: a recursive search over splitters, generic in the theory and in
//! the problem type.
//!
//! `solve` answers "combine the formula's value over every assignment of the indices": for
//! model counting, how many assignments satisfy the formula; for satisfiability, whether any
//! does. Free variables are not summed over, so the answer may be symbolic: an if-then-else tree
//! whose conditions are splitters over free variables only.
//!
//! At each step the solver looks for a splitter, first among the literals of the formula itself,
//! then by asking the constraint what it still needs to make its model count computable. With no
//! splitter left, the formula is an unconditional value and the constraint's model count says how
//! many assignments it covers. Otherwise the solver cases on the splitter.
//!
//! The order of operations around a split is deliberate. The splitter is applied to the
//! *constraint* first, and only the surviving branches are applied to the formula: a splitter
//! over free variables must appear as a condition in the answer exactly when both it and its
//! negation are consistent with the constraint. When the splitter involves an index, the two
//! branches partition the assignments of the same free-variable population and their results are
//! added; when it is over free variables only, the branches describe different populations and
//! the results combine into a conditional instead. In the added case, a branch that reaches the
//! problem type's absorbing value short-circuits the other branch entirely.
//!
//! The solver also records every free splitter it conditions on into an *ambient* constraint,
//! which the model count consults so that no condition is emitted twice along one path.

pub mod problem;

use crate::context::Context;
use crate::ops::if_then_else;
use crate::term::Term;
use crate::theory::equality::EqualityTheory;
use crate::theory::{Constraint, Theory};
pub use problem::{ModelCounting, ProblemType, Satisfiability, Sum, Tautologicality};

/// A solver for one theory and one problem type.
pub struct Solver<'a, T: Theory, P: ProblemType> {
    theory: &'a T,
    problem: P,
}

impl<'a, T: Theory, P: ProblemType> Solver<'a, T, P> {
    pub fn new(theory: &'a T, problem: P) -> Self {
        Self { theory, problem }
    }

    /// Solves the formula over the given indices.
    pub fn solve(&self, formula: &Term, indices: &[Term], ctx: &Context) -> Term {
        let simplified = self.theory.simplify(formula, ctx);
        let constraint = self.theory.make_constraint(indices.to_vec());
        let ambient = self.theory.make_constraint(Vec::new());
        self.solve_constrained(&simplified, Some(constraint), &ambient, indices, ctx)
    }

    fn solve_constrained(
        &self,
        formula: &Term,
        constraint: Option<T::Constraint>,
        ambient: &T::Constraint,
        indices: &[Term],
        ctx: &Context,
    ) -> Term {
        let Some(constraint) = constraint else {
            // an ancestor branch already contradicted the constraint
            return self.problem.additive_identity();
        };

        let splitter = self
            .theory
            .pick_splitter_in_term(formula, indices, ctx)
            .or_else(|| constraint.pick_splitter(ctx));
        match splitter {
            Some(splitter) => self.split(&splitter, formula, &constraint, ambient, indices, ctx),
            None => {
                let count = constraint.model_count(ambient, ctx);
                self.problem.add_n_times(formula, &count, ctx)
            },
        }
    }

    fn split(
        &self,
        splitter: &Term,
        formula: &Term,
        constraint: &T::Constraint,
        ambient: &T::Constraint,
        indices: &[Term],
        ctx: &Context,
    ) -> Term {
        let involves_index = self.theory.splitter_involves_index(splitter, indices);

        let Some(under_splitter) = constraint.apply_splitter(true, splitter, ctx) else {
            // the splitter is false under the constraint: only the negated branch exists, and
            // the answer is not conditioned on the splitter
            let under_negation = constraint.apply_splitter(false, splitter, ctx);
            return self.solve_under(false, splitter, formula, under_negation, ambient, indices, ctx);
        };

        let then_solution = match self.extend_ambient(ambient, true, splitter, involves_index, ctx) {
            Some(ambient_then) => self.solve_under(
                true,
                splitter,
                formula,
                Some(under_splitter),
                &ambient_then,
                indices,
                ctx,
            ),
            None => self.problem.additive_identity(),
        };

        if involves_index && self.problem.is_absorbing(&then_solution) {
            // both branches cover the same free-variable population, so a saturated result
            // settles the sum without looking at the other side
            return then_solution;
        }

        match constraint.apply_splitter(false, splitter, ctx) {
            Some(under_negation) => {
                let else_solution =
                    match self.extend_ambient(ambient, false, splitter, involves_index, ctx) {
                        Some(ambient_else) => self.solve_under(
                            false,
                            splitter,
                            formula,
                            Some(under_negation),
                            &ambient_else,
                            indices,
                            ctx,
                        ),
                        None => self.problem.additive_identity(),
                    };
                if involves_index {
                    self.add_symbolic_results(&then_solution, &else_solution, ctx)
                } else {
                    if_then_else::make(splitter.clone(), then_solution, else_solution)
                }
            },
            // the splitter cannot be false under the constraint, so the then branch is the
            // whole answer
            None => then_solution,
        }
    }

    /// Free splitters become conditions of the answer, so they are recorded into the ambient
    /// constraint of their branch; index splitters are not conditions and leave it untouched.
    fn extend_ambient(
        &self,
        ambient: &T::Constraint,
        sign: bool,
        splitter: &Term,
        involves_index: bool,
        ctx: &Context,
    ) -> Option<T::Constraint> {
        if involves_index {
            Some(ambient.clone())
        } else {
            ambient.apply_splitter(sign, splitter, ctx)
        }
    }

    fn solve_under(
        &self,
        sign: bool,
        splitter: &Term,
        formula: &Term,
        constraint: Option<T::Constraint>,
        ambient: &T::Constraint,
        indices: &[Term],
        ctx: &Context,
    ) -> Term {
        let simplified = self.theory.apply_splitter_to_term(sign, splitter, formula, ctx);
        self.solve_constrained(&simplified, constraint, ambient, indices, ctx)
    }

    /// Combines the two sides of an index split. Unconditional results are added directly;
    /// conditional ones are merged by distributing one result over the other's branches,
    /// simplifying it under each branch's condition first.
    fn add_symbolic_results(&self, a: &Term, b: &Term, ctx: &Context) -> Term {
        if if_then_else::is_if_then_else(a) {
            let condition = if_then_else::condition(a);
            let b_under_condition = self.theory.apply_splitter_to_solution(true, condition, b, ctx);
            let b_under_negation = self.theory.apply_splitter_to_solution(false, condition, b, ctx);
            return if_then_else::make(
                condition.clone(),
                self.add_symbolic_results(if_then_else::then_branch(a), &b_under_condition, ctx),
                self.add_symbolic_results(if_then_else::else_branch(a), &b_under_negation, ctx),
            );
        }
        if if_then_else::is_if_then_else(b) {
            let condition = if_then_else::condition(b);
            let a_under_condition = self.theory.apply_splitter_to_solution(true, condition, a, ctx);
            let a_under_negation = self.theory.apply_splitter_to_solution(false, condition, a, ctx);
            return if_then_else::make(
                condition.clone(),
                self.add_symbolic_results(&a_under_condition, if_then_else::then_branch(b), ctx),
                self.add_symbolic_results(&a_under_negation, if_then_else::else_branch(b), ctx),
            );
        }
        self.problem.add(a, b, ctx)
    }
}

fn indices_or_all_variables(
    formula: &Term,
    indices: Option<&[Term]>,
    ctx: &Context,
) -> Vec<Term> {
    match indices {
        Some(indices) => indices.to_vec(),
        None => formula.variables(ctx),
    }
}

/// Counts the assignments of the indices satisfying the formula. With `indices` of `None`, all
/// of the formula's variables are counted over.
pub fn model_count(formula: &Term, indices: Option<&[Term]>, ctx: &Context) -> Term {
    let theory = EqualityTheory::new();
    let indices = indices_or_all_variables(formula, indices, ctx);
    Solver::new(&theory, ModelCounting::new()).solve(formula, &indices, ctx)
}

/// Decides whether some assignment of the indices satisfies the formula.
pub fn satisfiability(formula: &Term, indices: Option<&[Term]>, ctx: &Context) -> Term {
    let theory = EqualityTheory::new();
    let indices = indices_or_all_variables(formula, indices, ctx);
    Solver::new(&theory, Satisfiability).solve(formula, &indices, ctx)
}

/// Decides whether every assignment of the indices satisfies the formula.
pub fn tautologicality(formula: &Term, indices: Option<&[Term]>, ctx: &Context) -> Term {
    let theory = EqualityTheory::new();
    let indices = indices_or_all_variables(formula, indices, ctx);
    Solver::new(&theory, Tautologicality).solve(formula, &indices, ctx)
}

/// Sums a numeric body over the assignments of the indices.
pub fn sum(body: &Term, indices: &[Term], ctx: &Context) -> Term {
    let theory = EqualityTheory::new();
    Solver::new(&theory, Sum::new()).solve(body, indices, ctx)
}
