//! The theory of equality over symbols (variables and constants), with model counting by the
//! rule of product.
//!
//! # Constraint representation
//!
//! The search state is a conjunction of equalities and disequalities over symbols, kept in a
//! shape that makes the model count a polynomial-time computation:
//!
//! - Equalities form equivalence classes, maintained union-find style in two binding lists (one
//!   for indices, one for free variables). A bound symbol maps to another term of its class;
//!   following the chain ends at the class representative. A class containing a constant is
//!   always represented by that constant.
//! - Disequalities are kept on class representatives only, in a map from a symbol to the set of
//!   terms it is constrained to differ from. The set is stored on whichever side comes *later*
//!   in the choosing order, so each link is stored exactly once.
//!
//! The choosing order sorts constants before free variables before indices; within a category a
//! symbol is chosen after another when its name compares smaller. Splitters always put the
//! later-chosen side first, and applying a positive splitter binds that side to the other. This
//! is what keeps binding chains pointed toward constants, and it means a free variable is never
//! bound to an index, which in turn is why model counts can always be expressed over free
//! variables only.
//!
//! Applying a splitter clones the constraint; the disequality sets are `Rc`-shared and only
//! copied when a particular set is actually modified, so the two branches of a case split share
//! everything they do not touch.

use crate::context::Context;
use crate::ops::{self, cardinality, disequality, equality, if_then_else, minus, times};
use crate::primitive::int;
use crate::rewrite::Rewriter;
use crate::term::Term;
use std::rc::Rc;
use super::{Constraint, SplitterStatus, Theory};

/// The equality-on-symbols theory.
pub struct EqualityTheory {
    simplifier: Rc<Rewriter>,
}

impl Default for EqualityTheory {
    fn default() -> Self {
        Self::new()
    }
}

impl EqualityTheory {
    pub fn new() -> Self {
        Self {
            simplifier: Rc::new(Rewriter::new(
                "equality theory simplification",
                ops::simplification_rules(),
            )),
        }
    }

    /// Applies the given constraint to a solution: decides every condition the constraint
    /// already determines, restates the others over class representatives, and normalizes the
    /// leaves. The constraint is threaded down both branches so that nested conditions are
    /// judged under everything known about their position in the tree, not literal by literal.
    fn apply_constraint_to_solution(
        &self,
        constraint: &EqualityConstraint,
        solution: &Term,
        ctx: &Context,
    ) -> Term {
        if !if_then_else::is_if_then_else(solution) {
            return constraint.normalize(solution, ctx);
        }

        let condition = if_then_else::condition(solution);
        let then_branch = if_then_else::then_branch(solution);
        let else_branch = if_then_else::else_branch(solution);
        match constraint.normalize_splitter(condition, ctx) {
            SplitterStatus::Implied => self.apply_constraint_to_solution(constraint, then_branch, ctx),
            SplitterStatus::Contradicted => {
                self.apply_constraint_to_solution(constraint, else_branch, ctx)
            },
            SplitterStatus::Undetermined(normalized) => {
                let under_condition = constraint
                    .apply_splitter(true, &normalized, ctx)
                    .unwrap_or_else(|| {
                        panic!("undetermined condition {normalized} cannot contradict {constraint:?}")
                    });
                let under_negation = constraint
                    .apply_splitter(false, &normalized, ctx)
                    .unwrap_or_else(|| {
                        panic!("undetermined condition {normalized} cannot be implied by {constraint:?}")
                    });
                if_then_else::make_if_distinct_from(
                    solution,
                    normalized.clone(),
                    self.apply_constraint_to_solution(&under_condition, then_branch, ctx),
                    self.apply_constraint_to_solution(&under_negation, else_branch, ctx),
                )
            },
        }
    }
}

impl Theory for EqualityTheory {
    type Constraint = EqualityConstraint;

    fn simplify(&self, term: &Term, ctx: &Context) -> Term {
        self.simplifier.rewrite(term, ctx)
    }

    fn make_splitter_if_possible(
        &self,
        term: &Term,
        indices: &[Term],
        ctx: &Context,
    ) -> Option<Term> {
        let functor = term.functor()?;
        if functor != equality::EQUALITY && functor != disequality::DISEQUALITY {
            return None;
        }
        // equality can have an arbitrary number of arguments; any variable paired with any other
        // argument serves as a splitter
        let variable = term.args().iter().find(|arg| ctx.is_variable(arg))?;
        let other = term.args().iter().find(|arg| *arg != variable)?;
        Some(make_splitter_from_two_terms(variable, other, indices, ctx))
    }

    fn splitter_involves_index(&self, splitter: &Term, indices: &[Term]) -> bool {
        indices.contains(&splitter.args()[0])
    }

    fn apply_splitter_to_term(
        &self,
        sign: bool,
        splitter: &Term,
        term: &Term,
        ctx: &Context,
    ) -> Term {
        let lhs = &splitter.args()[0];
        let rhs = &splitter.args()[1];
        let replaced = if sign {
            term.replace_all(lhs, rhs)
        } else {
            simplify_literals_given_disequality(term, lhs, rhs)
        };
        self.simplify(&replaced, ctx)
    }

    fn apply_splitter_to_solution(
        &self,
        sign: bool,
        splitter: &Term,
        solution: &Term,
        ctx: &Context,
    ) -> Term {
        let assumption = self
            .make_constraint(Vec::new())
            .apply_splitter(sign, splitter, ctx)
            .unwrap_or_else(|| {
                panic!("splitter {splitter} is trivially contradictory with sign {sign}")
            });
        self.apply_constraint_to_solution(&assumption, solution, ctx)
    }

    fn make_constraint(&self, indices: Vec<Term>) -> EqualityConstraint {
        EqualityConstraint {
            indices: indices.into(),
            disequals: Vec::new(),
            index_bindings: Vec::new(),
            free_bindings: Vec::new(),
            simplifier: Rc::clone(&self.simplifier),
        }
    }
}

/// Builds the splitter relating two terms, putting the side the search must eliminate first:
/// an index if either side is one, otherwise a variable.
fn make_splitter_from_two_terms(
    term1: &Term,
    term2: &Term,
    indices: &[Term],
    ctx: &Context,
) -> Term {
    if indices.contains(term1) {
        equality::make(term1.clone(), term2.clone())
    } else if indices.contains(term2) {
        equality::make(term2.clone(), term1.clone())
    } else if ctx.is_variable(term1) {
        equality::make(term1.clone(), term2.clone())
    } else {
        equality::make(term2.clone(), term1.clone())
    }
}

/// Replaces every equality literal mentioning both terms with `false`, and every disequality
/// literal mentioning both with `true`, sharing untouched subtrees.
fn simplify_literals_given_disequality(term: &Term, lhs: &Term, rhs: &Term) -> Term {
    if let Some(functor) = term.functor() {
        let mentions_both =
            term.args().contains(lhs) && term.args().contains(rhs);
        if mentions_both && functor == equality::EQUALITY {
            return Term::boolean(false);
        }
        if mentions_both && functor == disequality::DISEQUALITY && term.args().len() == 2 {
            return Term::boolean(true);
        }
    }
    if term.is_atom() {
        return term.clone();
    }
    let args = term
        .args()
        .iter()
        .map(|arg| simplify_literals_given_disequality(arg, lhs, rhs))
        .collect();
    term.with_args(args)
}

/// The conjunctive state of the equality theory during search. See the module documentation for
/// the representation invariants.
#[derive(Clone)]
pub struct EqualityConstraint {
    indices: Rc<[Term]>,

    /// Disequality links, keyed by the later side in the choosing order. Sets are shared between
    /// clones and copied on write.
    disequals: Vec<(Term, Rc<Vec<Term>>)>,

    /// Bindings of indices to another term of their equivalence class.
    index_bindings: Vec<(Term, Term)>,

    /// Bindings of free variables to another free variable or constant. Never to an index:
    /// splitters put indices first, and the first side is the one that gets bound.
    free_bindings: Vec<(Term, Term)>,

    simplifier: Rc<Rewriter>,
}

impl std::fmt::Debug for EqualityConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqualityConstraint")
            .field("indices", &self.indices)
            .field("disequals", &self.disequals)
            .field("index_bindings", &self.index_bindings)
            .field("free_bindings", &self.free_bindings)
            .finish()
    }
}

impl EqualityConstraint {
    fn is_index(&self, term: &Term) -> bool {
        self.indices.contains(term)
    }

    fn binding(&self, variable: &Term) -> Option<&Term> {
        self.index_bindings
            .iter()
            .chain(&self.free_bindings)
            .find(|(bound, _)| bound == variable)
            .map(|(_, value)| value)
    }

    fn set_binding(&mut self, variable: Term, value: Term) {
        if variable == value {
            return;
        }
        let bindings = if self.is_index(&variable) {
            &mut self.index_bindings
        } else {
            &mut self.free_bindings
        };
        match bindings.iter_mut().find(|(bound, _)| *bound == variable) {
            Some(entry) => entry.1 = value,
            None => bindings.push((variable, value)),
        }
    }

    fn index_is_bound(&self, index: &Term) -> bool {
        self.index_bindings.iter().any(|(bound, _)| bound == index)
    }

    /// A symbol's representative: itself for constants and unbound variables, the end of the
    /// binding chain otherwise.
    fn representative(&self, symbol: &Term, ctx: &Context) -> Term {
        let mut current = symbol.clone();
        while ctx.is_variable(&current) {
            match self.binding(&current) {
                Some(next) => current = next.clone(),
                None => break,
            }
        }
        current
    }

    /// Like [`Self::representative`], but shortens the walked chain so the next lookup is
    /// direct.
    fn representative_compressing(&mut self, symbol: &Term, ctx: &Context) -> Term {
        let representative = self.representative(symbol, ctx);
        if ctx.is_variable(symbol) {
            self.set_binding(symbol.clone(), representative.clone());
        }
        representative
    }

    fn disequals_of(&self, term: &Term) -> &[Term] {
        self.disequals
            .iter()
            .find(|(key, _)| key == term)
            .map(|(_, set)| set.as_slice())
            .unwrap_or(&[])
    }

    fn remove_disequals_entry(&mut self, term: &Term) {
        self.disequals.retain(|(key, _)| key != term);
    }

    /// Whether `variable` is chosen after `other`: constants come first, then free variables,
    /// then indices; within a category the smaller name is chosen later.
    fn chosen_after(&self, variable: &Term, other: &Term, ctx: &Context) -> bool {
        if ctx.is_constant(other) {
            return true;
        }
        match (self.is_index(variable), self.is_index(other)) {
            (true, false) => true,
            (false, true) => false,
            _ => variable.name() < other.name(),
        }
    }

    /// Records a disequality link between the two terms, on whichever side is chosen later.
    /// Assumes the disequality does not contradict the constraint. Two distinct constants need
    /// no link at all.
    fn add_disequality(&mut self, term1: &Term, term2: &Term, ctx: &Context) {
        if !ctx.is_variable(term1) && !ctx.is_variable(term2) {
            return;
        }
        let (later, earlier) = if ctx.is_variable(term1) && self.chosen_after(term1, term2, ctx) {
            (term1, term2)
        } else {
            (term2, term1)
        };
        match self.disequals.iter_mut().find(|(key, _)| key == later) {
            Some((_, set)) => {
                if !set.contains(earlier) {
                    Rc::make_mut(set).push(earlier.clone());
                }
            },
            None => self
                .disequals
                .push((later.clone(), Rc::new(vec![earlier.clone()]))),
        }
    }

    fn constrained_disequal(&self, term1: &Term, term2: &Term, ctx: &Context) -> bool {
        let rep1 = self.representative(term1, ctx);
        let rep2 = self.representative(term2, ctx);
        if ctx.is_constant(&rep1) && ctx.is_constant(&rep2) {
            return rep1 != rep2;
        }
        self.disequals_of(&rep1).contains(&rep2) || self.disequals_of(&rep2).contains(&rep1)
    }

    /// Conjoins an equality between two class representatives, the first of which is a variable.
    fn apply_representative_equality(
        &self,
        variable: &Term,
        other: &Term,
        ctx: &Context,
    ) -> Option<EqualityConstraint> {
        if self.constrained_disequal(variable, other, ctx) {
            return None;
        }

        let mut new = self.clone();
        new.set_binding(variable.clone(), other.clone());

        // the bound variable's class is now represented by `other`: move its disequality links
        // over, then rewire every link that mentioned it
        for disequal in self.disequals_of(variable).to_vec() {
            new.add_disequality(other, &disequal, ctx);
        }
        new.remove_disequals_entry(variable);

        let keys: Vec<Term> = new
            .disequals
            .iter()
            .filter(|(key, set)| key != other && set.contains(variable))
            .map(|(key, _)| key.clone())
            .collect();
        for key in keys {
            if let Some((_, set)) = new.disequals.iter_mut().find(|(k, _)| *k == key) {
                Rc::make_mut(set).retain(|term| term != variable);
            }
            new.add_disequality(&key, other, ctx);
        }

        Some(new)
    }
}

impl Constraint for EqualityConstraint {
    fn indices(&self) -> &[Term] {
        &self.indices
    }

    fn pick_splitter(&self, ctx: &Context) -> Option<Term> {
        // if an index X has disequals Y and T whose own relationship is undetermined, we cannot
        // tell how many values X has until Y = T is decided
        for index in self.indices.iter() {
            if self.index_is_bound(index) {
                continue;
            }
            let disequals = self.disequals_of(index);
            for y in disequals {
                if !ctx.is_variable(y) {
                    continue;
                }
                let undetermined = disequals
                    .iter()
                    .find(|t| *t != y && !self.constrained_disequal(y, t, ctx));
                if let Some(t) = undetermined {
                    return Some(make_splitter_from_two_terms(y, t, &self.indices, ctx));
                }
            }
        }
        None
    }

    fn apply_splitter(
        &self,
        sign: bool,
        splitter: &Term,
        ctx: &Context,
    ) -> Option<EqualityConstraint> {
        let mut new = self.clone();
        let rep1 = new.representative_compressing(&splitter.args()[0], ctx);
        let rep2 = new.representative_compressing(&splitter.args()[1], ctx);

        match equality::decide(&rep1, &rep2, ctx) {
            Some(equal) => {
                if equal == sign {
                    Some(new) // redundant splitter
                } else {
                    None // contradictory splitter
                }
            },
            None => {
                let normalized = make_splitter_from_two_terms(&rep1, &rep2, &self.indices, ctx);
                let variable = &normalized.args()[0];
                let other = &normalized.args()[1];
                if sign {
                    new.apply_representative_equality(variable, other, ctx)
                } else {
                    if new.constrained_disequal(variable, other, ctx) {
                        return Some(new); // redundant disequality
                    }
                    new.add_disequality(variable, other, ctx);
                    Some(new)
                }
            },
        }
    }

    fn normalize_splitter(&self, splitter: &Term, ctx: &Context) -> SplitterStatus {
        let rep1 = self.representative(&splitter.args()[0], ctx);
        let rep2 = self.representative(&splitter.args()[1], ctx);
        if rep1 == rep2 {
            return SplitterStatus::Implied;
        }
        if self.constrained_disequal(&rep1, &rep2, ctx) {
            return SplitterStatus::Contradicted;
        }
        SplitterStatus::Undetermined(make_splitter_from_two_terms(&rep1, &rep2, &self.indices, ctx))
    }

    fn model_count(&self, ambient: &EqualityConstraint, ctx: &Context) -> Term {
        if let Some(splitter) = self.pick_splitter(ctx) {
            panic!("model count requested while the splitter {splitter} is still needed");
        }

        // rule of product: each unbound index contributes its sort size minus the values it is
        // known to differ from
        let mut factors = Vec::new();
        for index in self.indices.iter() {
            if self.index_is_bound(index) {
                continue;
            }
            let excluded = self.disequals_of(index).len();
            let sort = ctx.sort_of(index);
            let factor = match ctx.sort_size(sort) {
                Some(size) => {
                    let remaining = size - int(excluded as u64);
                    Term::integer(remaining.max(int(0)))
                },
                None => minus::make(
                    cardinality::make(Term::symbol(sort)),
                    Term::integer(int(excluded as u64)),
                ),
            };
            factors.push(factor);
        }
        let mut count = self.simplifier.rewrite(&times::make(factors), ctx);

        // the count only holds where the free-variable facts this constraint accumulated hold;
        // condition it on every such fact the ambient constraint does not already determine
        for (free_variable, _) in &self.free_bindings {
            let representative = self.representative(free_variable, ctx);
            if representative == *free_variable {
                continue;
            }
            let splitter = equality::make(free_variable.clone(), representative);
            match ambient.normalize_splitter(&splitter, ctx) {
                SplitterStatus::Implied => {},
                SplitterStatus::Contradicted => {
                    panic!("required condition {splitter} is contradicted by the ambient constraint")
                },
                SplitterStatus::Undetermined(_) => {
                    count = if_then_else::make(splitter, count, Term::integer(0));
                },
            }
        }
        for (key, set) in &self.disequals {
            if self.is_index(key) {
                continue;
            }
            for disequal in set.iter() {
                let splitter = equality::make(key.clone(), disequal.clone());
                match ambient.normalize_splitter(&splitter, ctx) {
                    SplitterStatus::Contradicted => {},
                    SplitterStatus::Implied => {
                        panic!("forbidden condition {splitter} is implied by the ambient constraint")
                    },
                    SplitterStatus::Undetermined(_) => {
                        count = if_then_else::make(splitter, Term::integer(0), count);
                    },
                }
            }
        }

        count
    }

    fn normalize(&self, term: &Term, ctx: &Context) -> Term {
        let substituted = self.substitute_representatives(term, ctx);
        self.simplifier.rewrite(&substituted, ctx)
    }
}

impl EqualityConstraint {
    fn substitute_representatives(&self, term: &Term, ctx: &Context) -> Term {
        if ctx.is_variable(term) {
            return self.representative(term, ctx);
        }
        if term.is_atom() {
            return term.clone();
        }
        let args = term
            .args()
            .iter()
            .map(|arg| self.substitute_representatives(arg, ctx))
            .collect();
        term.with_args(args)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn theory() -> EqualityTheory {
        EqualityTheory::new()
    }

    fn splitter(source: &str) -> Term {
        parse(source)
    }

    #[test]
    fn splitters_put_the_index_first() {
        let ctx = Context::new();
        let theory = theory();
        let indices = vec![Term::symbol("X")];
        assert_eq!(
            theory.make_splitter_if_possible(&parse("Y = X"), &indices, &ctx),
            Some(parse("X = Y")),
        );
        assert_eq!(
            theory.make_splitter_if_possible(&parse("X != a"), &indices, &ctx),
            Some(parse("X = a")),
        );
        assert_eq!(
            theory.make_splitter_if_possible(&parse("a != b"), &indices, &ctx),
            None,
        );
        assert_eq!(
            theory.make_splitter_if_possible(&parse("X and Y"), &indices, &ctx),
            None,
        );
    }

    #[test]
    fn applying_a_positive_splitter_substitutes() {
        let ctx = Context::new();
        let theory = theory();
        let term = parse("X != Y and X != a");
        assert_eq!(
            theory.apply_splitter_to_term(true, &splitter("X = Y"), &term, &ctx),
            parse("false"),
        );
    }

    #[test]
    fn applying_a_negative_splitter_decides_literals() {
        let ctx = Context::new();
        let theory = theory();
        let term = parse("X != Y and X != a");
        assert_eq!(
            theory.apply_splitter_to_term(false, &splitter("X = Y"), &term, &ctx),
            parse("X != a"),
        );
    }

    #[test]
    fn contradiction_is_a_value() {
        let ctx = Context::new();
        let theory = theory();
        let constraint = theory.make_constraint(vec![Term::symbol("X")]);
        let under = constraint
            .apply_splitter(false, &splitter("X = Y"), &ctx)
            .unwrap();
        assert!(under.apply_splitter(true, &splitter("X = Y"), &ctx).is_none());
        // and the redundant direction is accepted
        assert!(under.apply_splitter(false, &splitter("X = Y"), &ctx).is_some());
    }

    #[test]
    fn equivalence_classes_are_represented_by_constants() {
        let ctx = Context::new();
        let theory = theory();
        let constraint = theory
            .make_constraint(vec![])
            .apply_splitter(true, &splitter("Y = a"), &ctx)
            .unwrap()
            .apply_splitter(true, &splitter("X = Y"), &ctx)
            .unwrap();
        assert_eq!(constraint.representative(&Term::symbol("X"), &ctx), Term::symbol("a"));
        assert_eq!(
            constraint.normalize_splitter(&splitter("X = a"), &ctx),
            SplitterStatus::Implied,
        );
    }

    #[test]
    fn disequalities_transfer_when_classes_merge() {
        let ctx = Context::new();
        let theory = theory();
        let indices = vec![Term::symbol("X")];
        let constraint = theory
            .make_constraint(indices)
            .apply_splitter(false, &splitter("X = a"), &ctx)
            .unwrap()
            .apply_splitter(true, &splitter("X = Y"), &ctx)
            .unwrap();
        // X was bound to Y, so X's disequality to a now constrains Y
        assert!(constraint.constrained_disequal(&Term::symbol("Y"), &Term::symbol("a"), &ctx));
        assert!(constraint
            .apply_splitter(true, &splitter("Y = a"), &ctx)
            .is_none());
    }

    #[test]
    fn pick_splitter_relates_two_undetermined_disequals() {
        let ctx = Context::new();
        let theory = theory();
        let constraint = theory
            .make_constraint(vec![Term::symbol("X")])
            .apply_splitter(false, &splitter("X = Y"), &ctx)
            .unwrap()
            .apply_splitter(false, &splitter("X = a"), &ctx)
            .unwrap();
        assert_eq!(constraint.pick_splitter(&ctx), Some(parse("Y = a")));

        // once Y = a is decided either way, no more splitting is needed
        let decided = constraint.apply_splitter(false, &splitter("Y = a"), &ctx).unwrap();
        assert_eq!(decided.pick_splitter(&ctx), None);
    }

    #[test]
    fn model_count_subtracts_excluded_values() {
        let ctx = Context::new();
        let theory = theory();
        let ambient = theory.make_constraint(vec![]);
        let constraint = theory
            .make_constraint(vec![Term::symbol("X")])
            .apply_splitter(false, &splitter("X = Y"), &ctx)
            .unwrap();
        assert_eq!(constraint.model_count(&ambient, &ctx), parse("| Everything | - 1"));
    }

    #[test]
    fn model_count_uses_known_sort_sizes() {
        let ctx = crate::context::context_with_everything_of_size(10);
        let theory = theory();
        let constraint = theory
            .make_constraint(vec![Term::symbol("X")])
            .apply_splitter(false, &splitter("X = Y"), &ctx)
            .unwrap()
            .apply_splitter(false, &splitter("X = a"), &ctx)
            .unwrap()
            .apply_splitter(false, &splitter("Y = a"), &ctx)
            .unwrap();
        // the accumulated free fact Y != a stays a condition until the ambient determines it
        let ambient = theory.make_constraint(vec![]);
        assert_eq!(
            constraint.model_count(&ambient, &ctx),
            parse("if Y = a then 0 else 8"),
        );
        let ambient = ambient.apply_splitter(false, &splitter("Y = a"), &ctx).unwrap();
        assert_eq!(constraint.model_count(&ambient, &ctx), parse("8"));
    }

    #[test]
    fn model_count_conditions_on_undetermined_free_facts() {
        let ctx = Context::new();
        let theory = theory();
        let ambient = theory.make_constraint(vec![]);
        let constraint = theory
            .make_constraint(vec![Term::symbol("X")])
            .apply_splitter(false, &splitter("X = Y"), &ctx)
            .unwrap()
            .apply_splitter(false, &splitter("X = a"), &ctx)
            .unwrap()
            .apply_splitter(false, &splitter("Y = a"), &ctx)
            .unwrap();
        assert_eq!(
            constraint.model_count(&ambient, &ctx),
            parse("if Y = a then 0 else | Everything | - 2"),
        );

        // an ambient constraint that already records Y != a leaves the count unconditional
        let ambient = ambient.apply_splitter(false, &splitter("Y = a"), &ctx).unwrap();
        assert_eq!(constraint.model_count(&ambient, &ctx), parse("| Everything | - 2"));
    }

    #[test]
    #[should_panic(expected = "model count requested")]
    fn model_count_before_full_splitting_is_a_bug() {
        let ctx = Context::new();
        let theory = theory();
        let ambient = theory.make_constraint(vec![]);
        let constraint = theory
            .make_constraint(vec![Term::symbol("X")])
            .apply_splitter(false, &splitter("X = Y"), &ctx)
            .unwrap()
            .apply_splitter(false, &splitter("X = a"), &ctx)
            .unwrap();
        constraint.model_count(&ambient, &ctx);
    }

    #[test]
    fn solution_splitter_application_decides_nested_conditions() {
        let ctx = Context::new();
        let theory = theory();
        let solution = parse("if X = T1 then if T = T1 then 7 else 1 else 0");

        // assuming X = T, the outer condition becomes T = T1, which also decides the inner one
        assert_eq!(
            theory.apply_splitter_to_solution(true, &splitter("X = T"), &solution, &ctx),
            parse("if T = T1 then 7 else 0"),
        );

        // assuming X != T1 kills the then branch
        assert_eq!(
            theory.apply_splitter_to_solution(false, &splitter("X = T1"), &solution, &ctx),
            parse("0"),
        );
    }
}
