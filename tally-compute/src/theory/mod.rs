//! The pluggable theory abstraction the solver is parameterized over.
//!
//! A [`Theory`] defines what a *splitter* is for its class of literals, how to simplify terms and
//! solutions under the assumption that a splitter is true or false, and how to build the
//! [`Constraint`] values the solver threads through its search. A splitter is a literal the
//! solver cases on; a *solution* is an if-then-else tree whose conditions are all splitters.
//!
//! Contradiction is an ordinary value here, not an error: applying a splitter to a constraint
//! that cannot accept it yields `None`, and callers treat the branch as contributing nothing.
//! Misusing the API (asking for a model count while [`Constraint::pick_splitter`] still has work
//! to do) is a bug in the caller and panics with a descriptive message.

pub mod equality;

use crate::context::Context;
use crate::term::Term;

/// The result of normalizing a splitter against a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitterStatus {
    /// The constraint already implies the splitter.
    Implied,

    /// The constraint already implies the splitter's negation.
    Contradicted,

    /// Neither the splitter nor its negation is implied; the payload is the splitter restated
    /// over the constraint's equivalence-class representatives.
    Undetermined(Term),
}

/// A theory: the solver's window into a class of literals.
pub trait Theory {
    /// The constraint representation this theory maintains during search.
    type Constraint: Constraint;

    /// Simplifies a term using the theory's operator knowledge.
    fn simplify(&self, term: &Term, ctx: &Context) -> Term;

    /// Turns the term into a splitter if it can serve as one, normalizing it (an index-bearing
    /// side comes first). Returns `None` for terms that are not usable literals.
    fn make_splitter_if_possible(
        &self,
        term: &Term,
        indices: &[Term],
        ctx: &Context,
    ) -> Option<Term>;

    /// Picks a splitter from the literals syntactically present in the term, if any.
    fn pick_splitter_in_term(
        &self,
        term: &Term,
        indices: &[Term],
        ctx: &Context,
    ) -> Option<Term> {
        term.subterms()
            .find_map(|subterm| self.make_splitter_if_possible(&subterm, indices, ctx))
    }

    /// Whether the splitter's interpretation depends on the interpretation of some index.
    /// Splitters are normalized index-first, so this is a test on the leading side.
    fn splitter_involves_index(&self, splitter: &Term, indices: &[Term]) -> bool;

    /// Simplifies a term under the assumption that the splitter has the given truth value.
    fn apply_splitter_to_term(
        &self,
        sign: bool,
        splitter: &Term,
        term: &Term,
        ctx: &Context,
    ) -> Term;

    /// Simplifies a solution under the assumption that the splitter has the given truth value,
    /// returning an equivalent solution with no condition decided by that assumption.
    fn apply_splitter_to_solution(
        &self,
        sign: bool,
        splitter: &Term,
        solution: &Term,
        ctx: &Context,
    ) -> Term;

    /// Makes a fresh, unconstrained constraint over the given indices.
    fn make_constraint(&self, indices: Vec<Term>) -> Self::Constraint;
}

/// A theory-specific conjunctive knowledge state over a fixed set of indices.
pub trait Constraint: Clone {
    /// The indices (bound variables being counted over) this constraint ranges over.
    fn indices(&self) -> &[Term];

    /// Returns a splitter still needed to reach a state whose model count is computable in
    /// closed form, or `None` if the constraint is already in such a state.
    fn pick_splitter(&self, ctx: &Context) -> Option<Term>;

    /// Returns the conjunction of this constraint and the splitter (or its negation, per the
    /// sign), or `None` if that conjunction is contradictory.
    #[must_use]
    fn apply_splitter(&self, sign: bool, splitter: &Term, ctx: &Context) -> Option<Self>;

    /// Decides the splitter against this constraint, or restates it over the constraint's
    /// equivalence-class representatives if it is undetermined.
    fn normalize_splitter(&self, splitter: &Term, ctx: &Context) -> SplitterStatus;

    /// Computes the model count of this constraint: a closed-form expression in the free
    /// variables and sort cardinalities, never mentioning an index, conditioned on exactly the
    /// free-variable splitters the `ambient` constraint leaves undetermined.
    ///
    /// # Panics
    ///
    /// Panics if [`Constraint::pick_splitter`] still returns a splitter: the count is only
    /// defined once no more splitting is needed.
    fn model_count(&self, ambient: &Self, ctx: &Context) -> Term;

    /// Rewrites a term into an equivalent one normalized by this constraint's knowledge, e.g.
    /// with every symbol replaced by its equivalence-class representative.
    fn normalize(&self, term: &Term, ctx: &Context) -> Term;
}
