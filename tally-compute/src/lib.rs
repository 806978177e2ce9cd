//! Symbolic rewriting and exact model counting for equality logic over finite domains.
//!
//! This crate answers two kinds of questions about formulas represented as immutable
//! [`Term`](term::Term) trees:
//!
//! - *What does this formula simplify to?* Answered by the exhaustive
//!   [rewriting engine](rewrite), which applies a set of rewrite rules to a term and all of its
//!   subterms until a global fixpoint, and by the [canonicalizer](order), which sorts the
//!   arguments of commutative operators into a canonical order.
//! - *How many assignments satisfy this formula?* Answered by the case-splitting
//!   [solver](solve), parameterized by a [theory](theory) (which literals can be cased on, and
//!   how a case assumption simplifies a term) and by a problem type (model counting,
//!   satisfiability, tautologicality, summation). Answers may themselves be symbolic: an
//!   if-then-else tree over conditions on the free variables.
//!
//! ```
//! use tally_compute::{context::Context, parse, solve};
//!
//! let ctx = Context::new();
//! let formula = parse("X != Y and X != a");
//! let indices = [tally_compute::term::Term::symbol("X")];
//! let count = solve::model_count(&formula, Some(&indices), &ctx);
//! assert_eq!(
//!     count.to_string(),
//!     "if Y = a then | Everything | - 1 else | Everything | - 2",
//! );
//! ```

pub mod context;
pub mod ops;
pub mod order;
pub mod primitive;
pub mod rewrite;
pub mod solve;
pub mod term;
pub mod theory;

use tally_parser::parser::{error::Error, Parser};
use term::Term;

/// Parses a formula into a term.
pub fn try_parse(source: &str) -> Result<Term, Error> {
    Parser::new(source).try_parse_full().map(|ast| Term::from(&ast))
}

/// Parses a formula into a term.
///
/// # Panics
///
/// Panics on syntax errors; use [`try_parse`] to handle them.
pub fn parse(source: &str) -> Term {
    match try_parse(source) {
        Ok(term) => term,
        Err(error) => panic!("syntax error in {source:?}: {:?}", error.spans),
    }
}
