//! The evaluation context: which symbols are variables, what sort each variable ranges over, and
//! how large each sort is.
//!
//! The context is the oracle the model counter consults for `|Sort|`. A sort with an unknown size
//! keeps its cardinality symbolic (`| Everything | - 2`); declaring a size turns those counts into
//! plain integers.

use crate::primitive::int;
use crate::term::Term;
use rug::Integer;
use std::collections::HashMap;

/// The name of the sort every variable ranges over unless declared otherwise.
pub const DEFAULT_SORT: &str = "Everything";

/// Variable/constant conventions, sort assignments and sort sizes.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Sizes of the sorts whose cardinality is known. Sorts not present here are symbolic.
    sort_sizes: HashMap<String, Integer>,

    /// Sort assignments for variables that do not range over the default sort.
    variable_sorts: HashMap<String, String>,
}

impl Context {
    /// Creates a context where every variable ranges over the default sort, of unknown size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the size of a sort. Returns `self` for chaining.
    pub fn with_sort_size(mut self, sort: impl Into<String>, size: impl Into<Integer>) -> Self {
        self.sort_sizes.insert(sort.into(), size.into());
        self
    }

    /// Declares the sort of a variable. Returns `self` for chaining.
    pub fn with_variable_sort(
        mut self,
        variable: impl Into<String>,
        sort: impl Into<String>,
    ) -> Self {
        self.variable_sorts.insert(variable.into(), sort.into());
        self
    }

    /// Returns true if the term is a variable: an atomic symbol whose name starts with an
    /// upper-case letter and is not the name of a sort.
    pub fn is_variable(&self, term: &Term) -> bool {
        match term.name() {
            Some(name) => {
                name.starts_with(|c: char| c.is_ascii_uppercase()) && !self.is_sort_name(name)
            },
            None => false,
        }
    }

    /// Returns true if the term is a constant: an integer literal or an atomic symbol that is not
    /// a variable. Distinct constants denote distinct individuals.
    pub fn is_constant(&self, term: &Term) -> bool {
        term.is_atom() && !self.is_variable(term)
    }

    /// Returns the name of the sort the given variable ranges over.
    pub fn sort_of(&self, variable: &Term) -> &str {
        variable
            .name()
            .and_then(|name| self.variable_sorts.get(name))
            .map(String::as_str)
            .unwrap_or(DEFAULT_SORT)
    }

    /// Returns the size of the given sort, or `None` if it is unknown and must stay symbolic.
    pub fn sort_size(&self, sort: &str) -> Option<Integer> {
        self.sort_sizes.get(sort).cloned()
    }

    fn is_sort_name(&self, name: &str) -> bool {
        name == DEFAULT_SORT
            || self.sort_sizes.contains_key(name)
            || self.variable_sorts.values().any(|sort| sort == name)
    }
}

/// Convenience constructor mirroring the shape of counting queries: the default sort with a known
/// size.
pub fn context_with_everything_of_size(size: i32) -> Context {
    Context::new().with_sort_size(DEFAULT_SORT, int(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventions() {
        let ctx = Context::new();
        assert!(ctx.is_variable(&Term::symbol("X")));
        assert!(ctx.is_variable(&Term::symbol("Y1")));
        assert!(ctx.is_constant(&Term::symbol("a")));
        assert!(ctx.is_constant(&Term::integer(3)));
        // sort names are not variables even though they are capitalized
        assert!(!ctx.is_variable(&Term::symbol("Everything")));
        // compound terms are neither
        let compound = Term::apply("+", vec![Term::symbol("X"), Term::integer(1)]);
        assert!(!ctx.is_variable(&compound));
        assert!(!ctx.is_constant(&compound));
    }

    #[test]
    fn sort_sizes() {
        let ctx = context_with_everything_of_size(10);
        assert_eq!(ctx.sort_size(DEFAULT_SORT), Some(int(10)));
        assert_eq!(ctx.sort_size("Other"), None);
        assert_eq!(ctx.sort_of(&Term::symbol("X")), DEFAULT_SORT);
    }
}
