//! Canonical argument ordering for commutative operators.
//!
//! Two terms built from commutative operators can be structurally different and still denote the
//! same thing (`X = a` vs `a = X`, `p and q` vs `q and p`). [`OrderNormalizer`] rewrites a term
//! into a canonical representative by recursively sorting the arguments of the symmetric functors
//! under the term total order, so that canonical forms can be compared with plain structural
//! equality.
//!
//! Normalization is memoized **by instance**, not by value: the same term handle is normalized at
//! most once. The memo is bounded (default capacity 3000) and evicts least-recently-used entries.

use crate::term::Term;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet, VecDeque};

/// The functors whose argument order is irrelevant.
static SYMMETRIC_FUNCTORS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["+", "*", "and", "or", "<=>", "=", "!=", "union"]));

/// The default capacity of the normalization memo.
const DEFAULT_CAPACITY: usize = 3000;

/// A memo entry: the input term (kept alive so its address cannot be reused while cached), its
/// canonical form, and the recency stamp of its last use.
struct CacheEntry {
    input: Term,
    normalized: Term,
    stamp: u64,
}

/// Sorts the arguments of commutative operators into a canonical order, with a bounded
/// identity-keyed memo.
pub struct OrderNormalizer {
    cache: HashMap<usize, CacheEntry>,
    /// Recency queue of `(key, stamp)` pairs; entries whose stamp no longer matches the cached one
    /// are stale and skipped during eviction.
    queue: VecDeque<(usize, u64)>,
    capacity: usize,
    clock: u64,
}

impl Default for OrderNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderNormalizer {
    /// Creates a normalizer with the default memo capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a normalizer whose memo holds at most `capacity` terms.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: HashMap::new(),
            queue: VecDeque::new(),
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    /// Returns the canonical form of the given term. Terms whose functor is not symmetric are
    /// returned unchanged (the same instance); unchanged argument lists also preserve the input
    /// instance.
    pub fn normalize(&mut self, term: &Term) -> Term {
        let symmetric = term
            .functor()
            .map(|functor| SYMMETRIC_FUNCTORS.contains(functor))
            .unwrap_or(false);
        if !symmetric {
            // not memoized: there is nothing to compute, and children of asymmetric terms are
            // normalized when they are reached through a symmetric parent
            let args = term.args().iter().map(|arg| self.normalize(arg)).collect();
            return term.with_args(args);
        }

        if let Some(entry) = self.cache.get_mut(&term.id()) {
            self.clock += 1;
            entry.stamp = self.clock;
            let normalized = entry.normalized.clone();
            self.queue.push_back((term.id(), self.clock));
            return normalized;
        }

        let mut args: Vec<Term> = term.args().iter().map(|arg| self.normalize(arg)).collect();
        args.sort();

        // sorting produced a fresh vector; if its elements are the same instances in the same
        // order as the original arguments, keep the original instance
        let normalized = term.with_args(args);

        self.insert(term.clone(), normalized.clone());
        normalized
    }

    /// Compares two terms modulo argument order: true iff their canonical forms are structurally
    /// equal.
    pub fn equivalent(&mut self, a: &Term, b: &Term) -> bool {
        self.normalize(a) == self.normalize(b)
    }

    fn insert(&mut self, input: Term, normalized: Term) {
        while self.cache.len() >= self.capacity {
            match self.queue.pop_front() {
                Some((key, stamp)) => {
                    let evict = self
                        .cache
                        .get(&key)
                        .map(|entry| entry.stamp == stamp)
                        .unwrap_or(false);
                    if evict {
                        self.cache.remove(&key);
                    }
                },
                None => break,
            }
        }
        self.clock += 1;
        let key = input.id();
        self.queue.push_back((key, self.clock));
        self.cache.insert(key, CacheEntry { input, normalized, stamp: self.clock });
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn commutativity_invariance() {
        let mut normalizer = OrderNormalizer::new();
        assert_eq!(
            normalizer.normalize(&parse("X + Y * Z")),
            normalizer.normalize(&parse("Z * Y + X")),
        );
        assert_eq!(
            normalizer.normalize(&parse("X = a and Y != b")),
            normalizer.normalize(&parse("b != Y and a = X")),
        );
    }

    #[test]
    fn idempotence_preserves_instances() {
        let mut normalizer = OrderNormalizer::new();
        let term = parse("b != Y and a = X");
        let once = normalizer.normalize(&term);
        let twice = normalizer.normalize(&once);
        assert!(Term::same(&once, &twice));
    }

    #[test]
    fn already_canonical_terms_are_untouched() {
        let mut normalizer = OrderNormalizer::new();
        let term = parse("X + Y");
        let normalized = normalizer.normalize(&term);
        assert!(Term::same(&term, &normalized));
    }

    #[test]
    fn asymmetric_functors_are_left_alone() {
        let mut normalizer = OrderNormalizer::new();
        let term = parse("| Everything | - 1");
        let normalized = normalizer.normalize(&term);
        assert!(Term::same(&term, &normalized));
    }

    #[test]
    fn memo_is_keyed_by_instance() {
        let mut normalizer = OrderNormalizer::with_capacity(2);
        let term = parse("Y + X");
        let first = normalizer.normalize(&term);
        let second = normalizer.normalize(&term);
        assert!(Term::same(&first, &second));
    }

    #[test]
    fn eviction_keeps_the_cache_bounded() {
        let mut normalizer = OrderNormalizer::with_capacity(2);
        for i in 0..100 {
            let term = Term::apply("+", vec![Term::symbol("X"), Term::integer(i)]);
            normalizer.normalize(&term);
        }
        assert!(normalizer.cache.len() <= 2);
    }
}
