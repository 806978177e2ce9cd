//! The exhaustive rewriting engine.
//!
//! A [`Rewriter`] owns a named, ordered list of [`Rule`]s and applies them to a term and all of
//! its subterms until nothing changes anywhere (a global fixpoint). Rules are pure functions
//! guarded by a cheap reified test: the list of top functors a rule can possibly apply to. The
//! engine dispatches through a table precomputed from those tests, trying the candidates in
//! registration order and applying the first that fires. Registration order is part of a rule
//! set's identity: it decides which of two overlapping rules wins, so it must be preserved
//! exactly for deterministic output.
//!
//! The engine never fails: a rule set that never reaches a fixpoint loops forever, which is a bug
//! in the rule set, not a condition the engine detects.
//!
//! # Dead ends
//!
//! Exhaustive rewriting revisits subtrees constantly. Any subtree that survived a full pass
//! (a top-node rewrite attempt plus a recursive pass over its children) without changing is a
//! *dead end*: no rule will ever change it, because rules are pure and the subtree is the same
//! instance. Each top-level [`Rewriter::rewrite`] call keeps an identity-keyed cache of dead ends
//! and skips recursion into them. The cache lives for a single invocation and pins the terms it
//! records, so an address never outlives its entry.

pub mod step_collector;

use crate::context::Context;
use crate::term::Term;
use std::collections::HashMap;
pub use step_collector::StepCollector;

/// A rewriting step: which rule fired, and the term before and after. This is the engine's
/// write-only trace channel; collecting these has no effect on the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteStep {
    /// The name of the rule that fired.
    pub rule: &'static str,

    /// The term the rule was applied to.
    pub before: Term,

    /// The term the rule produced.
    pub after: Term,
}

/// A single rewrite rule: a pure function from a term to a replacement term, or `None` when the
/// rule does not apply. The `labels` list is the rule's reified test: the top functors it can
/// possibly apply to. An empty list means the rule must be offered every term.
#[derive(Clone, Copy)]
pub struct Rule {
    /// A short name identifying the rule in traces.
    pub name: &'static str,

    /// The top functors this rule can apply to; empty means any term.
    pub labels: &'static [&'static str],

    /// The rule body. Must be pure and total: no panics for well-formed terms, `None` for
    /// "no change".
    pub apply: fn(&Term, &Context) -> Option<Term>,
}

/// An ordered list of rules with a precomputed functor dispatch table.
pub struct RuleSet {
    rules: Vec<Rule>,

    /// Functor name to the (ordered) indices of the rules whose reified test accepts it.
    by_label: HashMap<&'static str, Vec<usize>>,

    /// Indices of the rules that must be offered every term, in order.
    unguarded: Vec<usize>,
}

impl RuleSet {
    /// Builds the dispatch table for the given rules, preserving their order.
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut by_label: HashMap<&'static str, Vec<usize>> = HashMap::new();
        let mut unguarded = Vec::new();
        for (index, rule) in rules.iter().enumerate() {
            if rule.labels.is_empty() {
                unguarded.push(index);
            } else {
                for &label in rule.labels {
                    by_label.entry(label).or_default().push(index);
                }
            }
        }
        Self { rules, by_label, unguarded }
    }

    /// Applies the first rule that accepts and changes the given term. Returns the rule's name
    /// and the replacement, or `None` if no rule fires.
    pub fn dispatch(&self, term: &Term, ctx: &Context) -> Option<(&'static str, Term)> {
        let guarded = term
            .functor()
            .and_then(|functor| self.by_label.get(functor))
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        // merge the two ordered candidate lists so that registration order decides ties
        let mut guarded = guarded.iter().peekable();
        let mut unguarded = self.unguarded.iter().peekable();
        loop {
            let index = match (guarded.peek(), unguarded.peek()) {
                (Some(&&a), Some(&&b)) => {
                    if a < b {
                        guarded.next();
                        a
                    } else {
                        unguarded.next();
                        b
                    }
                },
                (Some(&&a), None) => {
                    guarded.next();
                    a
                },
                (None, Some(&&b)) => {
                    unguarded.next();
                    b
                },
                (None, None) => return None,
            };
            let rule = &self.rules[index];
            if let Some(rewritten) = (rule.apply)(term, ctx) {
                return Some((rule.name, rewritten));
            }
        }
    }
}

/// The per-invocation dead-end cache: terms proven stable under the current rule set, keyed by
/// instance. Values pin the recorded terms alive.
#[derive(Default)]
struct DeadEnds {
    stable: HashMap<usize, Term>,
}

impl DeadEnds {
    fn contains(&self, term: &Term) -> bool {
        self.stable.contains_key(&term.id())
    }

    fn record(&mut self, term: Term) {
        self.stable.insert(term.id(), term);
    }
}

/// A named rewriter that exhaustively applies its rules to a term and all of its subterms.
pub struct Rewriter {
    name: String,
    rules: RuleSet,
}

impl Rewriter {
    /// Creates a rewriter with the given name and rules. The name identifies the rule set in
    /// diagnostics; the order of the rules is significant (first match wins).
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self { name: name.into(), rules: RuleSet::new(rules) }
    }

    /// The name of this rewriter.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rewrites the term to its fixpoint under this rewriter's rules.
    pub fn rewrite(&self, term: &Term, ctx: &Context) -> Term {
        self.rewrite_with(term, ctx, &mut ())
    }

    /// Rewrites the term to its fixpoint, reporting every applied rule to the collector.
    pub fn rewrite_with(
        &self,
        term: &Term,
        ctx: &Context,
        steps: &mut dyn StepCollector<RewriteStep>,
    ) -> Term {
        let mut dead_ends = DeadEnds::default();
        self.rewrite_node(term, ctx, &mut dead_ends, steps)
    }

    /// Rewrites the term to its fixpoint, also returning the steps that were taken.
    pub fn rewrite_with_steps(&self, term: &Term, ctx: &Context) -> (Term, Vec<RewriteStep>) {
        let mut steps = Vec::new();
        let result = self.rewrite_with(term, ctx, &mut steps);
        (result, steps)
    }

    /// Rewrites one node: exhausts the rules at the top, recurses into the children, and repeats
    /// until a whole pass changes nothing. The stabilized term is recorded as a dead end.
    fn rewrite_node(
        &self,
        term: &Term,
        ctx: &Context,
        dead_ends: &mut DeadEnds,
        steps: &mut dyn StepCollector<RewriteStep>,
    ) -> Term {
        if dead_ends.contains(term) {
            return term.clone();
        }

        let mut current = term.clone();
        loop {
            let top = self.rewrite_top(&current, ctx, steps);
            let descended = if top.args().is_empty() {
                top
            } else {
                let args = top
                    .args()
                    .iter()
                    .map(|arg| self.rewrite_node(arg, ctx, dead_ends, steps))
                    .collect();
                top.with_args(args)
            };
            if Term::same(&descended, &current) {
                break;
            }
            current = descended;
        }

        dead_ends.record(current.clone());
        current
    }

    /// Applies rules to the top node only, until none fires.
    fn rewrite_top(
        &self,
        term: &Term,
        ctx: &Context,
        steps: &mut dyn StepCollector<RewriteStep>,
    ) -> Term {
        let mut current = term.clone();
        while let Some((rule, rewritten)) = self.rules.dispatch(&current, ctx) {
            steps.push(RewriteStep {
                rule,
                before: current.clone(),
                after: rewritten.clone(),
            });
            current = rewritten;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use crate::ops;
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn boolean_rewriter() -> Rewriter {
        Rewriter::new(
            "boolean simplification",
            vec![ops::and::rule(), ops::or::rule(), ops::not::rule()],
        )
    }

    #[test]
    fn fixpoint_is_idempotent() {
        let ctx = Context::new();
        let rewriter = boolean_rewriter();
        let term = parse("not not (X = a and true) or false");
        let once = rewriter.rewrite(&term, &ctx);
        let twice = rewriter.rewrite(&once, &ctx);
        assert!(Term::same(&once, &twice));
        assert_eq!(once, parse("X = a"));
    }

    #[test]
    fn untouched_subterms_are_shared() {
        let ctx = Context::new();
        let rewriter = boolean_rewriter();
        let term = parse("(X = a and Y = b) or (Z = c and true)");
        let rewritten = rewriter.rewrite(&term, &ctx);
        assert_eq!(rewritten, parse("(X = a and Y = b) or Z = c"));
        // the untouched left disjunct is the same instance, not a rebuilt copy
        assert!(Term::same(&term.args()[0], &rewritten.args()[0]));
    }

    #[test]
    fn registration_order_breaks_ties() {
        fn to_one(term: &Term, _: &Context) -> Option<Term> {
            term.name()
                .filter(|&name| name == "p")
                .map(|_| Term::integer(1))
        }
        fn to_two(term: &Term, _: &Context) -> Option<Term> {
            term.name()
                .filter(|&name| name == "p")
                .map(|_| Term::integer(2))
        }
        let ctx = Context::new();
        let first_wins = Rewriter::new("first wins", vec![
            Rule { name: "to_one", labels: &[], apply: to_one },
            Rule { name: "to_two", labels: &[], apply: to_two },
        ]);
        let (result, steps) = first_wins.rewrite_with_steps(&Term::symbol("p"), &ctx);
        assert_eq!(result, Term::integer(1));
        assert_eq!(steps.iter().map(|s| s.rule).collect::<Vec<_>>(), vec!["to_one"]);
    }

    #[test]
    fn steps_report_rule_names() {
        let ctx = Context::new();
        let rewriter = boolean_rewriter();
        let (result, steps) = rewriter.rewrite_with_steps(&parse("not false and X = a"), &ctx);
        assert_eq!(result, parse("X = a"));
        assert!(steps.iter().any(|step| step.rule == "not"));
        assert!(steps.iter().any(|step| step.rule == "and"));
    }

    #[test]
    fn stable_terms_come_back_unchanged() {
        let ctx = Context::new();
        let rewriter = boolean_rewriter();
        let term = parse("X = a or Y = b");
        let rewritten = rewriter.rewrite(&term, &ctx);
        assert!(Term::same(&term, &rewritten));
    }
}
