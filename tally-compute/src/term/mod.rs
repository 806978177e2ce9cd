//! The immutable term tree that all of tally manipulates.
//!
//! A [`Term`] is a label (a symbol, or an integer literal) together with an ordered list of child
//! terms. Terms are immutable and cheap to clone: a [`Term`] is a reference-counted handle to its
//! node, and every transformation in this crate builds new terms while **sharing** the subtrees it
//! did not touch. That sharing is load-bearing, not just an optimization: "did anything change" is
//! answered everywhere by instance identity ([`Term::same`]), which is only correct because a
//! transformation that changes nothing is required to return the same instance it was given.
//!
//! # Equality, hashing, ordering
//!
//! [`PartialEq`] is deep structural equality, with an instance-identity fast path and a cached
//! structural hash used as a prefilter. The hash of a term is computed once, on first use, and
//! cached in the node; this is safe because terms are immutable.
//!
//! Terms are totally ordered: atoms sort before compound terms (integers before symbols, integers
//! by value, symbols by name), and compound terms compare lexicographically by functor and then by
//! arguments. This order is what the canonicalizer uses to sort the arguments of commutative
//! operators.
//!
//! # Variables and constants
//!
//! Whether a symbol is a variable or a constant is not a property of the term but of the
//! [`Context`](crate::context::Context) (a name starting with an upper-case letter is a variable).
//! Distinct constants are assumed to denote distinct individuals.

pub mod iter;

use crate::context::Context;
use crate::ops;
use crate::primitive::{int, int_from_str};
use iter::Subterms;
use rug::Integer;
use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use tally_parser::parser::{ast, op::{BinOpKind, UnaryOpKind}};

/// The label of a term node: an atomic symbol (which doubles as the functor of compound terms) or
/// an integer literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// An integer literal, such as `0` or `144`.
    Integer(Integer),

    /// A symbol, such as the variable `X`, the constant `a`, or the functor `and`.
    Symbol(String),
}

impl Label {
    fn order(&self, other: &Label) -> Ordering {
        match (self, other) {
            (Label::Integer(a), Label::Integer(b)) => a.cmp(b),
            (Label::Integer(_), Label::Symbol(_)) => Ordering::Less,
            (Label::Symbol(_), Label::Integer(_)) => Ordering::Greater,
            (Label::Symbol(a), Label::Symbol(b)) => a.cmp(b),
        }
    }
}

/// The node behind a [`Term`] handle. Immutable after construction, except for the lazily
/// computed hash.
struct TermNode {
    label: Label,
    args: Vec<Term>,
    hash: Cell<Option<u64>>,
}

/// An immutable, structurally shared term.
#[derive(Clone)]
pub struct Term(Rc<TermNode>);

impl Term {
    /// Creates an atomic symbol term.
    pub fn symbol(name: impl Into<String>) -> Term {
        Term(Rc::new(TermNode {
            label: Label::Symbol(name.into()),
            args: Vec::new(),
            hash: Cell::new(None),
        }))
    }

    /// Creates an integer literal term.
    pub fn integer(value: impl Into<Integer>) -> Term {
        Term(Rc::new(TermNode {
            label: Label::Integer(value.into()),
            args: Vec::new(),
            hash: Cell::new(None),
        }))
    }

    /// Creates the boolean constant `true` or `false`.
    pub fn boolean(value: bool) -> Term {
        Term::symbol(if value { "true" } else { "false" })
    }

    /// Creates a compound term applying the given functor to the given arguments.
    pub fn apply(functor: impl Into<String>, args: Vec<Term>) -> Term {
        Term(Rc::new(TermNode {
            label: Label::Symbol(functor.into()),
            args,
            hash: Cell::new(None),
        }))
    }

    /// Returns the label of this term.
    pub fn label(&self) -> &Label {
        &self.0.label
    }

    /// Returns the arguments of this term (empty for atoms).
    pub fn args(&self) -> &[Term] {
        &self.0.args
    }

    /// Returns true if this term has no arguments.
    pub fn is_atom(&self) -> bool {
        self.0.args.is_empty()
    }

    /// Returns the functor of this term, if it is a compound term.
    pub fn functor(&self) -> Option<&str> {
        if self.0.args.is_empty() {
            return None;
        }
        match &self.0.label {
            Label::Symbol(name) => Some(name),
            Label::Integer(_) => None,
        }
    }

    /// Returns the name of this term, if it is an atomic symbol.
    pub fn name(&self) -> Option<&str> {
        if self.0.args.is_empty() {
            match &self.0.label {
                Label::Symbol(name) => Some(name),
                Label::Integer(_) => None,
            }
        } else {
            None
        }
    }

    /// Returns the value of this term, if it is an integer literal.
    pub fn as_integer(&self) -> Option<&Integer> {
        if self.0.args.is_empty() {
            match &self.0.label {
                Label::Integer(value) => Some(value),
                Label::Symbol(_) => None,
            }
        } else {
            None
        }
    }

    /// Returns true if this term is the boolean constant `true`.
    pub fn is_true(&self) -> bool {
        self.name() == Some("true")
    }

    /// Returns true if this term is the boolean constant `false`.
    pub fn is_false(&self) -> bool {
        self.name() == Some("false")
    }

    /// Returns true if this term is an integer literal with the given value.
    pub fn is_integer(&self, value: i32) -> bool {
        self.as_integer().map(|n| *n == value).unwrap_or(false)
    }

    /// Returns true if the two handles point at the **same instance**. This is the change
    /// detector used throughout the engine; it is much cheaper than structural equality and,
    /// unlike structural equality, distinguishes "untouched" from "rebuilt equal".
    pub fn same(a: &Term, b: &Term) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Returns an address identifying this instance, used as the key of identity-based caches.
    /// The caches that use it keep the term alive, so the address cannot be reused behind
    /// their back.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// Rebuilds this term with the given arguments, returning the same instance if every
    /// argument is the same instance as before.
    pub fn with_args(&self, args: Vec<Term>) -> Term {
        if args.len() == self.0.args.len()
            && args.iter().zip(&self.0.args).all(|(a, b)| Term::same(a, b))
        {
            return self.clone();
        }
        Term(Rc::new(TermNode {
            label: self.0.label.clone(),
            args,
            hash: Cell::new(None),
        }))
    }

    /// Replaces every occurrence of `from` (by structural equality) with `to`, sharing every
    /// untouched subtree with `self`.
    pub fn replace_all(&self, from: &Term, to: &Term) -> Term {
        if self == from {
            return to.clone();
        }
        if self.0.args.is_empty() {
            return self.clone();
        }
        let args = self.0.args.iter().map(|arg| arg.replace_all(from, to)).collect();
        self.with_args(args)
    }

    /// Returns a depth-first (pre-order) iterator over this term and all of its subterms.
    pub fn subterms(&self) -> Subterms {
        Subterms::new(self.clone())
    }

    /// Collects the variables of this term in first-occurrence order.
    pub fn variables(&self, ctx: &Context) -> Vec<Term> {
        let mut variables = Vec::new();
        for subterm in self.subterms() {
            if ctx.is_variable(&subterm) && !variables.contains(&subterm) {
                variables.push(subterm);
            }
        }
        variables
    }

    /// Returns the cached structural hash, computing it on first use.
    fn structural_hash(&self) -> u64 {
        if let Some(hash) = self.0.hash.get() {
            return hash;
        }
        let mut hasher = DefaultHasher::new();
        match &self.0.label {
            Label::Integer(value) => {
                0u8.hash(&mut hasher);
                value.hash(&mut hasher);
            },
            Label::Symbol(name) => {
                1u8.hash(&mut hasher);
                name.hash(&mut hasher);
            },
        }
        self.0.args.len().hash(&mut hasher);
        for arg in &self.0.args {
            arg.structural_hash().hash(&mut hasher);
        }
        let hash = hasher.finish();
        self.0.hash.set(Some(hash));
        hash
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        if self.structural_hash() != other.structural_hash() {
            return false;
        }
        self.0.label == other.0.label && self.0.args == other.0.args
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_atom(), other.is_atom()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => self
                .0
                .label
                .order(&other.0.label)
                .then_with(|| {
                    for (a, b) in self.0.args.iter().zip(&other.0.args) {
                        let ordering = a.cmp(b);
                        if ordering != Ordering::Equal {
                            return ordering;
                        }
                    }
                    self.0.args.len().cmp(&other.0.args.len())
                }),
        }
    }
}

/// The precedence of a term's top operator when displayed, used to decide parenthesization.
/// Conditionals are loosest so that they are always parenthesized inside other operators.
fn display_precedence(term: &Term) -> u8 {
    match term.functor() {
        Some(ops::if_then_else::IF_THEN_ELSE) => 0,
        Some(ops::equivalence::EQUIVALENCE) => 1,
        Some(ops::implication::IMPLICATION) => 2,
        Some(ops::or::OR) => 3,
        Some(ops::and::AND) => 4,
        Some(ops::not::NOT) => 5,
        Some(ops::equality::EQUALITY) | Some(ops::disequality::DISEQUALITY) => 6,
        Some(ops::plus::PLUS) => 7,
        Some(ops::minus::MINUS) => if term.args().len() == 2 { 7 } else { 9 },
        Some(ops::times::TIMES) => 8,
        _ => 10,
    }
}

/// Writes a child term, parenthesized if it binds looser than its parent.
fn write_child(f: &mut std::fmt::Formatter<'_>, child: &Term, parent: u8) -> std::fmt::Result {
    if display_precedence(child) < parent {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

/// Writes an infix application, such as `a + b + c`.
fn write_infix(
    f: &mut std::fmt::Formatter<'_>,
    op: &str,
    args: &[Term],
    precedence: u8,
) -> std::fmt::Result {
    let mut iter = args.iter();
    if let Some(first) = iter.next() {
        write_child(f, first, precedence)?;
        for arg in iter {
            write!(f, " {} ", op)?;
            // right operands at the same precedence keep their parentheses, so that
            // `a - (b - c)` round-trips
            if display_precedence(arg) <= precedence {
                write!(f, "({})", arg)?;
            } else {
                write!(f, "{}", arg)?;
            }
        }
    }
    Ok(())
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0.label {
            Label::Integer(value) => write!(f, "{}", value),
            Label::Symbol(name) if self.0.args.is_empty() => write!(f, "{}", name),
            Label::Symbol(name) => {
                let precedence = display_precedence(self);
                match name.as_str() {
                    ops::if_then_else::IF_THEN_ELSE if self.0.args.len() == 3 => write!(
                        f,
                        "if {} then {} else {}",
                        self.0.args[0], self.0.args[1], self.0.args[2],
                    ),
                    ops::cardinality::CARDINALITY if self.0.args.len() == 1 => {
                        write!(f, "| {} |", self.0.args[0])
                    },
                    ops::not::NOT if self.0.args.len() == 1 => {
                        write!(f, "not ")?;
                        write_child(f, &self.0.args[0], precedence)
                    },
                    ops::minus::MINUS if self.0.args.len() == 1 => {
                        write!(f, "-")?;
                        write_child(f, &self.0.args[0], precedence)
                    },
                    ops::plus::PLUS
                    | ops::minus::MINUS
                    | ops::times::TIMES
                    | ops::and::AND
                    | ops::or::OR
                    | ops::equality::EQUALITY
                    | ops::disequality::DISEQUALITY
                    | ops::implication::IMPLICATION
                    | ops::equivalence::EQUIVALENCE => {
                        write_infix(f, name, &self.0.args, precedence)
                    },
                    _ => {
                        write!(f, "{}(", name)?;
                        let mut iter = self.0.args.iter();
                        if let Some(arg) = iter.next() {
                            write!(f, "{}", arg)?;
                            for arg in iter {
                                write!(f, ", {}", arg)?;
                            }
                        }
                        write!(f, ")")
                    },
                }
            },
        }
    }
}

impl std::fmt::Debug for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<&ast::Expr> for Term {
    /// Converts the parser's AST into a term, flattening nested applications of the associative
    /// operators (`+`, `*`, `and`, `or`) into a single n-ary term.
    fn from(expr: &ast::Expr) -> Term {
        match expr {
            ast::Expr::Literal(literal) => Term::integer(int_from_str(&literal.digits)),
            ast::Expr::Symbol(symbol) => Term::symbol(symbol.name.clone()),
            ast::Expr::Cardinality(cardinality) => {
                ops::cardinality::make(Term::symbol(cardinality.sort.clone()))
            },
            ast::Expr::Unary(unary) => {
                let operand = Term::from(unary.operand.as_ref());
                match unary.op.kind {
                    UnaryOpKind::Not => ops::not::make(operand),
                    UnaryOpKind::Neg => match operand.as_integer() {
                        Some(value) => Term::integer(int(-value.clone())),
                        None => Term::apply(ops::minus::MINUS, vec![operand]),
                    },
                }
            },
            ast::Expr::Binary(binary) => {
                let functor = match binary.op.kind {
                    BinOpKind::Iff => ops::equivalence::EQUIVALENCE,
                    BinOpKind::Implies => ops::implication::IMPLICATION,
                    BinOpKind::Or => ops::or::OR,
                    BinOpKind::And => ops::and::AND,
                    BinOpKind::Eq => ops::equality::EQUALITY,
                    BinOpKind::Neq => ops::disequality::DISEQUALITY,
                    BinOpKind::Add => ops::plus::PLUS,
                    BinOpKind::Sub => ops::minus::MINUS,
                    BinOpKind::Mul => ops::times::TIMES,
                };
                let lhs = Term::from(binary.lhs.as_ref());
                let rhs = Term::from(binary.rhs.as_ref());
                let flatten = matches!(
                    binary.op.kind,
                    BinOpKind::Or | BinOpKind::And | BinOpKind::Add | BinOpKind::Mul,
                );
                let mut args = Vec::new();
                for operand in [lhs, rhs] {
                    if flatten && operand.functor() == Some(functor) {
                        args.extend(operand.args().iter().cloned());
                    } else {
                        args.push(operand);
                    }
                }
                Term::apply(functor, args)
            },
            ast::Expr::If(if_expr) => ops::if_then_else::make(
                Term::from(if_expr.condition.as_ref()),
                Term::from(if_expr.then_branch.as_ref()),
                Term::from(if_expr.else_branch.as_ref()),
            ),
        }
    }
}

impl From<ast::Expr> for Term {
    fn from(expr: ast::Expr) -> Term {
        Term::from(&expr)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn structural_equality_ignores_instances() {
        let a = parse("X != Y and X != a");
        let b = parse("X != Y and X != a");
        assert!(!Term::same(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn flattening() {
        let term = parse("X + (Y + Z)");
        assert_eq!(term.functor(), Some("+"));
        assert_eq!(term.args().len(), 3);
    }

    #[test]
    fn atoms_sort_before_compounds() {
        let atom = Term::symbol("z");
        let compound = parse("a + b");
        assert!(atom < compound);
        assert!(Term::integer(5) < atom);
    }

    #[test]
    fn replace_all_shares_untouched_subtrees() {
        let term = parse("(X = a and Y = b) or Z = c");
        let replaced = term.replace_all(&Term::symbol("Z"), &Term::symbol("W"));
        assert!(!Term::same(&term, &replaced));
        // the untouched left conjunction is shared, not rebuilt
        assert!(Term::same(&term.args()[0], &replaced.args()[0]));
    }

    #[test]
    fn replace_all_without_occurrences_is_identity() {
        let term = parse("X = a and Y = b");
        let replaced = term.replace_all(&Term::symbol("Q"), &Term::symbol("R"));
        assert!(Term::same(&term, &replaced));
    }

    #[test]
    fn negative_literal() {
        let term = parse("-1");
        assert_eq!(term.as_integer().map(|n| n.to_i32().unwrap()), Some(-1));
    }

    #[test]
    fn display_round_trips_through_parser() {
        for source in [
            "X != Y and X != a",
            "if Y = a then | Everything | - 1 else | Everything | - 2",
            "| Everything | + -1 + (| Everything | - 1) * | Everything |",
            "(Y = a and X = T) or (Y != a and X = T1 and T = T1)",
            "not (X = Y or Y = Z)",
        ] {
            let term = parse(source);
            assert_eq!(parse(&term.to_string()), term, "failed to round-trip {source}");
        }
    }

    #[test]
    fn variables_in_first_occurrence_order() {
        let ctx = crate::context::Context::new();
        let term = parse("X1 != X2 and X2 != X0 and X1 != X0");
        let names = term
            .variables(&ctx)
            .iter()
            .map(|v| v.name().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["X1", "X2", "X0"]);
    }
}
