//! Sort cardinalities, `| Everything |`. The functor name keeps the original mixfix spelling.

use crate::context::Context;
use crate::rewrite::Rule;
use crate::term::Term;

pub const CARDINALITY: &str = "| . |";

/// Makes the cardinality of the given sort symbol.
pub fn make(sort: Term) -> Term {
    Term::apply(CARDINALITY, vec![sort])
}

/// Folds the cardinality of a sort whose size the context knows.
pub fn simplify(term: &Term, ctx: &Context) -> Option<Term> {
    if term.functor() != Some(CARDINALITY) || term.args().len() != 1 {
        return None;
    }
    let sort = term.args()[0].name()?;
    ctx.sort_size(sort).map(Term::integer)
}

pub fn rule() -> Rule {
    Rule { name: "cardinality", labels: &[CARDINALITY], apply: simplify }
}

#[cfg(test)]
mod tests {
    use crate::context::context_with_everything_of_size;
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn folds_known_sorts_only() {
        let symbolic = Context::new();
        let concrete = context_with_everything_of_size(10);
        let term = parse("| Everything |");
        assert_eq!(simplify(&term, &symbolic), None);
        assert_eq!(simplify(&term, &concrete), Some(parse("10")));
    }
}
