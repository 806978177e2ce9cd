//! Tokenizer and parser for the tally formula language.
//!
//! The language is the usual surface syntax for equality logic over finite domains: equality and
//! disequality literals (`X = a`, `X != Y`), the boolean connectives `and`, `or`, `not`, `=>` and
//! `<=>`, conditional expressions (`if X = a then 1 else 0`), integer arithmetic (`+`, `-`, `*`)
//! and sort cardinalities (`| Everything |`).
//!
//! Names follow the Prolog-ish convention used throughout tally: a name starting with an
//! upper-case letter (`X`, `Y1`) is a variable, and any other name (`a`, `bob`) is a constant
//! denoting a distinct individual.
//!
//! ```
//! use tally_parser::parser::Parser;
//!
//! let ast = Parser::new("X != Y and X != a").try_parse_full().unwrap();
//! ```

pub mod parser;
pub mod tokenizer;
