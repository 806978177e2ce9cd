//! The kinds of errors that can occur while parsing.

use ariadne::{Fmt, Label, Report, ReportKind};
use tally_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;
use std::ops::Range;

fn base_report<'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: &str,
) -> ariadne::ReportBuilder<'a, (&'a str, Range<usize>)> {
    let offset = spans.first().map(|span| span.start).unwrap_or(0);
    let mut report = Report::build(ReportKind::Error, src_id, offset).with_message(message);
    for span in spans {
        report = report.with_label(Label::new((src_id, span.clone())));
    }
    report
}

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedEof;

impl ErrorKind for UnexpectedEof {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        base_report(src_id, spans, "unexpected end of file")
            .with_help(format!(
                "you might need to add another {} here",
                "expression".fg(EXPR),
            ))
            .finish()
    }
}

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedEof;

impl ErrorKind for ExpectedEof {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        base_report(src_id, spans, "expected end of file")
            .with_help(format!(
                "I could not understand the remaining {} here",
                "expression".fg(EXPR),
            ))
            .finish()
    }
}

/// An unexpected token was encountered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

impl ErrorKind for UnexpectedToken {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        let expected = self
            .expected
            .iter()
            .map(|kind| format!("{:?}", kind))
            .collect::<Vec<_>>()
            .join(", ");
        base_report(src_id, spans, "unexpected token")
            .with_help(format!("expected one of: {}; found {:?}", expected, self.found))
            .finish()
    }
}
