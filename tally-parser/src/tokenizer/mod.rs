pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn literal() {
        compare_tokens(
            "X != Y",
            [
                (TokenKind::Name, "X"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Neq, "!="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "Y"),
            ],
        );
    }

    #[test]
    fn keywords_and_names() {
        compare_tokens(
            "X = a and android",
            [
                (TokenKind::Name, "X"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Eq, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "a"),
                (TokenKind::Whitespace, " "),
                (TokenKind::And, "and"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "android"),
            ],
        );
    }

    #[test]
    fn cardinality() {
        compare_tokens(
            "| Everything | - 1",
            [
                (TokenKind::Pipe, "|"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "Everything"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Pipe, "|"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "1"),
            ],
        );
    }
}
