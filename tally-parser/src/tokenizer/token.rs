use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that the tokenizer can produce.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Int,

    #[token("and")]
    And,

    #[token("or")]
    Or,

    #[token("not")]
    Not,

    #[token("if")]
    If,

    #[token("then")]
    Then,

    #[token("else")]
    Else,

    /// A name: a variable if it starts with an upper-case letter, a constant otherwise. Note that
    /// the keyword tokens above take priority over this pattern.
    #[regex(r"[A-Za-z_][A-Za-z0-9_']*")]
    Name,

    #[token("=>")]
    Implies,

    #[token("<=>")]
    Iff,

    #[token("=")]
    Eq,

    #[token("!=")]
    Neq,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("|")]
    Pipe,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,
}

impl TokenKind {
    /// Returns true if this token is insignificant to the parser.
    pub fn is_whitespace(self) -> bool {
        self == TokenKind::Whitespace
    }
}

/// A token produced by the tokenizer, including the region of the source code it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'source> {
    /// The region of the source code that this token was parsed from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw text of the token.
    pub lexeme: &'source str,
}
