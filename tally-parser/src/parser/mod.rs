//! The parser itself, turning a token stream into an AST.

pub mod ast;
pub mod error;
pub mod op;

use ast::{Binary, Cardinality, Expr, If, Literal, Symbol, Unary};
use error::{kind, Error};
use op::{Associativity, BinOp, BinOpKind, Precedence, UnaryOp, UnaryOpKind};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};

/// The tokens a primary expression can start with, used for error reporting.
const PRIMARY_STARTS: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::Name,
    TokenKind::Not,
    TokenKind::Sub,
    TokenKind::If,
    TokenKind::Pipe,
    TokenKind::OpenParen,
];

/// A parser over a source string.
pub struct Parser<'source> {
    /// The tokens of the source, including whitespace.
    tokens: Box<[Token<'source>]>,

    /// The index of the next token to consume.
    cursor: usize,

    /// The length of the source, used to point errors at the end of the input.
    end: usize,
}

impl<'source> Parser<'source> {
    /// Creates a new parser for the given source string.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            end: source.len(),
        }
    }

    /// Parses the whole source as a single expression, failing if any input remains.
    pub fn try_parse_full(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_expr(Precedence::Any)?;
        match self.peek() {
            Some(token) => Err(Error::new(vec![token.span.clone()], kind::ExpectedEof)),
            None => Ok(expr),
        }
    }

    /// Returns the next significant token without consuming it.
    fn peek(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.kind.is_whitespace())
    }

    /// Consumes and returns the next significant token.
    fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.kind.is_whitespace() {
                return Ok(token.clone());
            }
        }
        Err(Error::new(vec![self.end..self.end], kind::UnexpectedEof))
    }

    /// Consumes the next significant token, requiring it to be of the given kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token<'source>, Error> {
        let token = self.next_token()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(Error::new(
                vec![token.span.clone()],
                kind::UnexpectedToken {
                    expected: match kind {
                        TokenKind::Then => &[TokenKind::Then],
                        TokenKind::Else => &[TokenKind::Else],
                        TokenKind::Name => &[TokenKind::Name],
                        TokenKind::Pipe => &[TokenKind::Pipe],
                        TokenKind::CloseParen => &[TokenKind::CloseParen],
                        _ => PRIMARY_STARTS,
                    },
                    found: token.kind,
                },
            ))
        }
    }

    /// Parses an expression, consuming binary operators of at least the given precedence.
    fn parse_expr(&mut self, min_precedence: Precedence) -> Result<Expr, Error> {
        let mut lhs = self.parse_unary()?;

        while let Some(token) = self.peek() {
            let Some(op_kind) = BinOpKind::from_token(token.kind) else {
                break;
            };
            let precedence = op_kind.precedence();
            if precedence < min_precedence {
                break;
            }

            let op_token = self.next_token()?;
            let rhs_min = match op_kind.associativity() {
                Associativity::Left => precedence.tighter(),
                Associativity::Right => precedence,
            };
            let rhs = self.parse_expr(rhs_min)?;

            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op: BinOp { kind: op_kind, span: op_token.span },
                rhs: Box::new(rhs),
            });
        }

        Ok(lhs)
    }

    /// Parses a possibly negated primary expression.
    fn parse_unary(&mut self) -> Result<Expr, Error> {
        let token = match self.peek() {
            Some(token) => token,
            None => return self.parse_primary(),
        };

        let op_kind = match token.kind {
            TokenKind::Not => UnaryOpKind::Not,
            TokenKind::Sub => UnaryOpKind::Neg,
            _ => return self.parse_primary(),
        };

        let op_token = self.next_token()?;
        let operand = if op_kind == UnaryOpKind::Neg {
            self.parse_primary()?
        } else {
            // `not` binds looser than comparisons so that `not X = Y` negates the whole literal
            self.parse_expr(op_kind.precedence().tighter())?
        };

        Ok(Expr::Unary(Unary {
            op: UnaryOp { kind: op_kind, span: op_token.span },
            operand: Box::new(operand),
        }))
    }

    /// Parses a primary expression: a literal, name, cardinality, conditional, or parenthesized
    /// expression.
    fn parse_primary(&mut self) -> Result<Expr, Error> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Int => Ok(Expr::Literal(Literal {
                digits: token.lexeme.to_string(),
                span: token.span,
            })),
            TokenKind::Name => Ok(Expr::Symbol(Symbol {
                name: token.lexeme.to_string(),
                span: token.span,
            })),
            TokenKind::Pipe => {
                let sort = self.expect(TokenKind::Name)?;
                let close = self.expect(TokenKind::Pipe)?;
                Ok(Expr::Cardinality(Cardinality {
                    sort: sort.lexeme.to_string(),
                    span: token.span.start..close.span.end,
                }))
            },
            TokenKind::If => {
                let condition = self.parse_expr(Precedence::Any)?;
                self.expect(TokenKind::Then)?;
                let then_branch = self.parse_expr(Precedence::Any)?;
                self.expect(TokenKind::Else)?;
                let else_branch = self.parse_expr(Precedence::Any)?;
                let span = token.span.start..else_branch.span().end;
                Ok(Expr::If(If {
                    condition: Box::new(condition),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                    span,
                }))
            },
            TokenKind::OpenParen => {
                let expr = self.parse_expr(Precedence::Any)?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expr)
            },
            _ => Err(Error::new(
                vec![token.span.clone()],
                kind::UnexpectedToken { expected: PRIMARY_STARTS, found: token.kind },
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses the input, panicking on failure.
    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full().unwrap()
    }

    /// Strips span information by printing the operator/operand structure.
    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => literal.digits.clone(),
            Expr::Symbol(symbol) => symbol.name.clone(),
            Expr::Cardinality(cardinality) => format!("card({})", cardinality.sort),
            Expr::Unary(unary) => format!("{:?}({})", unary.op.kind, shape(&unary.operand)),
            Expr::Binary(binary) => format!(
                "{:?}({}, {})",
                binary.op.kind,
                shape(&binary.lhs),
                shape(&binary.rhs),
            ),
            Expr::If(if_expr) => format!(
                "If({}, {}, {})",
                shape(&if_expr.condition),
                shape(&if_expr.then_branch),
                shape(&if_expr.else_branch),
            ),
        }
    }

    #[test]
    fn precedence() {
        let expr = parse("X != Y and X != a or b = c");
        assert_eq!(shape(&expr), "Or(And(Neq(X, Y), Neq(X, a)), Eq(b, c))");
    }

    #[test]
    fn arithmetic() {
        let expr = parse("| Everything | + -1 + 2 * | Everything |");
        assert_eq!(
            shape(&expr),
            "Add(Add(card(Everything), Neg(1)), Mul(2, card(Everything)))",
        );
    }

    #[test]
    fn conditional() {
        let expr = parse("if Y = a then | Everything | - 1 else | Everything | - 2");
        assert_eq!(
            shape(&expr),
            "If(Eq(Y, a), Sub(card(Everything), 1), Sub(card(Everything), 2))",
        );
    }

    #[test]
    fn nested_conditional() {
        let expr = parse("if X = T then if T = T1 then 1 else 0 else 0");
        assert_eq!(shape(&expr), "If(Eq(X, T), If(Eq(T, T1), 1, 0), 0)");
    }

    #[test]
    fn negation_scopes_over_literal() {
        let expr = parse("not X = Y and p");
        assert_eq!(shape(&expr), "And(Not(Eq(X, Y)), p)");
    }

    #[test]
    fn implication_is_right_associative() {
        let expr = parse("p => q => r");
        assert_eq!(shape(&expr), "Implies(p, Implies(q, r))");
    }

    #[test]
    fn unexpected_token() {
        let result = Parser::new("X = )").try_parse_full();
        assert!(result.is_err());
    }

    #[test]
    fn trailing_input() {
        let result = Parser::new("X = Y Y").try_parse_full();
        assert!(result.is_err());
    }
}
