//! Precedence-climbing parser.

use super::{
    ast::{BinaryOp, Expr, UnaryOp},
    lexer::{LexError, Lexer, Token, TokenKind},
};

/// Upper bound on `parse_expression` nesting, so a pathological input
/// fails with an error instead of exhausting the stack.
const MAX_DEPTH: usize = 64;

/// Operator binding strengths, weakest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Assignment,
    Sum,
    Product,
    Exponent,
    Prefix,
    Call,
}

/// Binding strength of the upcoming token when it appears in infix
/// position. `Name`/`Number` here drive implicit multiplication: an
/// operand directly following another operand binds like `*`.
fn infix_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Assign => Precedence::Assignment,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::Name | TokenKind::Number => Precedence::Product,
        TokenKind::Caret => Precedence::Exponent,
        TokenKind::LeftParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: TokenKind,
        found: TokenKind,
    },

    #[error("{found} cannot begin an expression")]
    NoPrefixRule { found: TokenKind },

    #[error("only a function name may be called")]
    InvalidCallTarget,

    #[error("trailing input after the expression, starting with {found}")]
    Trailing { found: TokenKind },

    #[error("expression nesting exceeds {MAX_DEPTH} levels")]
    TooDeep,
}

/// Parses one equation into an [`Expr`] tree.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(Lexer::new(source));
    let expr = parser.parse_expression(Precedence::Lowest)?;

    let trailing = parser.peek(0)?;
    if trailing.kind != TokenKind::Eof {
        return Err(ParseError::Trailing {
            found: trailing.kind,
        });
    }

    Ok(expr)
}

struct Parser<'src> {
    lexer: Lexer<'src>,
    // Append-only lookahead buffer with a monotonically advancing read
    // cursor; tokens are never re-lexed or popped from the front.
    lookahead: Vec<Token<'src>>,
    cursor: usize,
    depth: usize,
}

impl<'src> Parser<'src> {
    fn new(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            lookahead: vec![],
            cursor: 0,
            depth: 0,
        }
    }

    fn peek(&mut self, distance: usize) -> Result<Token<'src>, ParseError> {
        while self.cursor + distance >= self.lookahead.len() {
            let token = self.lexer.next()?;
            self.lookahead.push(token);
        }
        Ok(self.lookahead[self.cursor + distance])
    }

    fn consume(&mut self) -> Result<Token<'src>, ParseError> {
        let token = self.peek(0)?;
        self.cursor += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token<'src>, ParseError> {
        let token = self.peek(0)?;
        if token.kind != expected {
            return Err(ParseError::Unexpected {
                expected,
                found: token.kind,
            });
        }
        self.consume()
    }

    /// Consumes the next token iff it has the expected kind.
    fn matches(&mut self, expected: TokenKind) -> Result<bool, ParseError> {
        if self.peek(0)?.kind == expected {
            self.consume()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_expression(&mut self, min: Precedence) -> Result<Expr, ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }

        let token = self.consume()?;
        let mut left = self.parse_prefix(token)?;

        while min < infix_precedence(self.peek(0)?.kind) {
            // Peek rather than consume: the implicit-multiplication
            // rule must leave its trigger token in place so it can be
            // parsed as the start of the right operand.
            let token = self.peek(0)?;
            left = self.parse_infix(left, token)?;
        }

        self.depth -= 1;
        Ok(left)
    }

    fn parse_prefix(&mut self, token: Token<'src>) -> Result<Expr, ParseError> {
        match token.kind {
            TokenKind::Name => Ok(Expr::Var(token.text.to_owned())),
            TokenKind::Number => Ok(Expr::Number(token.text.to_owned())),

            TokenKind::LeftParen => {
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.expect(TokenKind::RightParen)?;
                Ok(inner)
            }

            TokenKind::Plus | TokenKind::Minus => {
                let op = match token.kind {
                    TokenKind::Plus => UnaryOp::Plus,
                    _ => UnaryOp::Minus,
                };
                let operand = self.parse_expression(Precedence::Prefix)?;
                Ok(Expr::Prefix {
                    op,
                    operand: Box::new(operand),
                })
            }

            found => Err(ParseError::NoPrefixRule { found }),
        }
    }

    fn parse_infix(&mut self, left: Expr, token: Token<'src>) -> Result<Expr, ParseError> {
        match token.kind {
            TokenKind::Plus | TokenKind::Minus => {
                self.consume()?;
                let op = if token.kind == TokenKind::Plus {
                    BinaryOp::Add
                } else {
                    BinaryOp::Sub
                };
                let right = self.parse_expression(Precedence::Sum)?;
                Ok(binary(left, op, right))
            }

            TokenKind::Asterisk | TokenKind::Slash => {
                self.consume()?;
                let op = if token.kind == TokenKind::Asterisk {
                    BinaryOp::Mul
                } else {
                    BinaryOp::Div
                };
                let right = self.parse_expression(Precedence::Product)?;
                Ok(binary(left, op, right))
            }

            // Implicit multiplication: an operand token in operator
            // position. The token is not consumed here; the recursive
            // call picks it up as the start of the right operand.
            TokenKind::Name | TokenKind::Number => {
                let right = self.parse_expression(Precedence::Product)?;
                Ok(binary(left, BinaryOp::Mul, right))
            }

            // Right-associative: the right operand is parsed one level
            // below EXPONENT, so a following `^` keeps climbing.
            TokenKind::Caret => {
                self.consume()?;
                let right = self.parse_expression(Precedence::Product)?;
                Ok(binary(left, BinaryOp::Pow, right))
            }

            // Also right-associative (one level below ASSIGNMENT).
            // Any expression is accepted as the target here; the
            // validator narrows it to the bare name `y`.
            TokenKind::Assign => {
                self.consume()?;
                let value = self.parse_expression(Precedence::Lowest)?;
                Ok(Expr::Assign {
                    target: Box::new(left),
                    value: Box::new(value),
                })
            }

            TokenKind::LeftParen => {
                self.consume()?;
                let name = match left {
                    Expr::Var(name) => name,
                    _ => return Err(ParseError::InvalidCallTarget),
                };
                let mut args = vec![];
                if !self.matches(TokenKind::RightParen)? {
                    loop {
                        args.push(self.parse_expression(Precedence::Lowest)?);
                        if !self.matches(TokenKind::Comma)? {
                            break;
                        }
                    }
                    self.expect(TokenKind::RightParen)?;
                }
                Ok(Expr::Call { name, args })
            }

            // infix_precedence returns Lowest for every other kind, so
            // the climb loop never dispatches them here.
            _ => unreachable!(),
        }
    }
}

fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(input: &str) -> String {
        parse(input).unwrap().to_string()
    }

    #[test]
    fn precedence_table() {
        assert_eq!(printed("1+2"), "(1 + 2)");
        assert_eq!(printed("a + 4"), "(a + 4)");
        assert_eq!(printed("-a + b"), "((-a) + b)");
        assert_eq!(printed("-a = b"), "((-a) = b)");
        assert_eq!(printed("-a = -b"), "((-a) = (-b))");
    }

    #[test]
    fn sums_and_products_are_left_associative() {
        assert_eq!(printed("1 - 2 - 3"), "((1 - 2) - 3)");
        assert_eq!(printed("8 / 4 / 2"), "((8 / 4) / 2)");
        assert_eq!(printed("1 + 2 * 3"), "(1 + (2 * 3))");
    }

    #[test]
    fn exponent_is_right_associative() {
        assert_eq!(printed("2 ^ 3 ^ 4"), "(2 ^ (3 ^ 4))");
        assert_eq!(printed("2 ^ 3 * 4"), "((2 ^ 3) * 4)");
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse("4x").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                left: Box::new(Expr::Number("4".into())),
                op: BinaryOp::Mul,
                right: Box::new(Expr::Var("x".into())),
            }
        );
        assert_eq!(printed("2 sin(x)"), "(2 * sin(x))");
        assert_eq!(printed("4x + 1"), "((4 * x) + 1)");
    }

    #[test]
    fn calls() {
        assert_eq!(printed("sin(x)"), "sin(x)");
        assert_eq!(printed("atan(y, x)"), "atan(y, x)");
        assert_eq!(printed("f()"), "f()");
    }

    #[test]
    fn parenthesized_grouping() {
        assert_eq!(printed("(1 + 2) * 3"), "((1 + 2) * 3)");
    }

    #[test]
    fn round_trip_is_a_fixed_point() {
        let inputs = [
            "y = x*sin(x)^2",
            "1+2",
            "-a + b",
            "-a = -b",
            "4x",
            "2 sin(x)",
            "y = (x + 1) / (x - 1)",
            "atan(y, x)",
        ];
        for input in inputs {
            let once = parse(input).unwrap().to_string();
            let twice = parse(&once).unwrap().to_string();
            assert_eq!(once, twice, "not a normal form for {:?}", input);
        }
    }

    #[test]
    fn unbalanced_parenthesis() {
        assert_eq!(
            parse("(1 + 2"),
            Err(ParseError::Unexpected {
                expected: TokenKind::RightParen,
                found: TokenKind::Eof,
            })
        );
    }

    #[test]
    fn call_target_must_be_a_name() {
        assert_eq!(parse("2(x + 1)"), Err(ParseError::InvalidCallTarget));
    }

    #[test]
    fn trailing_input_is_rejected() {
        assert_eq!(
            parse("1 + 2)"),
            Err(ParseError::Trailing {
                found: TokenKind::RightParen,
            })
        );
    }

    #[test]
    fn lex_errors_propagate() {
        assert!(matches!(parse("x @ 1"), Err(ParseError::Lex(_))));
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let mut input = String::new();
        for _ in 0..100 {
            input.push('(');
        }
        input.push('1');
        for _ in 0..100 {
            input.push(')');
        }
        assert_eq!(parse(&input), Err(ParseError::TooDeep));
    }
}
