//! Expression tree built by the parser.

use std::fmt;

/// Unary sign operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

/// Immutable expression tree. Built once per compile attempt, walked by
/// the validator and the code generator, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare identifier used as a value.
    Var(String),
    /// A numeric literal, kept as its source text verbatim.
    Number(String),
    /// Unary sign applied to an operand.
    Prefix { op: UnaryOp, operand: Box<Expr> },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// `target = value`. The parser accepts any expression as the
    /// target; the validator narrows it to the bare name `y`.
    Assign { target: Box<Expr>, value: Box<Expr> },
    /// Named function application.
    Call { name: String, args: Vec<Expr> },
}

/// Canonical fully-parenthesized form. Re-parsing the printed text
/// yields a tree that prints identically, so this doubles as the
/// normal form used by the round-trip tests.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => f.write_str(name),
            Expr::Number(text) => f.write_str(text),
            Expr::Prefix { op, operand } => write!(f, "({}{})", op.symbol(), operand),
            Expr::Binary { left, op, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Assign { target, value } => write!(f, "({} = {})", target, value),
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_is_fully_parenthesized() {
        let expr = Expr::Binary {
            left: Box::new(Expr::Number("1".into())),
            op: BinaryOp::Add,
            right: Box::new(Expr::Binary {
                left: Box::new(Expr::Var("x".into())),
                op: BinaryOp::Mul,
                right: Box::new(Expr::Number("2".into())),
            }),
        };
        assert_eq!(expr.to_string(), "(1 + (x * 2))");
    }

    #[test]
    fn print_call() {
        let expr = Expr::Call {
            name: "atan".into(),
            args: vec![Expr::Var("y".into()), Expr::Var("x".into())],
        };
        assert_eq!(expr.to_string(), "atan(y, x)");
    }
}
