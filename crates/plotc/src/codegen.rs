//! GLSL expression generation.
//!
//! Translates a validated equation tree into a scalar GLSL expression
//! in implicit form: `y = f(x)` becomes `(y) - (f(x))`, whose zero set
//! is the plotted curve and whose sign tells which side of the curve a
//! point lies on. The output must stay a pure, continuous scalar
//! function of `x` and `y`; the renderer differentiates it with
//! screen-space finite differences.

use crate::syntax::ast::{BinaryOp, Expr};

/// Emits the GLSL expression for a validated equation tree.
pub fn emit(expr: &Expr) -> String {
    match expr {
        Expr::Assign { target, value } => {
            format!("({}) - {}", emit(target), grouped(value))
        }

        Expr::Var(name) => name.clone(),

        // GLSL floats need a fractional part to avoid integer typing.
        Expr::Number(text) => {
            if text.contains('.') {
                text.clone()
            } else {
                format!("{}.0", text)
            }
        }

        Expr::Prefix { op, operand } => format!("({}{})", op.symbol(), emit(operand)),

        // GLSL has no infix exponentiation; lower `^` to pow().
        Expr::Binary {
            left,
            op: BinaryOp::Pow,
            right,
        } => format!("pow({}, {})", emit(left), emit(right)),

        Expr::Binary { left, op, right } => {
            format!("({} {} {})", emit(left), op.symbol(), emit(right))
        }

        Expr::Call { name, args } => {
            let args = args.iter().map(emit).collect::<Vec<_>>().join(", ");
            format!("{}({})", name, args)
        }
    }
}

/// Emits `expr` as a single parenthesized group, reusing the outermost
/// parentheses the node emits itself rather than stacking a second pair.
fn grouped(expr: &Expr) -> String {
    let already_grouped = matches!(
        expr,
        Expr::Prefix { .. }
            | Expr::Binary {
                op: BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div,
                ..
            }
    );
    if already_grouped {
        emit(expr)
    } else {
        format!("({})", emit(expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn emitted(input: &str) -> String {
        emit(&parse(input).unwrap())
    }

    #[test]
    fn implicit_form() {
        assert_eq!(emitted("y = x^2"), "(y) - (pow(x, 2.0))");
        assert_eq!(emitted("y = x"), "(y) - (x)");
        assert_eq!(emitted("y = -x"), "(y) - (-x)");
    }

    #[test]
    fn literal_normalization() {
        assert_eq!(emitted("2"), "2.0");
        assert_eq!(emitted("2.5"), "2.5");
    }

    #[test]
    fn operators_are_parenthesized() {
        assert_eq!(emitted("x + 1 * x"), "(x + (1.0 * x))");
        assert_eq!(emitted("-x"), "(-x)");
        assert_eq!(emitted("x / 2"), "(x / 2.0)");
    }

    #[test]
    fn calls_pass_through() {
        assert_eq!(emitted("atan(y, x)"), "atan(y, x)");
    }

    #[test]
    fn end_to_end_expression() {
        assert_eq!(
            emitted("y = x*sin(x)^2"),
            "(y) - (x * pow(sin(x), 2.0))"
        );
    }
}
