//! Validates parsed equations against the supported subset.
//!
//! The parser deliberately accepts more than the plotter can render;
//! everything outside `y = f(x)` over the supported operators and
//! builtin functions is rejected here, before any code generation.

use crate::syntax::Expr;

/// Builtin functions a call may refer to, with the number of arguments
/// each accepts (minimum and maximum). Call names are spliced verbatim
/// into shader source, so anything absent from this table is rejected.
const FUNCTIONS: &[(&str, usize, usize)] = &[
    ("sin", 1, 1),
    ("cos", 1, 1),
    ("tan", 1, 1),
    ("asin", 1, 1),
    ("acos", 1, 1),
    ("atan", 1, 2),
    ("sinh", 1, 1),
    ("cosh", 1, 1),
    ("tanh", 1, 1),
    ("exp", 1, 1),
    ("exp2", 1, 1),
    ("log", 1, 1),
    ("log2", 1, 1),
    ("sqrt", 1, 1),
    ("abs", 1, 1),
    ("sign", 1, 1),
    ("floor", 1, 1),
    ("ceil", 1, 1),
    ("fract", 1, 1),
    ("pow", 2, 2),
    ("min", 2, 2),
    ("max", 2, 2),
    ("mod", 2, 2),
];

fn signature(name: &str) -> Option<(usize, usize)> {
    FUNCTIONS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|&(_, min, max)| (min, max))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidateError {
    #[error("an equation must have the form `y = ...`")]
    NotAnEquation,

    #[error("the left-hand side must be the bare name `y`, found `{found}`")]
    BoundName { found: String },

    #[error("`=` may only appear once, at the top of the equation")]
    NestedAssignment,

    #[error("unknown variable `{name}` (only `x` has a value)")]
    FreeVariable { name: String },

    #[error("malformed number literal `{text}`")]
    MalformedNumber { text: String },

    #[error("a unary sign may only be applied to a number or a variable")]
    PrefixOperand,

    #[error("unknown function `{name}`")]
    UnknownFunction { name: String },

    #[error("`{name}` expects {expected} argument(s), found {found}")]
    WrongArity {
        name: String,
        expected: String,
        found: usize,
    },
}

/// Checks that `expr` is a supported equation. On failure the caller
/// must not generate code from the tree.
pub fn validate(expr: &Expr) -> Result<(), ValidateError> {
    let Expr::Assign { target, value } = expr else {
        return Err(ValidateError::NotAnEquation);
    };
    match target.as_ref() {
        Expr::Var(name) if name == "y" => {}
        other => {
            return Err(ValidateError::BoundName {
                found: other.to_string(),
            })
        }
    }
    check_value(value)
}

fn check_value(expr: &Expr) -> Result<(), ValidateError> {
    match expr {
        Expr::Var(name) if name == "x" => Ok(()),
        Expr::Var(name) => Err(ValidateError::FreeVariable { name: name.clone() }),

        Expr::Number(text) => {
            if text.matches('.').count() <= 1 {
                Ok(())
            } else {
                Err(ValidateError::MalformedNumber { text: text.clone() })
            }
        }

        // Unary sign is restricted to a simple operand; nothing
        // compound may appear under it.
        Expr::Prefix { operand, .. } => match operand.as_ref() {
            Expr::Number(_) | Expr::Var(_) => check_value(operand),
            _ => Err(ValidateError::PrefixOperand),
        },

        Expr::Binary { left, right, .. } => {
            check_value(left)?;
            check_value(right)
        }

        Expr::Assign { .. } => Err(ValidateError::NestedAssignment),

        Expr::Call { name, args } => {
            let (min, max) = signature(name)
                .ok_or_else(|| ValidateError::UnknownFunction { name: name.clone() })?;
            if args.len() < min || args.len() > max {
                let expected = if min == max {
                    min.to_string()
                } else {
                    format!("{} or {}", min, max)
                };
                return Err(ValidateError::WrongArity {
                    name: name.clone(),
                    expected,
                    found: args.len(),
                });
            }
            for arg in args {
                check_value(arg)?;
            }
            Ok(())
        }
    }
}
