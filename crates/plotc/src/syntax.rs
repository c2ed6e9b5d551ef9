//! Equation syntax support: tokens, expression trees, parsing.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use self::{ast::Expr, parser::ParseError};

/// Parses an equation string into an expression tree.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let span = tracing::trace_span!("parse");
    let _entered = span.enter();

    let expr = parser::parse(source)?;
    tracing::trace!(" --> {}", expr);
    Ok(expr)
}
