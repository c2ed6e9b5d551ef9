//! Compiles plotter equations into implicit-curve fragment shaders.
//!
//! An equation like `y = x*sin(x)^2` goes through a four-stage
//! pipeline: lexer, precedence-climbing parser, validator, and GLSL
//! code generator; the resulting scalar expression is spliced into a
//! fixed fragment-shader template. Each stage either succeeds
//! completely or fails with a diagnostic, and a failed attempt never
//! disturbs the previously compiled shader (see [`host::ShaderSlot`]).

pub mod codegen;
pub mod host;
pub mod shader;
pub mod syntax;
pub mod validate;

pub use crate::{
    host::{RecompileError, ShaderHost, ShaderSlot},
    syntax::ParseError,
    validate::ValidateError,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validate(#[from] ValidateError),
}

/// Compiles an equation string into complete fragment-shader source.
pub fn compile(equation: &str) -> Result<String, CompileError> {
    let span = tracing::trace_span!("compile");
    let _entered = span.enter();

    let expr = syntax::parse(equation)?;
    validate::validate(&expr)?;

    let body = codegen::emit(&expr);
    tracing::trace!("plot expression: {}", body);

    Ok(shader::assemble(&body))
}
