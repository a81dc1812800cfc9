//! Error kinds that halt the calculator engine.

use serde::Serialize;
use thiserror::Error;

/// Why the engine entered its error state.
///
/// Every kind is recoverable with a clear. The display shows "Error" for all
/// of them; the kind is only surfaced through [`crate::calculator::Engine::error`],
/// snapshots and log output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The literal being typed could not be turned into a number.
    #[error("invalid number")]
    InvalidNumber,
    /// A reduction had fewer than two operands, or stacks were left over.
    #[error("syntax error")]
    SyntaxError,
    /// A close without a matching open, or opens left unclosed at equals.
    #[error("mismatched parenthesis")]
    MismatchedParen,
    /// A group closed with nothing inside it.
    #[error("empty parentheses")]
    EmptyParen,
    #[error("division by zero")]
    DivisionByZero,
    /// An arithmetic result that cannot be represented.
    #[error("math error")]
    MathError,
    /// The stacks reached a configuration the engine never builds.
    #[error("internal error")]
    InternalError,
}
