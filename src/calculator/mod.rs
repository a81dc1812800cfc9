//! Calculator engine driven by key press events.
//!
//! This module provides:
//! - The [`Engine`]: number entry, precedence-aware stack evaluation and the
//!   error state machine
//! - Decimal arithmetic with fixed-scale rounding for division and percent
//! - Keystroke scripts that map text to input events

mod engine;
mod error;
mod evaluation;
mod expression;
pub mod keys;
mod literal;
mod snapshot;
mod token;

pub use engine::{ERROR_DISPLAY, Engine, Mode};
pub use error::ErrorKind;
pub use evaluation::format_decimal;
pub use keys::{KeyError, parse_keys};
pub use snapshot::Snapshot;
pub use token::{Input, Operator, Paren, Token};
