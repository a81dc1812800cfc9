//! keycalc: a calculator engine fed one key press at a time.
//!
//! ```
//! use keycalc::calculator::{Engine, parse_keys};
//!
//! let mut engine = Engine::new();
//! for input in parse_keys("2+3*4=").unwrap() {
//!     engine.apply(input);
//! }
//! assert_eq!(engine.display_value(), "14");
//! ```

pub mod calculator;
pub mod config;

pub use calculator::{Engine, ErrorKind, Input, Operator, Paren, Snapshot};
pub use config::EngineConfig;
