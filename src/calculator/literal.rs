//! The number currently being typed.
//!
//! A literal is kept as its digit sequences rather than as a parsed number so
//! that a pending decimal point ("12.") and typed trailing zeros ("1.50")
//! survive until the operand is committed.

use super::error::ErrorKind;
use bigdecimal::BigDecimal;
use std::fmt;
use std::str::FromStr;

/// An operand under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    /// Integer digits, never empty.
    integer: String,
    /// Fraction digits once a point was accepted. `Some("")` is a pending point.
    fraction: Option<String>,
}

impl Literal {
    /// The zero literal, "0".
    pub fn zero() -> Self {
        Self {
            integer: "0".to_string(),
            fraction: None,
        }
    }

    /// A literal begun with the decimal point key, "0.".
    pub fn point() -> Self {
        Self {
            integer: "0".to_string(),
            fraction: Some(String::new()),
        }
    }

    /// Number of digits typed, ignoring the point.
    pub fn digit_count(&self) -> usize {
        self.integer.len() + self.fraction.as_ref().map_or(0, String::len)
    }

    /// Whether a point was accepted with no digit after it yet.
    pub fn is_pending_point(&self) -> bool {
        self.fraction.as_ref().is_some_and(String::is_empty)
    }

    pub fn has_point(&self) -> bool {
        self.fraction.is_some()
    }

    /// Append a digit. Returns `false` when the digit was dropped.
    ///
    /// A lone integer zero is replaced rather than extended.
    pub fn push_digit(&mut self, digit: char, max_digits: usize) -> bool {
        debug_assert!(digit.is_ascii_digit());

        if self.fraction.is_none() && self.integer == "0" {
            self.integer = digit.to_string();
            return true;
        }

        if self.digit_count() >= max_digits {
            return false;
        }

        match self.fraction.as_mut() {
            Some(fraction) => fraction.push(digit),
            None => self.integer.push(digit),
        }
        true
    }

    /// Arm the decimal point. Returns `false` for a second point or a full literal.
    pub fn push_point(&mut self, max_digits: usize) -> bool {
        if self.has_point() || self.digit_count() >= max_digits {
            return false;
        }
        self.fraction = Some(String::new());
        true
    }

    /// Remove one step of input: a pending point, else the last digit.
    ///
    /// Removing the only fraction digit leaves the point pending; removing the
    /// only integer digit leaves "0".
    pub fn backspace(&mut self) {
        match self.fraction.as_mut() {
            Some(fraction) if fraction.is_empty() => self.fraction = None,
            Some(fraction) => {
                fraction.pop();
            }
            None => {
                self.integer.pop();
                if self.integer.is_empty() {
                    self.integer.push('0');
                }
            }
        }
    }

    /// The numeric value of the literal. A pending point contributes nothing.
    pub fn value(&self) -> Result<BigDecimal, ErrorKind> {
        let text = match self.fraction.as_deref() {
            Some(fraction) if !fraction.is_empty() => format!("{}.{}", self.integer, fraction),
            _ => self.integer.clone(),
        };
        BigDecimal::from_str(&text).map_err(|_| ErrorKind::InvalidNumber)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.integer)?;
        if let Some(fraction) = &self.fraction {
            write!(f, ".{}", fraction)?;
        }
        Ok(())
    }
}
