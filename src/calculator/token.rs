//! Operators, stack tokens and the input events that drive the engine.

use bigdecimal::BigDecimal;
use std::fmt;

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Binding strength. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    /// The symbol shown on a calculator key.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "×",
            Self::Div => "÷",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Which parenthesis key was pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

/// An entry of the evaluation stacks.
///
/// Values live on their own stack; the operator stack only ever holds
/// `Operator` and `OpenParen`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Value(BigDecimal),
    Operator(Operator),
    OpenParen,
}

impl Token {
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    pub fn is_open_paren(&self) -> bool {
        matches!(self, Self::OpenParen)
    }
}

/// One discrete input event, as produced by a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Digit(char),
    DecimalPoint,
    Operator(Operator),
    Paren(Paren),
    Percent,
    Backspace,
    Clear,
    Equals,
}
