//! Keystroke scripts.
//!
//! Maps text such as `"(2+3)*4="` to the key presses it spells, one
//! [`Input`] per key. Nothing is evaluated here; every key is delivered to
//! the engine as its own event, in order.
//!
//! Keys: digits, `.`, `+`, `-`, `*` `x` `×`, `/` `÷`, `(`, `)`, `%`, `=`,
//! `AC` or `C` for clear, `DEL` or `<` for backspace. Whitespace is skipped.

use super::token::{Input, Operator, Paren};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Matches one key at the start of the input.
    static ref KEY: Regex = Regex::new(
        r"^(?i:AC|DEL|C)|^[0-9.+\-*/xX×÷()%=<]"
    ).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key {key:?} at offset {offset}")]
    UnknownKey { key: char, offset: usize },
}

/// Translate a keystroke script into input events.
pub fn parse_keys(script: &str) -> Result<Vec<Input>, KeyError> {
    let mut inputs = Vec::new();
    let mut offset = 0;

    while let Some(c) = script[offset..].chars().next() {
        if c.is_whitespace() {
            offset += c.len_utf8();
            continue;
        }

        let key = KEY
            .find(&script[offset..])
            .and_then(|m| key_input(m.as_str()).map(|input| (input, m.end())));

        match key {
            Some((input, len)) => {
                inputs.push(input);
                offset += len;
            }
            None => return Err(KeyError::UnknownKey { key: c, offset }),
        }
    }

    Ok(inputs)
}

fn key_input(key: &str) -> Option<Input> {
    let input = match key.to_ascii_uppercase().as_str() {
        "AC" | "C" => Input::Clear,
        "DEL" | "<" => Input::Backspace,
        "." => Input::DecimalPoint,
        "+" => Input::Operator(Operator::Add),
        "-" => Input::Operator(Operator::Sub),
        "*" | "X" | "×" => Input::Operator(Operator::Mul),
        "/" | "÷" => Input::Operator(Operator::Div),
        "(" => Input::Paren(Paren::Open),
        ")" => Input::Paren(Paren::Close),
        "%" => Input::Percent,
        "=" => Input::Equals,
        other => {
            let digit = other.chars().next().filter(char::is_ascii_digit)?;
            Input::Digit(digit)
        }
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_and_operators() {
        let inputs = parse_keys("12+3").unwrap();
        assert_eq!(
            inputs,
            vec![
                Input::Digit('1'),
                Input::Digit('2'),
                Input::Operator(Operator::Add),
                Input::Digit('3'),
            ]
        );
    }

    #[test]
    fn test_operator_aliases() {
        let mul = Input::Operator(Operator::Mul);
        let div = Input::Operator(Operator::Div);
        assert_eq!(parse_keys("*x×X").unwrap(), vec![mul; 4]);
        assert_eq!(parse_keys("/÷").unwrap(), vec![div; 2]);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            parse_keys("AC c DEL del <").unwrap(),
            vec![
                Input::Clear,
                Input::Clear,
                Input::Backspace,
                Input::Backspace,
                Input::Backspace,
            ]
        );
    }

    #[test]
    fn test_whitespace_skipped() {
        assert_eq!(parse_keys(" ( 5 ) ").unwrap().len(), 3);
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_keys("   ").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_keys("2+y").unwrap_err(),
            KeyError::UnknownKey { key: 'y', offset: 2 }
        );
        assert_eq!(
            parse_keys("5 sin").unwrap_err(),
            KeyError::UnknownKey { key: 's', offset: 2 }
        );
    }

    #[test]
    fn test_percent_and_equals() {
        assert_eq!(
            parse_keys("50%=").unwrap(),
            vec![
                Input::Digit('5'),
                Input::Digit('0'),
                Input::Percent,
                Input::Equals,
            ]
        );
    }
}
