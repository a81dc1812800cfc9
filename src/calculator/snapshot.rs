//! A point-in-time copy of everything a display needs from the engine.

use super::error::ErrorKind;
use serde::Serialize;

/// What a presentation layer shows after an input event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Main display text ("Error" while halted).
    pub display: String,
    /// The expression typed so far, for a secondary display.
    pub expression: String,
    /// Whether a literal is being typed.
    pub entering_digits: bool,
    /// Groups opened and not yet closed.
    pub paren_depth: usize,
    /// Why the engine halted, if it did.
    pub error: Option<ErrorKind>,
}

impl Snapshot {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// A one-line summary: the expression above the display, when there is one.
    pub fn summary(&self) -> String {
        if self.expression.is_empty() || self.expression == self.display {
            self.display.clone()
        } else {
            format!("{}  [{}]", self.display, self.expression)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(display: &str, expression: &str, error: Option<ErrorKind>) -> Snapshot {
        Snapshot {
            display: display.to_string(),
            expression: expression.to_string(),
            entering_digits: false,
            paren_depth: 0,
            error,
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(snapshot("14", "2 + 3 × 4 =", None).summary(), "14  [2 + 3 × 4 =]");
        assert_eq!(snapshot("7", "7", None).summary(), "7");
        assert_eq!(snapshot("0", "", None).summary(), "0");
    }

    #[test]
    fn test_json_shape() {
        let halted = snapshot("Error", "", Some(ErrorKind::EmptyParen));
        let json = serde_json::to_value(halted).unwrap();
        assert_eq!(json["display"], "Error");
        assert_eq!(json["error"], "empty_paren");
        assert_eq!(json["paren_depth"], 0);
    }
}
