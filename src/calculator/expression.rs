//! Secondary display: the expression entered so far.
//!
//! The engine evaluates incrementally, so the stacks cannot reproduce what
//! was typed. Instead the engine records each committed segment here as the
//! events arrive.

use super::evaluation::format_decimal;
use super::token::Operator;
use bigdecimal::BigDecimal;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Number(BigDecimal),
    Operator(Operator),
    Open,
    Close,
    Percent,
}

/// The trail of segments behind the current input.
#[derive(Clone, Debug, Default)]
pub struct Expression {
    segments: Vec<Segment>,
    /// Set by equals; the trail is kept for display until the next input.
    finished: bool,
}

impl Expression {
    pub fn clear(&mut self) {
        self.segments.clear();
        self.finished = false;
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn push_number(&mut self, value: BigDecimal) {
        self.segments.push(Segment::Number(value));
    }

    pub fn push_operator(&mut self, op: Operator) {
        self.segments.push(Segment::Operator(op));
    }

    /// Rewrite the trailing operator, as when "+" is followed by "×".
    pub fn replace_operator(&mut self, op: Operator) {
        match self.segments.last_mut() {
            Some(Segment::Operator(last)) => *last = op,
            _ => self.segments.push(Segment::Operator(op)),
        }
    }

    pub fn push_open(&mut self) {
        self.segments.push(Segment::Open);
    }

    pub fn push_close(&mut self) {
        self.segments.push(Segment::Close);
    }

    pub fn push_percent(&mut self) {
        self.segments.push(Segment::Percent);
    }

    /// Remove the trailing operand: a number or a whole group, together with
    /// any percent signs applied to it.
    pub fn drop_operand(&mut self) {
        while matches!(self.segments.last(), Some(Segment::Percent)) {
            self.segments.pop();
        }

        match self.segments.pop() {
            Some(Segment::Close) => {
                let mut depth = 1;
                while let Some(segment) = self.segments.pop() {
                    match segment {
                        Segment::Close => depth += 1,
                        Segment::Open if depth == 1 => break,
                        Segment::Open => depth -= 1,
                        _ => {}
                    }
                }
            }
            Some(Segment::Number(_)) | None => {}
            Some(other) => self.segments.push(other),
        }
    }

    /// Render the trail, followed by the literal being typed if any.
    ///
    /// Segments are separated by one space, except after "(" and after a
    /// unary operator, and before ")" and "%".
    pub fn render(&self, live: Option<&str>) -> String {
        let mut out = String::new();
        let mut glue = true;
        let mut previous: Option<&Segment> = None;

        for segment in &self.segments {
            if !glue && !matches!(segment, Segment::Close | Segment::Percent) {
                out.push(' ');
            }

            match segment {
                Segment::Number(value) => out.push_str(&format_decimal(value)),
                Segment::Operator(op) => out.push_str(op.symbol()),
                Segment::Open => out.push('('),
                Segment::Close => out.push(')'),
                Segment::Percent => out.push('%'),
            }

            glue = match segment {
                Segment::Open => true,
                Segment::Operator(_) => matches!(previous, None | Some(Segment::Open)),
                _ => false,
            };
            previous = Some(segment);
        }

        if let Some(live) = live {
            if !glue {
                out.push(' ');
            }
            out.push_str(live);
        }

        if self.finished {
            out.push_str(" =");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_spacing() {
        let mut expr = Expression::default();
        expr.push_number(BigDecimal::from(2));
        expr.push_operator(Operator::Add);
        expr.push_number(BigDecimal::from(3));
        expr.push_operator(Operator::Mul);
        assert_eq!(expr.render(Some("4")), "2 + 3 × 4");
    }

    #[test]
    fn test_parens_and_unary() {
        let mut expr = Expression::default();
        expr.push_open();
        expr.push_operator(Operator::Sub);
        expr.push_number(BigDecimal::from(5));
        expr.push_close();
        expr.push_operator(Operator::Mul);
        assert_eq!(expr.render(Some("2")), "(-5) × 2");
    }

    #[test]
    fn test_replace_operator() {
        let mut expr = Expression::default();
        expr.push_number(BigDecimal::from(5));
        expr.push_operator(Operator::Add);
        expr.replace_operator(Operator::Mul);
        assert_eq!(expr.render(None), "5 ×");
    }

    #[test]
    fn test_drop_operand() {
        let mut expr = Expression::default();
        expr.push_number(BigDecimal::from(5));
        expr.push_operator(Operator::Sub);
        expr.push_open();
        expr.push_open();
        expr.push_number(BigDecimal::from(2));
        expr.push_close();
        expr.push_close();
        expr.push_percent();
        expr.drop_operand();
        assert_eq!(expr.render(Some("3")), "5 - 3");

        expr.push_number(BigDecimal::from(3));
        expr.drop_operand();
        assert_eq!(expr.render(None), "5 -");

        expr.drop_operand();
        assert_eq!(expr.render(None), "5 -");
    }

    #[test]
    fn test_percent_and_finish() {
        let mut expr = Expression::default();
        expr.push_number(BigDecimal::from(50));
        expr.push_percent();
        expr.finish();
        assert_eq!(expr.render(None), "50% =");
        assert!(expr.is_finished());

        expr.clear();
        assert!(expr.is_empty());
        assert_eq!(expr.render(None), "");
    }
}
