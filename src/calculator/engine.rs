//! The event-driven calculator engine.
//!
//! Input arrives one key at a time. Operands are pushed to a value stack and
//! operators to an operator stack; whenever an operator arrives, everything
//! on the operator stack that binds at least as tightly is reduced first, so
//! precedence holds without ever parsing a finished expression. Parentheses
//! sit on the operator stack as barriers.

use super::error::ErrorKind;
use super::evaluation::{self, format_decimal};
use super::expression::Expression;
use super::literal::Literal;
use super::snapshot::Snapshot;
use super::token::{Input, Operator, Paren, Token};
use crate::config::EngineConfig;
use bigdecimal::{BigDecimal, Zero};
use tracing::{debug, trace, warn};

/// Display text while the engine is halted.
pub const ERROR_DISPLAY: &str = "Error";

/// Coarse state of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Showing a committed value or result.
    Idle,
    /// A literal is being typed.
    EnteringDigits,
    /// Halted until cleared.
    Error(ErrorKind),
}

/// Calculator engine.
///
/// Mutating calls never fail; afterwards [`Engine::display_value`] reflects
/// the outcome, including the error state.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    /// Value shown when no literal is being typed.
    current: BigDecimal,
    /// The operand being typed; `Some` exactly while entering digits.
    literal: Option<Literal>,
    values: Vec<BigDecimal>,
    /// Only `Token::Operator` and `Token::OpenParen`.
    operators: Vec<Token>,
    paren_depth: usize,
    error: Option<ErrorKind>,
    expression: Expression,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            current: BigDecimal::zero(),
            literal: None,
            values: Vec::new(),
            operators: Vec::new(),
            paren_depth: 0,
            error: None,
            expression: Expression::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dispatch one input event and return the new display text.
    pub fn apply(&mut self, input: Input) -> String {
        match input {
            Input::Digit(digit) => self.input_digit(digit),
            Input::DecimalPoint => self.input_decimal_point(),
            Input::Operator(op) => self.input_operator(op),
            Input::Paren(paren) => self.input_paren(paren),
            Input::Percent => self.percent(),
            Input::Backspace => self.backspace(),
            Input::Clear => self.clear(),
            Input::Equals => self.equals(),
        }
        self.display_value()
    }

    /// Reset to the initial state: "0", no pending input, no error.
    pub fn clear(&mut self) {
        self.reset();
        debug!("engine cleared");
    }

    /// Type a digit `'0'..='9'`. Any other character is ignored.
    ///
    /// Recovers from the error state by clearing first.
    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            warn!(?digit, "ignoring non-digit input");
            return;
        }
        self.recover();

        let outcome = self.push_digit(digit);
        self.settle(outcome);
    }

    /// Type the decimal point. Recovers from the error state by clearing first.
    pub fn input_decimal_point(&mut self) {
        self.recover();

        let outcome = self.push_point();
        self.settle(outcome);
    }

    pub fn input_operator(&mut self, op: Operator) {
        if self.ignored("operator") {
            return;
        }

        let outcome = self.push_operator(op);
        self.settle(outcome);
    }

    pub fn input_paren(&mut self, paren: Paren) {
        match paren {
            Paren::Open => self.open_paren(),
            Paren::Close => self.close_paren(),
        }
    }

    /// Open a group. Directly after a number or a closed group this
    /// multiplies: "5(" means "5 × (".
    pub fn open_paren(&mut self) {
        if self.ignored("open paren") {
            return;
        }

        let outcome = self.push_open_paren();
        self.settle(outcome);
    }

    pub fn close_paren(&mut self) {
        if self.ignored("close paren") {
            return;
        }

        let outcome = self.push_close_paren();
        self.settle(outcome);
    }

    /// Evaluate everything entered so far.
    pub fn equals(&mut self) {
        if self.ignored("equals") {
            return;
        }

        let outcome = self.evaluate();
        self.settle(outcome);
    }

    /// Divide the immediate operand by one hundred.
    pub fn percent(&mut self) {
        if self.ignored("percent") {
            return;
        }

        let outcome = self.apply_percent();
        self.settle(outcome);
    }

    /// Delete the last typed character of the literal being entered.
    ///
    /// Committed operands and operators cannot be edited.
    pub fn backspace(&mut self) {
        if self.ignored("backspace") {
            return;
        }

        match self.literal.as_mut() {
            Some(literal) => {
                literal.backspace();
                debug!(%literal, "backspace");
            }
            None => trace!("backspace ignored outside digit entry"),
        }
    }

    /// Text for the main display.
    pub fn display_value(&self) -> String {
        if self.error.is_some() {
            return ERROR_DISPLAY.to_string();
        }

        match &self.literal {
            Some(literal) => literal.to_string(),
            None => format_decimal(&self.current),
        }
    }

    /// Text for the secondary display: the expression typed so far.
    pub fn expression(&self) -> String {
        if self.error.is_some() {
            return String::new();
        }

        let live = self.literal.as_ref().map(Literal::to_string);
        self.expression.render(live.as_deref())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display_value(),
            expression: self.expression(),
            entering_digits: self.is_entering_digits(),
            paren_depth: self.paren_depth,
            error: self.error,
        }
    }

    pub fn state(&self) -> Mode {
        match (self.error, &self.literal) {
            (Some(kind), _) => Mode::Error(kind),
            (None, Some(_)) => Mode::EnteringDigits,
            (None, None) => Mode::Idle,
        }
    }

    pub fn is_entering_digits(&self) -> bool {
        self.literal.is_some()
    }

    /// Whether a decimal point was typed with no digit after it yet.
    pub fn is_pending_decimal(&self) -> bool {
        self.literal.as_ref().is_some_and(Literal::is_pending_point)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Number of groups opened and not yet closed.
    pub fn paren_depth(&self) -> usize {
        self.paren_depth
    }

    fn reset(&mut self) {
        self.current = BigDecimal::zero();
        self.literal = None;
        self.values.clear();
        self.operators.clear();
        self.paren_depth = 0;
        self.error = None;
        self.expression.clear();
    }

    fn recover(&mut self) {
        if let Some(kind) = self.error {
            debug!(error = %kind, "recovering from error state");
            self.clear();
        }
    }

    fn ignored(&self, event: &str) -> bool {
        if self.error.is_some() {
            trace!(event, "ignored in error state");
            return true;
        }
        false
    }

    fn settle(&mut self, outcome: Result<(), ErrorKind>) {
        if let Err(kind) = outcome {
            self.fail(kind);
        }
    }

    fn fail(&mut self, kind: ErrorKind) {
        warn!(error = %kind, "calculator entered error state");
        self.reset();
        self.error = Some(kind);
    }

    /// Drop a finished expression from the preview once new input arrives.
    fn continue_expression(&mut self) {
        if self.expression.is_finished() {
            self.expression.clear();
        }
    }

    fn operator_count(&self) -> usize {
        self.operators.iter().filter(|token| token.is_operator()).count()
    }

    /// Every operator on the stack still lacks its right operand only when
    /// the value stack is not one ahead.
    fn awaiting_operand(&self) -> bool {
        self.values.len() <= self.operator_count()
    }

    /// A complete operand (closed group, percent result) sits on the value
    /// stack with no operator after it.
    fn operand_committed(&self) -> bool {
        self.literal.is_none() && !self.values.is_empty() && !self.awaiting_operand()
    }

    /// Begin typing a new operand. It supersedes a closed group or percent
    /// result that no operator follows yet.
    fn start_literal(&mut self, literal: Literal) {
        self.continue_expression();
        if self.operand_committed() {
            if let Some(stale) = self.values.pop() {
                debug!(%stale, "committed operand replaced by new literal");
            }
            self.expression.drop_operand();
        } else if self.values.is_empty() && self.operators.is_empty() {
            self.expression.clear();
        }
        self.literal = Some(literal);
    }

    fn push_digit(&mut self, digit: char) -> Result<(), ErrorKind> {
        if self.literal.is_none() {
            self.start_literal(Literal::zero());
        }

        let max_digits = self.config.max_digits;
        let Some(literal) = self.literal.as_mut() else {
            return Err(ErrorKind::InternalError);
        };
        if !literal.push_digit(digit, max_digits) {
            debug!(max_digits, "digit dropped, literal is full");
            return Ok(());
        }

        literal.value()?;
        Ok(())
    }

    fn push_point(&mut self) -> Result<(), ErrorKind> {
        if self.literal.is_none() {
            self.start_literal(Literal::point());
            return Ok(());
        }

        let max_digits = self.config.max_digits;
        if let Some(literal) = self.literal.as_mut()
            && !literal.push_point(max_digits)
        {
            trace!(%literal, "decimal point ignored");
        }
        Ok(())
    }

    /// Move the literal onto the value stack.
    fn commit_literal(&mut self) -> Result<(), ErrorKind> {
        let Some(literal) = self.literal.take() else {
            return Ok(());
        };

        let value = literal.value()?;
        debug!(%value, "operand committed");
        self.values.push(value.clone());
        self.current = value.clone();
        self.expression.push_number(value);
        Ok(())
    }

    fn push_operator(&mut self, op: Operator) -> Result<(), ErrorKind> {
        self.continue_expression();

        if self.literal.is_none()
            && self.awaiting_operand()
            && let Some(Token::Operator(top)) = self.operators.last_mut()
        {
            debug!(from = %top, to = %op, "operator replaced");
            *top = op;
            self.expression.replace_operator(op);
            return Ok(());
        }

        if self.literal.is_some() {
            self.commit_literal()?;
        } else if self.awaiting_operand() {
            // Unary use: "-5" and "(-5" get an implicit left operand. With empty
            // stacks this is the held result, so "= + 3" chains from it.
            let implicit = if self.operators.is_empty() {
                self.current.clone()
            } else {
                BigDecimal::zero()
            };
            if self.operators.is_empty() && self.expression.is_empty() && !implicit.is_zero() {
                self.expression.push_number(implicit.clone());
            }
            self.values.push(implicit);
        }

        while let Some(Token::Operator(top)) = self.operators.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.reduce()?;
        }

        self.operators.push(Token::Operator(op));
        self.expression.push_operator(op);
        debug!(%op, "operator pushed");
        Ok(())
    }

    fn push_open_paren(&mut self) -> Result<(), ErrorKind> {
        self.continue_expression();

        if self.literal.is_some() || self.operand_committed() {
            self.push_operator(Operator::Mul)?;
        }

        self.operators.push(Token::OpenParen);
        self.paren_depth += 1;
        self.expression.push_open();
        debug!(depth = self.paren_depth, "group opened");
        Ok(())
    }

    fn push_close_paren(&mut self) -> Result<(), ErrorKind> {
        if self.paren_depth == 0 {
            return Err(ErrorKind::MismatchedParen);
        }

        if self.literal.is_some() {
            self.commit_literal()?;
        } else {
            let group_empty = self.operators.last().is_some_and(Token::is_open_paren);
            if group_empty && self.awaiting_operand() {
                return Err(ErrorKind::EmptyParen);
            }
        }

        while self.operators.last().is_some_and(Token::is_operator) {
            self.reduce()?;
        }

        match self.operators.pop() {
            Some(Token::OpenParen) => {
                self.paren_depth -= 1;
                self.expression.push_close();
                debug!(depth = self.paren_depth, "group closed");
                Ok(())
            }
            Some(_) => Err(ErrorKind::InternalError),
            None => Err(ErrorKind::MismatchedParen),
        }
    }

    /// Pop one operator and its two operands and push the result.
    fn reduce(&mut self) -> Result<(), ErrorKind> {
        let op = match self.operators.pop() {
            Some(Token::Operator(op)) => op,
            other => {
                warn!(?other, "reduction without an operator on top");
                return Err(ErrorKind::InternalError);
            }
        };

        if self.values.len() < 2 {
            debug!(%op, operands = self.values.len(), "not enough operands");
            return Err(ErrorKind::SyntaxError);
        }
        let (Some(right), Some(left)) = (self.values.pop(), self.values.pop()) else {
            return Err(ErrorKind::InternalError);
        };

        let result = evaluation::apply(op, &left, &right, self.config.division_scale)?;
        debug!(%left, %op, %right, %result, "reduced");
        self.values.push(result.clone());
        self.current = result;
        Ok(())
    }

    fn evaluate(&mut self) -> Result<(), ErrorKind> {
        if self.literal.is_none() && self.values.is_empty() && self.operators.is_empty() {
            trace!("equals with nothing to evaluate");
            return Ok(());
        }

        self.continue_expression();
        self.commit_literal()?;

        if self.paren_depth > 0 {
            return Err(ErrorKind::MismatchedParen);
        }

        while !self.operators.is_empty() {
            self.reduce()?;
        }

        match (self.values.pop(), self.values.is_empty()) {
            (Some(result), true) => {
                debug!(%result, "result");
                self.current = result;
                self.expression.finish();
                Ok(())
            }
            _ => Err(ErrorKind::SyntaxError),
        }
    }

    fn apply_percent(&mut self) -> Result<(), ErrorKind> {
        let scale = self.config.division_scale;

        if let Some(literal) = self.literal.take() {
            self.continue_expression();
            let typed = literal.value()?;
            let value = evaluation::percent(&typed, scale)?;
            debug!(%typed, %value, "percent of typed operand");
            self.values.push(value.clone());
            self.current = value;
            self.expression.push_number(typed);
            self.expression.push_percent();
        } else if let Some(top) = self.values.last_mut() {
            let value = evaluation::percent(top, scale)?;
            debug!(%value, "percent of stacked operand");
            *top = value.clone();
            self.current = value;
            self.expression.push_percent();
        } else if self.operators.is_empty() && !self.current.is_zero() {
            let held = self.current.clone();
            let value = evaluation::percent(&held, scale)?;
            debug!(%held, %value, "percent of previous result");
            self.current = value;
            self.expression.clear();
            self.expression.push_number(held);
            self.expression.push_percent();
        } else {
            trace!("percent ignored, no operand");
        }
        Ok(())
    }
}
