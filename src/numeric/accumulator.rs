use super::bounds::{NumericBounds, Radix, is_within_bounds, parse_numeral};
use log::trace;

const ZERO: &str = "0";

/// A single keypad edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// A `0-9` digit, or `A-F` on a hex pad (either case).
    Digit(char),
    Point,
    ToggleSign,
    Backspace,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected,
}

impl EditOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// In-progress numeric text of a keypad.
///
/// The text is never empty and always evaluates inside `bounds`; an edit that
/// would break either rule is rejected and leaves the text untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    text: String,
    radix: Radix,
    decimal_allowed: bool,
    bounds: NumericBounds,
}

impl Accumulator {
    pub fn new(radix: Radix, decimal_allowed: bool, bounds: NumericBounds) -> Self {
        Self {
            text: ZERO.to_string(),
            radix,
            decimal_allowed: decimal_allowed && radix == Radix::Decimal,
            bounds,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    pub fn value(&self) -> f64 {
        parse_numeral(&self.text, self.radix).unwrap_or(0.0)
    }

    pub fn apply(&mut self, edit: Edit) -> EditOutcome {
        match edit {
            Edit::Digit(ch) => self.push_digit(ch),
            Edit::Point => self.push_point(),
            Edit::ToggleSign => self.toggle_sign(),
            Edit::Backspace => self.backspace(),
            Edit::Clear => self.clear(),
        }
    }

    pub fn push_digit(&mut self, ch: char) -> EditOutcome {
        let ch = ch.to_ascii_uppercase();
        if !self.radix.is_digit(ch) {
            return EditOutcome::Rejected;
        }

        let candidate = if self.text == ZERO {
            ch.to_string()
        } else {
            format!("{}{ch}", self.text)
        };
        self.commit(candidate)
    }

    pub fn push_point(&mut self) -> EditOutcome {
        if self.radix != Radix::Decimal || !self.decimal_allowed || self.text.contains('.') {
            return EditOutcome::Rejected;
        }
        self.commit(format!("{}.", self.text))
    }

    /// Negative zero is never produced: toggling on `"0"` is rejected.
    pub fn toggle_sign(&mut self) -> EditOutcome {
        if self.radix != Radix::Decimal || self.text == ZERO {
            return EditOutcome::Rejected;
        }

        let candidate = match self.text.strip_prefix('-') {
            Some(positive) => positive.to_string(),
            None => format!("-{}", self.text),
        };
        self.commit(candidate)
    }

    pub fn backspace(&mut self) -> EditOutcome {
        if self.text == ZERO {
            return EditOutcome::Rejected;
        }

        let mut candidate = self.text.clone();
        candidate.pop();
        if candidate.is_empty() || candidate == "-" {
            candidate = ZERO.to_string();
        }
        self.commit(candidate)
    }

    pub fn clear(&mut self) -> EditOutcome {
        self.text = ZERO.to_string();
        EditOutcome::Applied
    }

    fn commit(&mut self, candidate: String) -> EditOutcome {
        if is_within_bounds(&candidate, self.radix, self.bounds) {
            self.text = candidate;
            EditOutcome::Applied
        } else {
            trace!("rejected keypad edit {candidate:?} for {:?}", self.bounds);
            EditOutcome::Rejected
        }
    }
}
