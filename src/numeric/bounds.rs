use crate::error::DialogError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Radix {
    Decimal,
    Hex,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }

    /// Uppercase digits only; callers normalise keyboard input first.
    pub fn is_digit(self, ch: char) -> bool {
        match self {
            Self::Decimal => ch.is_ascii_digit(),
            Self::Hex => ch.is_ascii_digit() || matches!(ch, 'A'..='F'),
        }
    }
}

impl TryFrom<u32> for Radix {
    type Error = DialogError;

    fn try_from(base: u32) -> Result<Self, Self::Error> {
        match base {
            10 => Ok(Self::Decimal),
            16 => Ok(Self::Hex),
            other => Err(DialogError::UnsupportedBase(other)),
        }
    }
}

/// Inclusive range a keypad value must satisfy. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericBounds {
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn contains(&self, value: f64) -> bool {
        match (self.min, self.max) {
            (None, None) => true,
            (Some(min), Some(max)) => value >= min && value <= max,
            (Some(min), None) => value >= min,
            (None, Some(max)) => value <= max,
        }
    }

    /// Checks the invariants a keypad needs before it can open: an ordered
    /// range, and `0` (the initial text) inside it.
    pub fn check_open(&self) -> Result<(), DialogError> {
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min >= max
        {
            return Err(DialogError::InvalidRange { min, max });
        }
        if !self.contains(0.0) {
            return Err(DialogError::ZeroOutOfRange);
        }
        Ok(())
    }
}

/// Evaluates a partial numeral as typed on a keypad.
///
/// Accepts an optional leading `-` (decimal only), a trailing `.` and the
/// bare sign, which all evaluate the way the digits typed so far read.
/// Returns `None` for anything a keypad could not have produced.
pub fn parse_numeral(candidate: &str, radix: Radix) -> Option<f64> {
    match radix {
        Radix::Decimal => parse_decimal(candidate),
        Radix::Hex => parse_hex(candidate),
    }
}

pub fn is_within_bounds(candidate: &str, radix: Radix, bounds: NumericBounds) -> bool {
    parse_numeral(candidate, radix).is_some_and(|value| bounds.contains(value))
}

fn parse_decimal(candidate: &str) -> Option<f64> {
    let (negative, body) = match candidate.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, candidate),
    };

    if body.chars().filter(|ch| *ch == '.').count() > 1
        || !body.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
    {
        return None;
    }

    let body = body.strip_suffix('.').unwrap_or(body);
    let magnitude = if body.is_empty() {
        0.0
    } else {
        body.parse::<f64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn parse_hex(candidate: &str) -> Option<f64> {
    if candidate.is_empty() {
        return None;
    }
    candidate.chars().try_fold(0.0_f64, |acc, ch| {
        ch.to_digit(16).map(|digit| acc * 16.0 + f64::from(digit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_accepts_everything_parsable() {
        assert!(is_within_bounds("-123456.75", Radix::Decimal, NumericBounds::UNBOUNDED));
        assert!(is_within_bounds("FFFFFFFFFFFFFFFFFFFF", Radix::Hex, NumericBounds::UNBOUNDED));
    }

    #[test]
    fn closed_range_is_inclusive() {
        let bounds = NumericBounds::between(-5.0, 10.0);
        assert!(is_within_bounds("-5", Radix::Decimal, bounds));
        assert!(is_within_bounds("10", Radix::Decimal, bounds));
        assert!(!is_within_bounds("10.5", Radix::Decimal, bounds));
        assert!(!is_within_bounds("-6", Radix::Decimal, bounds));
    }

    #[test]
    fn half_open_ranges() {
        let min_only = NumericBounds::new(Some(-1.0), None);
        assert!(is_within_bounds("99999", Radix::Decimal, min_only));
        assert!(!is_within_bounds("-2", Radix::Decimal, min_only));

        let max_only = NumericBounds::new(None, Some(255.0));
        assert!(is_within_bounds("FF", Radix::Hex, max_only));
        assert!(!is_within_bounds("100", Radix::Hex, max_only));
    }

    #[test]
    fn partial_numerals_evaluate_like_typed_text() {
        assert_eq!(parse_numeral("5.", Radix::Decimal), Some(5.0));
        assert_eq!(parse_numeral("-", Radix::Decimal), Some(0.0));
        assert_eq!(parse_numeral("-0.25", Radix::Decimal), Some(-0.25));
        assert_eq!(parse_numeral("1A", Radix::Hex), Some(26.0));
    }

    #[test]
    fn malformed_numerals_are_rejected() {
        assert_eq!(parse_numeral("1.2.3", Radix::Decimal), None);
        assert_eq!(parse_numeral("1e5", Radix::Decimal), None);
        assert_eq!(parse_numeral("inf", Radix::Decimal), None);
        assert_eq!(parse_numeral("-1", Radix::Hex), None);
        assert_eq!(parse_numeral("", Radix::Hex), None);
        assert!(!is_within_bounds("G", Radix::Hex, NumericBounds::UNBOUNDED));
    }

    #[test]
    fn open_checks_run_in_order() {
        assert_eq!(Radix::try_from(8), Err(DialogError::UnsupportedBase(8)));
        assert_eq!(
            NumericBounds::between(10.0, 10.0).check_open(),
            Err(DialogError::InvalidRange {
                min: 10.0,
                max: 10.0
            })
        );
        assert_eq!(
            NumericBounds::between(5.0, 10.0).check_open(),
            Err(DialogError::ZeroOutOfRange)
        );
        assert_eq!(
            NumericBounds::new(None, Some(-1.0)).check_open(),
            Err(DialogError::ZeroOutOfRange)
        );
        assert_eq!(NumericBounds::between(0.0, 255.0).check_open(), Ok(()));
        assert_eq!(NumericBounds::UNBOUNDED.check_open(), Ok(()));
    }
}
