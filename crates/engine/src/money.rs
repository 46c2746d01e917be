use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Largest magnitude accepted from the wire or from user input, in cents
/// (ten trillion in major units).
const MAX_CENTS: i64 = 1_000_000_000_000_000;

/// Signed money amount represented as **integer cents**.
///
/// Every aggregate is computed on this type so totals add up exactly; the
/// server's floating point amounts are rounded to cents once, on the way in.
/// Inputs are bounded by [`Money::MAX`]; arithmetic saturates instead of
/// overflowing.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::from_major(12.34).unwrap();
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!("12,34".parse::<Money>().unwrap(), amount);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MAX: Money = Money(MAX_CENTS);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    fn bounded(cents: i64) -> Option<Self> {
        (cents.unsigned_abs() <= MAX_CENTS as u64).then_some(Self(cents))
    }

    /// Converts an amount in major units (as sent on the wire) into cents.
    ///
    /// Rounds half away from zero to the nearest cent. Non-finite values and
    /// magnitudes above [`Money::MAX`] are rejected.
    pub fn from_major(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!("{value} is not finite")));
        }
        let cents = (value * 100.0).round();
        if cents.abs() > MAX_CENTS as f64 {
            return Err(EngineError::InvalidAmount(format!("{value} is too large")));
        }
        Ok(Self(cents as i64))
    }

    /// Returns the amount in major units, for request bodies.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let text = format!("{}.{:02}", abs / 100, abs % 100);
        if self.is_negative() {
            f.pad(&format!("-{text}"))
        } else {
            f.pad(&text)
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses an amount typed by the user, e.g. `40`, `12,5` or `-3.10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EngineError::InvalidAmount(format!("{reason}: {s:?}"));

        let text = s.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = digits.split_once(['.', ',']).unwrap_or((digits, ""));

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid("not a decimal amount"));
        }
        if fraction.len() > 2 {
            return Err(invalid("more than two decimals"));
        }

        let cents: i64 = format!("{whole}{fraction:0<2}")
            .parse()
            .map_err(|_| invalid("amount too large"))?;
        Self::bounded(if negative { -cents } else { cents })
            .ok_or_else(|| invalid("amount too large"))
    }
}
