use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the crate (entry amounts,
/// debit/credit sums) so balance checks compare exact integers instead of
/// floats.
///
/// Serialized as its two-decimal string form (`"12.50"`), which is also what
/// the transaction service expects for entry amounts.
///
/// # Examples
///
/// ```rust
/// use ledger::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; digits
/// past the second decimal are rounded half away from zero):
///
/// ```rust
/// use ledger::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert_eq!("12.345".parse::<Money>().unwrap().cents(), 1235);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

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

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Parses an amount that must be strictly positive.
    ///
    /// Blank, unparsable, zero and negative inputs are all rejected with
    /// [`LedgerError::InvalidAmount`]. An input that rounds to zero cents
    /// (e.g. `0.001`) counts as zero.
    pub fn parse_positive(input: &str) -> Result<Self, LedgerError> {
        let amount: Money = input.parse()?;
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(format!(
                "amount must be > 0, got {amount}"
            )));
        }
        Ok(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Money {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Operators saturate at the `i64` bounds; use [`Money::checked_add`] and
/// [`Money::checked_sub`] where overflow must be reported.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(self.0.saturating_neg())
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - rejects empty/invalid strings (letters, several separators, ...)
    /// - a missing integer part (`.5`) reads as zero
    /// - more than 2 fractional digits are rounded half away from zero
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || LedgerError::InvalidAmount("empty amount".to_string());
        let invalid = || LedgerError::InvalidAmount(format!("invalid amount: {}", s.trim()));
        let overflow = || LedgerError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim_start())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim_start())
        } else {
            (false, trimmed)
        };
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(invalid());
        }
        if units_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        if !units_str.chars().all(|c| c.is_ascii_digit())
            || !frac_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str.parse().map_err(|_| overflow())?
        };

        let digits = frac_str.as_bytes();
        let digit = |idx: usize| digits.get(idx).map_or(0, |d| i64::from(d - b'0'));
        let mut cents = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            cents += 1;
        }

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_saturate_instead_of_overflowing() {
        let big = Money::new(i64::MAX - 1);
        assert_eq!(big + Money::new(10), Money::new(i64::MAX));
        assert_eq!(-big - Money::new(10), Money::new(i64::MIN));
        assert_eq!(Money::new(i64::MIN).abs(), Money::new(i64::MAX));
        assert_eq!(big.checked_add(Money::new(10)), None);
    }

    #[test]
    fn display_always_has_two_decimals() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(1250).to_string(), "12.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("10,50".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<Money>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().cents(), 230);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("7.".parse::<Money>().unwrap().cents(), 700);
    }

    #[test]
    fn parse_rounds_extra_decimals() {
        assert_eq!("12.345".parse::<Money>().unwrap().cents(), 1235);
        assert_eq!("12.344".parse::<Money>().unwrap().cents(), 1234);
        assert_eq!("0.999".parse::<Money>().unwrap().cents(), 100);
        assert_eq!("-1.005".parse::<Money>().unwrap().cents(), -101);
        assert_eq!("0.001".parse::<Money>().unwrap().cents(), 0);
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "   ", "-", ".", "abc", "12abc", "1.2.3", "1 2", "１２"] {
            assert!(input.parse::<Money>().is_err(), "{input:?} should not parse");
        }
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn positive_parse_rejects_zero_and_negative() {
        assert!(matches!(
            Money::parse_positive("0"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(Money::parse_positive("-3").is_err());
        assert!(Money::parse_positive("0.004").is_err());
        assert_eq!(Money::parse_positive("0.005").unwrap(), Money::new(1));
    }

    #[test]
    fn serializes_as_two_decimal_string() {
        let json = serde_json::to_string(&Money::new(1250)).unwrap();
        assert_eq!(json, "\"12.50\"");
        let back: Money = serde_json::from_str("\"3.1\"").unwrap();
        assert_eq!(back, Money::new(310));
    }
}
