//! Money type with fixed two-digit decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and keeps every value at scale 2,
//! so repeated aggregation never drifts and serialized output is stable.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of fractional digits carried by every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Errors produced when converting external values into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The text is not a decimal number.
    #[error("Invalid amount: {0}")]
    Invalid(String),
}

/// A currency amount at scale 2.
///
/// Construction always rounds half away from zero to two fractional digits,
/// so `Money` values compare, hash and serialize identically regardless of
/// how they were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

/// ISO 4217 currency codes used for report labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Tanzanian Shilling
    #[default]
    Tzs,
    /// Kenyan Shilling
    Kes,
    /// Ugandan Shilling
    Ugx,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
}

impl Money {
    /// Creates an amount, rounding to [`MONEY_SCALE`] digits.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(normalize(amount))
    }

    /// Creates a zero amount.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_minor(0)
    }

    /// Creates an amount from minor units (cents).
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, MONEY_SCALE))
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiplies a unit price by a quantity, e.g. `subtotal = quantity * unit_price`.
    #[must_use]
    pub fn times(self, quantity: Decimal) -> Self {
        Self::new(self.0 * quantity)
    }

    /// Expresses `self` as an unrounded percentage of `whole`.
    ///
    /// Returns zero when `whole` is not positive; a zero budget is never an error.
    #[must_use]
    pub fn percent_of(self, whole: Self) -> Decimal {
        if !whole.is_positive() {
            return Decimal::ZERO;
        }
        self.0
            .checked_div(whole.0)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// Rounds to whole currency units for display.
    #[must_use]
    pub fn whole(self) -> Decimal {
        let mut value = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(0);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        value
    }

    /// Formats whole currency units with thousands separators, e.g. `1,250,000`.
    #[must_use]
    pub fn format_whole(self) -> String {
        let whole = self.whole();
        let digits = whole.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if whole.is_sign_negative() {
            format!("-{grouped}")
        } else {
            grouped
        }
    }
}

fn normalize(amount: Decimal) -> Decimal {
    let mut value = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(MONEY_SCALE);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self::new)
            .map_err(|_| MoneyError::Invalid(s.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Currency {
    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tzs => "TZS",
            Self::Kes => "KES",
            Self::Ugx => "UGX",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TZS" => Ok(Self::Tzs),
            "KES" => Ok(Self::Kes),
            "UGX" => Ok(Self::Ugx),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
