//! Integer minor-unit price representation.
//!
//! Catalog prices arrive as decimal major units (e.g., `19.99` dollars). The
//! cart stores them as whole cents so totals never accumulate floating-point
//! drift.

use core::fmt;
use core::iter::Sum;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount in minor currency units (cents).
///
/// Serialized as a bare JSON integer, so `Cents::new(1999)` is written `1999`.
///
/// ## Rounding
///
/// Conversion from major units rounds the exact decimal value half away from
/// zero, which is round-half-up for the non-negative prices a catalog serves:
///
/// ```
/// use rust_decimal::Decimal;
/// use storefront_cart_core::Cents;
///
/// assert_eq!(Cents::from_major_units(Decimal::new(1999, 2)), Cents::new(1999));
/// assert_eq!(Cents::from_major_units(Decimal::new(285, 3)), Cents::new(29));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a raw number of cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the underlying number of cents.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Convert a decimal major-unit amount to cents.
    ///
    /// Amounts beyond the `i64` range saturate at the corresponding bound.
    #[must_use]
    pub fn from_major_units(amount: Decimal) -> Self {
        let saturated = if amount.is_sign_negative() {
            Self(i64::MIN)
        } else {
            Self(i64::MAX)
        };

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|rounded| rounded.to_i64())
            .map_or(saturated, Self)
    }

    /// Convert back to a decimal major-unit amount (e.g., `1999` -> `19.99`).
    #[must_use]
    pub fn to_major_units(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Add two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply a unit price by a quantity, saturating at the numeric bounds.
    #[must_use]
    pub fn saturating_mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Format for display with a dollar sign (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${self}")
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_major_units())
    }
}

impl From<i64> for Cents {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl From<Cents> for i64 {
    fn from(cents: Cents) -> Self {
        cents.0
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}
