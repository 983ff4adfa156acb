//! # Money Module
//!
//! Provides the `Money` and `Price` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart summing dish prices as floats drifts after enough edits.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    $10.99 is stored as 1099. Sums, line totals, and cart totals are    │
//! │    exact integer arithmetic. Only the UI formats for display.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nosh_core::money::{Money, Price};
//!
//! // Create from minor units (preferred)
//! let amount = Money::from_minor(1099); // $10.99
//!
//! // Arithmetic operations
//! let line_total = amount * 3;
//! let grand = line_total + Money::from_minor(500);
//!
//! // A price as it appears in the menu document
//! let price = Price::new(1099, "USD");
//! assert_eq!(price.amount, Money::from_minor(1099));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections/refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// The session store does NOT validate amounts; a dish priced at a negative
/// amount flows through cart arithmetic unchanged. The schema validation
/// layer is the place that rejects negative prices at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use nosh_core::money::Money;
    ///
    /// let amount = Money::from_minor(1099); // Represents $10.99
    /// assert_eq!(amount.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (e.g. dollars).
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99, absolute value).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies the amount by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use nosh_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.minor(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable decimal format.
///
/// ## Note
/// This is for logs and the text preview. The web frontend formats prices
/// itself to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.major_part().abs(),
            self.minor_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over an iterator of Money (cart totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Price Type
// =============================================================================

/// A price as it appears in the menu document: `{amount, currency}`.
///
/// The `amount` is in minor units, matching what the remote API stores.
/// Currency is an opaque ISO-4217-style code; the core never converts
/// between currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Price {
    /// Amount in minor units (cents).
    pub amount: Money,

    /// Currency code, e.g. "USD" or "EUR".
    pub currency: String,
}

impl Price {
    /// Creates a price from minor units and a currency code.
    pub fn new(amount_minor: i64, currency: impl Into<String>) -> Self {
        Price {
            amount: Money::from_minor(amount_minor),
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
