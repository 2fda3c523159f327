//! Prices
//!
//! Decimal money values denominated in an ISO-4217 currency. Arithmetic
//! across currencies is a domain error, not a panic, so `add`/`sub` are
//! fallible and the caller decides what a mismatch means.

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::Currency;
use thiserror::Error;

/// Errors that can occur during price arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Two prices in different currencies were combined.
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency of the left-hand operand.
        expected: &'static str,
        /// Currency of the right-hand operand.
        actual: &'static str,
    },
}

/// A monetary amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    amount: Decimal,
    currency: &'static Currency,
}

impl Price {
    /// Creates a price from a decimal amount.
    #[must_use]
    pub fn new(amount: Decimal, currency: &'static Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a price from minor units (pence, cents) of the currency.
    #[must_use]
    pub fn from_minor(minor: i64, currency: &'static Currency) -> Self {
        Self {
            amount: Decimal::new(minor, currency.exponent),
            currency,
        }
    }

    /// A zero price in the given currency.
    #[must_use]
    pub fn zero(currency: &'static Currency) -> Self {
        Self::from_minor(0, currency)
    }

    /// The decimal amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency the amount is denominated in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The amount expressed in minor units of the currency, truncated.
    ///
    /// Amounts outside the `i64` range collapse to zero.
    #[must_use]
    pub fn to_minor_units(&self) -> i64 {
        let scale = Decimal::from(10_i64.pow(self.currency.exponent));
        (self.amount * scale).trunc().to_i64().unwrap_or(0)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Whether the amount is above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Adds another price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if the currencies differ.
    pub fn add(self, other: Self) -> Result<Self, PriceError> {
        self.check_currency(other)?;

        Ok(Self {
            amount: self.amount + other.amount,
            ..self
        })
    }

    /// Subtracts another price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if the currencies differ.
    pub fn sub(self, other: Self) -> Result<Self, PriceError> {
        self.check_currency(other)?;

        Ok(Self {
            amount: self.amount - other.amount,
            ..self
        })
    }

    /// Multiplies the price by a quantity.
    #[must_use]
    pub fn multiply(self, qty: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(qty),
            ..self
        }
    }

    /// Replaces a negative amount with zero, leaving other amounts as-is.
    #[must_use]
    pub fn clamped_to_zero(self) -> Self {
        if self.is_negative() {
            Self::zero(self.currency)
        } else {
            self
        }
    }

    /// Sums a sequence of prices.
    ///
    /// Returns `None` for an empty sequence, since there is no currency to
    /// denominate a zero total in.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] on the first addition whose
    /// operands disagree on currency.
    pub fn sum<I>(prices: I) -> Result<Option<Self>, PriceError>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = prices.into_iter();

        let Some(first) = iter.next() else {
            return Ok(None);
        };

        let total = iter.try_fold(first, Self::add)?;

        Ok(Some(total))
    }

    fn check_currency(self, other: Self) -> Result<(), PriceError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(PriceError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code,
                actual: other.currency.iso_alpha_code,
            })
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.iso_alpha_code)
    }
}
