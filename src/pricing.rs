//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::CartLineItem;

/// Errors that can occur while reading a tax rate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The rate isn't a number, or is outside `0%..=100%`.
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(String),

    /// An amount is too large to represent in minor units.
    #[error("amount overflowed")]
    Overflow,
}

/// Calculates the total price of a list of line items: the sum of each unit
/// price multiplied by its quantity. An empty list totals zero.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if a line total or the sum doesn't fit in minor units.
pub fn total_price<'a>(
    items: &[CartLineItem<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor_units = items.iter().try_fold(0_i64, |acc, line| {
        acc.checked_add(line.line_total()?.to_minor_units())
            .ok_or(PricingError::Overflow)
    })?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Sales tax added on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRate(Percentage);

impl TaxRate {
    /// Create a tax rate from a fraction, e.g. `0.08` for 8%.
    pub fn new(rate: Percentage) -> Self {
        Self(rate)
    }

    /// Tax owed on `subtotal`, rounded half away from zero to the minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the tax doesn't fit in minor units.
    pub fn tax_on<'a>(&self, subtotal: &Money<'a, Currency>) -> Result<Money<'a, Currency>, PricingError> {
        let tax = (self.0 * Decimal::from(subtotal.to_minor_units()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(PricingError::Overflow)?;

        Ok(Money::from_minor(tax, subtotal.currency()))
    }

    /// The rate in percent points (8 for 8%).
    pub fn percent_points(&self) -> Decimal {
        // `Percentage` is a fraction (e.g. 0.08), so multiply by 100 to print percent points.
        ((self.0 * Decimal::ONE) * Decimal::ONE_HUNDRED).normalize()
    }
}

impl Default for TaxRate {
    /// The café charges 8%.
    fn default() -> Self {
        Self(Percentage::from(Decimal::new(8, 2)))
    }
}

/// Subtotal, tax and grand total for a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals<'a> {
    /// Sum of line totals before tax
    pub subtotal: Money<'a, Currency>,

    /// Tax on the subtotal
    pub tax: Money<'a, Currency>,

    /// Subtotal plus tax
    pub total: Money<'a, Currency>,
}

impl<'a> Totals<'a> {
    /// Apply `rate` to `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the tax or the total doesn't fit in minor units.
    pub fn new(subtotal: Money<'a, Currency>, rate: TaxRate) -> Result<Self, PricingError> {
        let tax = rate.tax_on(&subtotal)?;
        let total = subtotal
            .to_minor_units()
            .checked_add(tax.to_minor_units())
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            total: Money::from_minor(total, subtotal.currency()),
        })
    }
}

/// Parse a tax rate (e.g., "8%" or "0.08")
///
/// Accepts two formats:
/// - Percentage format: "8%" for 8%
/// - Decimal format: "0.08" for 8%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or the rate is outside `0%..=100%`.
pub fn parse_tax_rate(s: &str) -> Result<TaxRate, PricingError> {
    let trimmed = s.trim();

    let fraction = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map(|value| value / Decimal::ONE_HUNDRED)
    } else {
        trimmed.parse::<Decimal>()
    }
    .map_err(|_err| PricingError::InvalidTaxRate(s.to_string()))?;

    if fraction.is_sign_negative() || fraction > Decimal::ONE {
        return Err(PricingError::InvalidTaxRate(s.to_string()));
    }

    Ok(TaxRate::new(Percentage::from(fraction)))
}
