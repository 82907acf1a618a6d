//! Menu data files

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    catalog::CatalogError,
    menu::{Category, ItemId, MenuItem},
};

/// One category's data file
#[derive(Debug, Deserialize)]
pub struct CategoryFile {
    /// Category slug, e.g. `light-bites`
    pub category: String,

    /// Items in display order
    pub items: Vec<ItemFile>,
}

/// Menu item as written in a data file
#[derive(Debug, Deserialize)]
pub struct ItemFile {
    /// Item id
    pub id: ItemId,

    /// Item name
    pub name: String,

    /// Item description
    pub description: String,

    /// Item price (e.g., "3.50 USD")
    pub price: String,

    /// Optional picture path
    #[serde(default)]
    pub image: Option<String>,
}

impl ItemFile {
    /// Convert into a [`MenuItem`] listed under `category`.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn into_menu_item(self, category: Category) -> Result<MenuItem<'static>, CatalogError> {
        let (minor_units, currency) = parse_price(&self.price)?;

        Ok(MenuItem {
            id: self.id,
            name: self.name,
            description: self.description,
            price: Money::from_minor(minor_units, currency),
            category,
            image: self.image.filter(|path| !path.trim().is_empty()),
        })
    }
}

/// Parse price string (e.g., "3.50 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .trim_start_matches('$')
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    let currency = match *currency_code {
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    // Fractions of the smallest unit can't be charged.
    if amount.normalize().scale() > currency.exponent {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|factor| amount.checked_mul(Decimal::from(factor)))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
