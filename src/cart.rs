//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    menu::{ItemId, MenuItem},
    pricing::{PricingError, total_price},
};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item id, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ItemId, &'static str, &'static str),
}

/// One distinct menu item and how many of it the customer wants.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem<'a> {
    id: ItemId,
    name: String,
    description: String,
    price: Money<'a, Currency>,
    image: Option<String>,
    quantity: u32,
}

impl<'a> CartLineItem<'a> {
    fn from_menu_item(item: &MenuItem<'a>) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            image: item.image.clone(),
            quantity: 1,
        }
    }

    /// Menu item id
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Picture path, if the item has one
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Quantity, always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product doesn't fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor_units = self
            .price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(PricingError::Overflow)?;

        Ok(Money::from_minor(minor_units, self.price.currency()))
    }
}

/// What [`Cart::update_quantity`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The entry now has this quantity.
    Updated(u32),

    /// The requested quantity was zero or below, so the entry was dropped.
    Removed,

    /// No entry has that id; the cart is unchanged.
    NotFound,
}

/// The customer's current selection.
///
/// Line items keep insertion order and are unique by [`ItemId`]. The total is
/// derived from the items on every call.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<CartLineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one of `item` to the cart, returning its new quantity.
    ///
    /// An item already in the cart has its quantity incremented; otherwise it
    /// is appended with a quantity of 1.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if the item isn't priced in the cart currency.
    pub fn add_item(&mut self, item: &MenuItem<'a>) -> Result<u32, CartError> {
        let item_currency = item.price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.id.clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let quantity = if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            self.items.push(CartLineItem::from_menu_item(item));
            1
        };

        debug!(item = %item.id, quantity, "added item to cart");

        Ok(quantity)
    }

    /// Set the quantity of the entry with the given id.
    ///
    /// A quantity of zero or below removes the entry. Quantities beyond
    /// `u32::MAX` are clamped.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) -> QuantityUpdate {
        let Some(idx) = self.position(id) else {
            warn!(item = %id, "ignoring quantity update for item not in cart");

            return QuantityUpdate::NotFound;
        };

        if quantity <= 0 {
            self.items.remove(idx);

            debug!(item = %id, "quantity reached zero, removed item from cart");

            return QuantityUpdate::Removed;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.items.get_mut(idx) {
            line.quantity = quantity;
        }

        debug!(item = %id, quantity, "updated cart quantity");

        QuantityUpdate::Updated(quantity)
    }

    /// Remove the entry with the given id. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };

        self.items.remove(idx);

        debug!(item = %id, "removed item from cart");

        true
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();

        debug!("cleared cart");
    }

    /// Line items in the order they were first added
    pub fn items(&self) -> &[CartLineItem<'a>] {
        &self.items
    }

    /// Iterate over line items
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem<'a>> {
        self.items.iter()
    }

    /// Look up the entry for an item
    pub fn get(&self, id: &ItemId) -> Option<&CartLineItem<'a>> {
        self.items.iter().find(|line| &line.id == id)
    }

    /// Sum of price multiplied by quantity over all entries; zero when empty.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total doesn't fit in minor units.
    pub fn total_price(&self) -> Result<Money<'a, Currency>, PricingError> {
        total_price(&self.items, self.currency)
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all entries, as shown on the cart badge.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|line| &line.id == id)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::menu::Category;

    use super::*;

    fn menu_item(id: &str, name: &str, minor: i64) -> MenuItem<'static> {
        MenuItem {
            id: ItemId::from(id),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Money::from_minor(minor, iso::USD),
            category: Category::Coffee,
            image: None,
        }
    }

    fn espresso() -> MenuItem<'static> {
        menu_item("coffee-1", "Espresso", 350)
    }

    fn latte() -> MenuItem<'static> {
        menu_item("coffee-3", "Latte", 475)
    }

    #[test]
    fn new_cart_is_empty_with_zero_total() -> TestResult {
        let cart = Cart::new(iso::USD);

        assert!(cart.is_empty());
        assert_eq!(cart.total_price()?, Money::from_minor(0, iso::USD));
        assert_eq!(cart.currency(), iso::USD);

        Ok(())
    }

    #[test]
    fn adding_the_same_item_twice_increments_quantity() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;

        assert_eq!(cart.add_item(&espresso())?, 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);

        Ok(())
    }

    #[test]
    fn new_items_are_appended_in_insertion_order() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&latte())?;
        cart.add_item(&espresso())?;
        cart.add_item(&latte())?;

        let ids: Vec<&str> = cart.iter().map(|line| line.id().as_str()).collect();

        assert_eq!(ids, ["coffee-3", "coffee-1"]);

        Ok(())
    }

    #[test]
    fn add_item_rejects_other_currencies() {
        let mut cart = Cart::new(iso::USD);
        let mut item = espresso();
        item.price = Money::from_minor(350, iso::GBP);

        let result = cart.add_item(&item);

        assert_eq!(
            result.err(),
            Some(CartError::CurrencyMismatch(
                ItemId::from("coffee-1"),
                iso::GBP.iso_alpha_code,
                iso::USD.iso_alpha_code,
            ))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;
        cart.add_item(&latte())?;
        cart.add_item(&latte())?;

        assert_eq!(cart.total_price()?, Money::from_minor(1300, iso::USD));

        Ok(())
    }

    #[test]
    fn update_quantity_sets_quantity() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;

        let update = cart.update_quantity(&ItemId::from("coffee-1"), 4);

        assert_eq!(update, QuantityUpdate::Updated(4));
        assert_eq!(cart.total_price()?, Money::from_minor(1400, iso::USD));

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_entry() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;
        cart.add_item(&latte())?;

        let update = cart.update_quantity(&ItemId::from("coffee-1"), 0);

        assert_eq!(update, QuantityUpdate::Removed);
        assert!(cart.get(&ItemId::from("coffee-1")).is_none());
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn decrementing_past_one_removes_entry() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;

        let quantity = i64::from(cart.add_item(&espresso())?);
        let id = ItemId::from("coffee-1");

        assert_eq!(
            cart.update_quantity(&id, quantity - 1),
            QuantityUpdate::Updated(1)
        );
        assert_eq!(cart.update_quantity(&id, 0), QuantityUpdate::Removed);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn negative_quantity_removes_entry() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;

        assert_eq!(
            cart.update_quantity(&ItemId::from("coffee-1"), -3),
            QuantityUpdate::Removed
        );
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_of_unknown_item_is_noop() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;

        assert_eq!(
            cart.update_quantity(&ItemId::from("tea-1"), 3),
            QuantityUpdate::NotFound
        );
        assert_eq!(cart.item_count(), 1);

        Ok(())
    }

    #[test]
    fn remove_item_deletes_entry() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;
        cart.add_item(&latte())?;

        assert!(cart.remove_item(&ItemId::from("coffee-3")));
        assert_eq!(cart.total_price()?, Money::from_minor(350, iso::USD));

        Ok(())
    }

    #[test]
    fn remove_unknown_item_leaves_cart_unchanged() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;

        let before = cart.items().to_vec();

        assert!(!cart.remove_item(&ItemId::from("dessert-1")));
        assert_eq!(cart.items(), before.as_slice());

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&espresso())?;
        cart.add_item(&latte())?;
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price()?, Money::from_minor(0, iso::USD));

        Ok(())
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(&latte())?;
        cart.add_item(&latte())?;

        let line = cart.get(&ItemId::from("coffee-3")).ok_or("latte missing")?;

        assert_eq!(line.quantity(), 2);
        assert_eq!(line.line_total()?, Money::from_minor(950, iso::USD));
        assert_eq!(line.name(), "Latte");
        assert_eq!(line.description(), "Latte description");
        assert_eq!(line.image(), None);

        Ok(())
    }

    #[test]
    fn oversized_line_total_is_an_error() -> TestResult {
        let mut cart = Cart::new(iso::USD);
        let feast = menu_item("main-99", "Feast", 5_000_000_000_000_000_000);

        cart.add_item(&feast)?;
        cart.update_quantity(&feast.id, 2);

        let line = cart.get(&feast.id).ok_or("feast missing")?;

        assert_eq!(line.line_total(), Err(PricingError::Overflow));
        assert_eq!(cart.total_price(), Err(PricingError::Overflow));

        Ok(())
    }
}
