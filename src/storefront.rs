//! Storefront
//!
//! Owns everything one customer session needs: the menu, their cart, the
//! checkout and the broken-image tracker.

use rand::Rng;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError, QuantityUpdate},
    catalog::{Catalog, CatalogError},
    checkout::{Checkout, CheckoutError, CheckoutStage, OrderConfirmation},
    images::ImageFallback,
    menu::{Category, ItemId, MenuItem},
    notifications::{Notifier, Toast},
    payments::PaymentMethod,
    pricing::{PricingError, TaxRate},
    processing::PaymentProcessor,
    receipt::OrderSummary,
    session::SessionStore,
};

/// Errors raised by storefront actions.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Menu lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The cart refused the item.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A checkout step was refused.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// An amount was too large to represent.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One customer's view of the café.
#[derive(Debug)]
pub struct Storefront<S, N> {
    catalog: Catalog<'static>,
    cart: Cart<'static>,
    checkout: Checkout<S, N>,
    images: ImageFallback,
    tax_rate: TaxRate,
}

impl<S: SessionStore, N: Notifier> Storefront<S, N> {
    /// Open the storefront over `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog has no items to take a currency from.
    pub fn new(
        catalog: Catalog<'static>,
        tax_rate: TaxRate,
        session: S,
        notifier: N,
    ) -> Result<Self, StorefrontError> {
        let currency = catalog.currency()?;

        Ok(Self {
            catalog,
            cart: Cart::new(currency),
            checkout: Checkout::new(session, notifier),
            images: ImageFallback::new(),
            tax_rate,
        })
    }

    /// The menu
    pub fn catalog(&self) -> &Catalog<'static> {
        &self.catalog
    }

    /// Items in one menu category, in file order.
    pub fn menu(&self, category: Category) -> impl Iterator<Item = &MenuItem<'static>> {
        self.catalog.category(category)
    }

    /// The customer's cart
    pub fn cart(&self) -> &Cart<'static> {
        &self.cart
    }

    /// The checkout
    pub fn checkout(&self) -> &Checkout<S, N> {
        &self.checkout
    }

    /// Current checkout stage
    pub fn stage(&self) -> CheckoutStage {
        self.checkout.stage()
    }

    /// Tax charged at checkout
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Add one of the menu item `id` to the cart and let the customer know.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` isn't on the menu.
    pub fn add_to_cart(&mut self, id: &ItemId) -> Result<u32, StorefrontError> {
        let item = self.catalog.get(id)?;
        let quantity = self.cart.add_item(item)?;

        self.checkout.notifier().notify(Toast::added_to_cart(&item.name));

        Ok(quantity)
    }

    /// Change how many of `id` are in the cart. Zero or below removes it.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) -> QuantityUpdate {
        self.cart.update_quantity(id, quantity)
    }

    /// Take `id` out of the cart.
    pub fn remove_from_cart(&mut self, id: &ItemId) -> bool {
        self.cart.remove_item(id)
    }

    /// Summary of the live cart
    ///
    /// # Errors
    ///
    /// Returns an error if the cart total is too large to represent.
    pub fn summary(&self) -> Result<OrderSummary<'static>, StorefrontError> {
        Ok(OrderSummary::new(&self.cart, self.tax_rate)?)
    }

    /// Picture to show for the menu item `id`.
    pub fn image_source(&self, id: &ItemId) -> &str {
        let image = self.catalog.item(id).and_then(|item| item.image.as_deref());

        self.images.source(id, image)
    }

    /// Record that the picture for `id` failed to load.
    pub fn image_failed(&mut self, id: &ItemId) {
        self.images.mark_failed(id);
    }

    /// See [`Checkout::proceed_to_payment`].
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty.
    pub fn proceed_to_payment(&mut self) -> Result<(), StorefrontError> {
        Ok(self.checkout.proceed_to_payment(&self.cart)?)
    }

    /// See [`Checkout::return_to_cart`].
    pub fn return_to_cart(&mut self) {
        self.checkout.return_to_cart();
    }

    /// See [`Checkout::submit_payment`].
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty or the processor fails.
    pub async fn submit_payment<P, R>(
        &mut self,
        method: PaymentMethod,
        processor: &P,
        rng: &mut R,
    ) -> Result<OrderConfirmation, StorefrontError>
    where
        P: PaymentProcessor,
        R: Rng + ?Sized,
    {
        Ok(self
            .checkout
            .submit_payment(&mut self.cart, method, processor, rng)
            .await?)
    }

    /// See [`Checkout::enter_confirmation`].
    pub fn enter_confirmation<R: Rng + ?Sized>(&mut self, rng: &mut R) -> OrderConfirmation {
        self.checkout.enter_confirmation(&mut self.cart, rng)
    }

    /// See [`Checkout::start_new_order`].
    pub fn start_new_order(&mut self) {
        self.checkout.start_new_order();
    }
}
