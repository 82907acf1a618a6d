//! Brewtopia prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLineItem, QuantityUpdate},
    catalog::{Catalog, CatalogError},
    checkout::{Checkout, CheckoutError, CheckoutStage, OrderConfirmation, OrderNumber, Page},
    images::{ImageFallback, PLACEHOLDER_IMAGE},
    menu::{Category, ItemId, MenuItem},
    notifications::{LogNotifier, Notifier, RecordingNotifier, Toast, ToastVariant},
    payments::PaymentMethod,
    pricing::{TaxRate, Totals},
    processing::{CancelHandle, PaymentProcessor, ProcessingError, SimulatedProcessor},
    receipt::{OrderSummary, ReceiptError},
    session::{MemorySession, SessionStore},
    storefront::{Storefront, StorefrontError},
};
