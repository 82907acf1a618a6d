//! Brewtopia
//!
//! Cart and checkout engine for the Brewtopia café storefront: a static menu,
//! a session cart, and a linear checkout from cart to payment to confirmation.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod images;
pub mod logging;
pub mod menu;
pub mod notifications;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod processing;
pub mod receipt;
pub mod session;
pub mod storefront;
