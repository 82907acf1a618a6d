//! Checkout
//!
//! The checkout is a straight line: review the cart, pick a payment method,
//! see the confirmation.
//!
//! ```text
//! Cart ──proceed_to_payment──▶ Payment ──submit_payment──▶ Confirmed
//!   ▲                            │                            │
//!   └──────return_to_cart────────┘                            │
//!   └──────────────────────start_new_order────────────────────┘
//! ```
//!
//! Both forward moves require a non-empty cart, and that is the only thing
//! ever checked: the host may navigate freely, so each step can be taken from
//! any stage. Arriving at `Confirmed` always empties the cart and consumes the
//! payment method stored in the session.

use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::Cart,
    notifications::{Notifier, Toast},
    payments::PaymentMethod,
    processing::{PaymentProcessor, ProcessingError},
    session::SessionStore,
};

/// Shown on every confirmation.
pub const ESTIMATED_READY_TIME: &str = "15-20 minutes";

/// Where confirmed orders are collected.
pub const PICKUP_LOCATION: &str = "Counter #2";

/// Where the customer is in the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStage {
    /// Reviewing the cart
    #[default]
    Cart,

    /// Choosing how to pay
    Payment,

    /// Order placed
    Confirmed,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckoutStage::Cart => "cart",
            CheckoutStage::Payment => "payment",
            CheckoutStage::Confirmed => "confirmed",
        })
    }
}

/// Page the customer is sent to after a refused step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Category listing
    Menu,

    /// Cart review
    Cart,
}

/// Errors raised by checkout transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has nothing in it.
    #[error("cart is empty")]
    EmptyCart {
        /// Where the customer ends up
        redirect: Page,
    },

    /// The payment did not go through.
    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Display-only order reference, `BT-` followed by five digits.
///
/// Numbers are random and carry no uniqueness guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Draw a new order number from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(format!("BT-{}", rng.gen_range(10_000..100_000)))
    }

    /// The order number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything shown on the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Order reference
    pub order_number: OrderNumber,

    /// How the customer is paying
    pub payment_method: PaymentMethod,

    /// What the customer should do next
    pub instructions: &'static str,

    /// How long until the order is ready
    pub estimated_ready_time: &'static str,

    /// Where to collect the order
    pub pickup_location: &'static str,
}

/// Arrive at the confirmation page.
///
/// Empties the cart, takes the payment method out of the session (QRIS when
/// absent or unrecognised) and draws an order number.
pub fn enter_confirmation<S, R>(cart: &mut Cart<'_>, session: &mut S, rng: &mut R) -> OrderConfirmation
where
    S: SessionStore + ?Sized,
    R: Rng + ?Sized,
{
    cart.clear();

    let payment_method = session.take_payment_method();
    let order_number = OrderNumber::generate(rng);

    info!(order = %order_number, method = payment_method.key(), "order confirmed");

    OrderConfirmation {
        order_number,
        payment_method,
        instructions: payment_method.instructions(),
        estimated_ready_time: ESTIMATED_READY_TIME,
        pickup_location: PICKUP_LOCATION,
    }
}

/// Checkout state machine.
#[derive(Debug)]
pub struct Checkout<S, N> {
    stage: CheckoutStage,
    session: S,
    notifier: N,
}

impl<S: SessionStore, N: Notifier> Checkout<S, N> {
    /// Start a checkout at the cart stage.
    pub fn new(session: S, notifier: N) -> Self {
        Self {
            stage: CheckoutStage::Cart,
            session,
            notifier,
        }
    }

    /// The current stage
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// The session used to hand the payment method to the confirmation.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// The notifier toasts are sent to.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Move to the payment step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart is empty; the stage is left as it was.
    pub fn proceed_to_payment(&mut self, cart: &Cart<'_>) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            warn!("refusing to proceed to payment with an empty cart");

            self.notifier.notify(Toast::cart_is_empty());

            return Err(CheckoutError::EmptyCart {
                redirect: Page::Cart,
            });
        }

        self.transition(CheckoutStage::Payment);

        Ok(())
    }

    /// Go back to the cart.
    pub fn return_to_cart(&mut self) {
        self.transition(CheckoutStage::Cart);
    }

    /// Pay for the cart with `method` and confirm the order, from any stage.
    ///
    /// Waits for `processor`, stores the method in the session, then enters the
    /// confirmation (which empties the cart).
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart is empty; the customer is sent
    ///   back to the menu and the checkout restarts at the cart stage.
    /// - [`CheckoutError::Processing`]: the processor failed; the checkout stays
    ///   at the payment stage and the cart is untouched.
    pub async fn submit_payment<P, R>(
        &mut self,
        cart: &mut Cart<'_>,
        method: PaymentMethod,
        processor: &P,
        rng: &mut R,
    ) -> Result<OrderConfirmation, CheckoutError>
    where
        P: PaymentProcessor,
        R: Rng + ?Sized,
    {
        if cart.is_empty() {
            warn!("refusing to submit payment for an empty cart");

            self.notifier.notify(Toast::cart_is_empty());
            self.transition(CheckoutStage::Cart);

            return Err(CheckoutError::EmptyCart {
                redirect: Page::Menu,
            });
        }

        if self.stage != CheckoutStage::Payment {
            self.transition(CheckoutStage::Payment);
        }

        processor.process(method).await?;

        self.session.store_payment_method(method);

        Ok(self.enter_confirmation(cart, rng))
    }

    /// Arrive at the confirmation page, from any stage.
    pub fn enter_confirmation<R: Rng + ?Sized>(
        &mut self,
        cart: &mut Cart<'_>,
        rng: &mut R,
    ) -> OrderConfirmation {
        self.transition(CheckoutStage::Confirmed);

        enter_confirmation(cart, &mut self.session, rng)
    }

    /// Leave the confirmation page to start another order.
    pub fn start_new_order(&mut self) {
        self.transition(CheckoutStage::Cart);
    }

    fn transition(&mut self, to: CheckoutStage) {
        info!(from = %self.stage, to = %to, "checkout stage changed");

        self.stage = to;
    }
}
