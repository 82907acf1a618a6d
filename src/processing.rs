//! Payment processing
//!
//! There is no payment gateway: "processing" is a fixed delay. The delay sits
//! behind [`PaymentProcessor`] so it can be swapped for an instant or failing
//! processor, and [`SimulatedProcessor`] can be cancelled while it waits.

use std::{sync::Arc, time::Duration};

use humanize_duration::{Truncate, prelude::DurationExt};
use thiserror::Error;
use tokio::{sync::Notify, time::Instant};
use tracing::{debug, info};

use crate::payments::PaymentMethod;

/// How long the simulated processor waits by default.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(1500);

/// Errors raised while processing a payment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessingError {
    /// Processing was cancelled before it finished.
    #[error("payment processing was cancelled")]
    Cancelled,

    /// The processor refused the payment.
    #[error("payment declined: {0}")]
    Declined(String),
}

/// Settles a payment.
pub trait PaymentProcessor {
    /// Process a payment with `method`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessingError`] if the payment does not go through.
    async fn process(&self, method: PaymentMethod) -> Result<(), ProcessingError>;
}

impl<P: PaymentProcessor> PaymentProcessor for &P {
    async fn process(&self, method: PaymentMethod) -> Result<(), ProcessingError> {
        (**self).process(method).await
    }
}

/// Cancels an in-flight [`SimulatedProcessor::process`] call.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    notify: Arc<Notify>,
}

impl CancelHandle {
    /// Abort every payment currently waiting on the processor.
    ///
    /// Calls made after this one are unaffected.
    pub fn cancel(&self) {
        self.notify.notify_waiters();
    }
}

/// Waits a fixed time, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
    cancel: Arc<Notify>,
}

impl SimulatedProcessor {
    /// Create a processor that waits `delay` per payment.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            cancel: Arc::new(Notify::new()),
        }
    }

    /// A processor that completes immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Handle for cancelling in-flight payments.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            notify: Arc::clone(&self.cancel),
        }
    }
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

impl PaymentProcessor for SimulatedProcessor {
    async fn process(&self, method: PaymentMethod) -> Result<(), ProcessingError> {
        let start = Instant::now();
        let cancelled = self.cancel.notified();

        debug!(method = method.key(), delay = ?self.delay, "processing payment");

        tokio::select! {
            () = tokio::time::sleep(self.delay) => {
                info!(
                    method = method.key(),
                    "payment processed in {}",
                    start.elapsed().human(Truncate::Millis)
                );

                Ok(())
            }
            () = cancelled => {
                info!(method = method.key(), "payment processing cancelled");

                Err(ProcessingError::Cancelled)
            }
        }
    }
}
