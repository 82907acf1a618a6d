//! Notifications
//!
//! Short-lived messages for the customer ("Added to cart", "Cart is empty").
//! Delivery is fire-and-forget: nothing waits on, or reacts to, a toast.

use std::cell::RefCell;

use tracing::{info, warn};

/// How a toast is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    /// Informational or success message
    #[default]
    Default,

    /// Warning that an action was refused
    Destructive,
}

/// A message for the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Headline
    pub title: String,

    /// Body text
    pub description: String,

    /// Styling
    pub variant: ToastVariant,
}

impl Toast {
    /// A success toast
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    /// A warning toast
    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    /// "Added to cart" toast for the named item.
    pub fn added_to_cart(name: &str) -> Self {
        Self::success("Added to cart", format!("{name} has been added to your cart."))
    }

    /// Warning shown when checkout is attempted with nothing in the cart.
    pub fn cart_is_empty() -> Self {
        Self::warning(
            "Cart is empty",
            "Please add items to your cart before proceeding to payment.",
        )
    }
}

/// Receives toasts.
pub trait Notifier {
    /// Deliver a toast
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => info!(title = %toast.title, "{}", toast.description),
            ToastVariant::Destructive => warn!(title = %toast.title, "{}", toast.description),
        }
    }
}

/// Keeps every toast it receives, for inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: RefCell<Vec<Toast>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts received so far, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    /// The most recent toast
    pub fn last(&self) -> Option<Toast> {
        self.toasts.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}

impl<N: Notifier> Notifier for &N {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_toasts_in_order() {
        let notifier = RecordingNotifier::new();

        notifier.notify(Toast::added_to_cart("Espresso"));
        notifier.notify(Toast::cart_is_empty());

        let toasts = notifier.toasts();

        assert_eq!(toasts.len(), 2);
        assert_eq!(
            toasts.first().map(|toast| toast.description.as_str()),
            Some("Espresso has been added to your cart.")
        );
        assert_eq!(notifier.last().map(|toast| toast.variant), Some(ToastVariant::Destructive));
    }

    #[test]
    fn notifier_references_forward() {
        fn send(notifier: impl Notifier) {
            notifier.notify(Toast::success("Hi", "there"));
        }

        let notifier = RecordingNotifier::new();

        send(&notifier);

        assert_eq!(notifier.toasts().len(), 1);
    }
}
