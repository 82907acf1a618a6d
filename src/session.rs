//! Session storage
//!
//! Short-lived key/value storage scoped to one customer session. The checkout
//! uses it to hand the chosen payment method from the payment step to the
//! confirmation step.

use rustc_hash::FxHashMap;

use crate::payments::PaymentMethod;

/// Session key holding the chosen payment method.
pub const PAYMENT_METHOD_KEY: &str = "paymentMethod";

/// Session-lifetime key/value storage.
pub trait SessionStore {
    /// Read a value
    fn get(&self, key: &str) -> Option<&str>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: String);

    /// Delete a value, returning it
    fn remove(&mut self, key: &str) -> Option<String>;

    /// Record the payment method chosen on the payment step.
    fn store_payment_method(&mut self, method: PaymentMethod) {
        self.set(PAYMENT_METHOD_KEY, method.key().to_string());
    }

    /// The stored payment method, or QRIS when nothing usable was stored.
    fn payment_method(&self) -> PaymentMethod {
        PaymentMethod::from_key_or_default(self.get(PAYMENT_METHOD_KEY))
    }

    /// Read and forget the stored payment method, defaulting to QRIS.
    fn take_payment_method(&mut self) -> PaymentMethod {
        PaymentMethod::from_key_or_default(self.remove(PAYMENT_METHOD_KEY).as_deref())
    }
}

/// In-memory session store
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    values: FxHashMap<String, String>,
}

impl MemorySession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_payment_method_is_read_back() {
        let mut session = MemorySession::new();

        session.store_payment_method(PaymentMethod::Table);

        assert_eq!(session.get(PAYMENT_METHOD_KEY), Some("table"));
        assert_eq!(session.payment_method(), PaymentMethod::Table);
    }

    #[test]
    fn empty_session_defaults_to_qris() {
        let session = MemorySession::new();

        assert_eq!(session.payment_method(), PaymentMethod::Qris);
    }

    #[test]
    fn garbage_value_defaults_to_qris() {
        let mut session = MemorySession::new();

        session.set(PAYMENT_METHOD_KEY, "voucher".to_string());

        assert_eq!(session.payment_method(), PaymentMethod::Qris);
    }

    #[test]
    fn take_payment_method_clears_the_key() {
        let mut session = MemorySession::new();

        session.store_payment_method(PaymentMethod::Cash);

        assert_eq!(session.take_payment_method(), PaymentMethod::Cash);
        assert_eq!(session.get(PAYMENT_METHOD_KEY), None);
        assert_eq!(session.take_payment_method(), PaymentMethod::Qris);
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut session = MemorySession::new();

        session.set("k", "v".to_string());

        assert_eq!(session.remove("k"), Some("v".to_string()));
        assert_eq!(session.get("k"), None);
    }
}
