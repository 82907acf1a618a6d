//! Payment methods

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Unrecognised payment method key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

/// How the customer settles the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum PaymentMethod {
    /// QRIS by BCA, paid from a mobile banking app
    #[default]
    Qris,

    /// Cash at the cashier counter
    Cash,

    /// Debit or credit card at the cashier counter
    Card,

    /// A waitress takes payment at the table
    Table,
}

impl PaymentMethod {
    /// Every method, in the order they're offered.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Qris,
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Table,
    ];

    /// Key stored in the session when the method is chosen.
    pub fn key(self) -> &'static str {
        match self {
            PaymentMethod::Qris => "qris",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Table => "table",
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            PaymentMethod::Qris => "QRIS by BCA",
            PaymentMethod::Cash => "Cash at Cashier",
            PaymentMethod::Card => "Debit/Credit Card",
            PaymentMethod::Table => "Pay at Table",
        }
    }

    /// One-line description shown next to the option
    pub fn description(self) -> &'static str {
        match self {
            PaymentMethod::Qris => "Scan QR code to pay with your mobile banking app",
            PaymentMethod::Cash => "Pay with cash at the cashier counter",
            PaymentMethod::Card => "Pay with card at the cashier counter",
            PaymentMethod::Table => "Call waitress to process payment at your table",
        }
    }

    /// What the customer should do once the order is confirmed
    pub fn instructions(self) -> &'static str {
        match self {
            PaymentMethod::Qris => "Your payment via QRIS has been confirmed.",
            PaymentMethod::Cash => {
                "Please proceed to the cashier counter to complete your payment."
            }
            PaymentMethod::Card => {
                "Please proceed to the cashier counter to pay with your debit/credit card."
            }
            PaymentMethod::Table => {
                "A waitress will come to your table shortly to process your payment."
            }
        }
    }

    /// Resolve a stored key, falling back to [`PaymentMethod::Qris`] when the
    /// key is missing or unrecognised.
    pub fn from_key_or_default(key: Option<&str>) -> Self {
        key.and_then(|key| key.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.key() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}
