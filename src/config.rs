//! Storefront configuration

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};

use crate::{
    catalog::{Catalog, CatalogError},
    menu::{Category, ItemId},
    payments::PaymentMethod,
    pricing::{TaxRate, parse_tax_rate},
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Brewtopia storefront configuration
#[derive(Debug, Parser)]
#[command(name = "brewtopia", about = "Brewtopia café storefront", long_about = None)]
pub struct StorefrontConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Directory of menu files replacing the built-in menu
    #[arg(long, env = "BREWTOPIA_MENU_DIR")]
    pub menu_dir: Option<PathBuf>,

    /// Simulated payment processing time in milliseconds
    #[arg(long, env = "BREWTOPIA_PROCESSING_DELAY_MS", default_value_t = 1_500_u64)]
    pub processing_delay_ms: u64,

    /// Sales tax, e.g. "8%" or "0.08"
    #[arg(long, env = "BREWTOPIA_TAX_RATE", default_value = "8%", value_parser = parse_tax_rate)]
    pub tax_rate: TaxRate,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Storefront commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the menu
    Menu {
        /// Only show one category
        #[arg(short, long, value_enum)]
        category: Option<Category>,
    },

    /// Place an order and print the confirmation
    Order {
        /// Menu item id to add; repeat to add more
        #[arg(short, long = "item", required = true)]
        items: Vec<ItemId>,

        /// Payment method
        #[arg(short, long, value_enum, default_value_t = PaymentMethod::Qris)]
        payment: PaymentMethod,
    },
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Simulated payment processing time
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    /// Load the menu from `menu_dir`, or the built-in menu when unset.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the menu files can't be read or parsed.
    pub fn catalog(&self) -> Result<Catalog<'static>, CatalogError> {
        match &self.menu_dir {
            Some(dir) => Catalog::from_dir(dir),
            None => Catalog::embedded(),
        }
    }
}
