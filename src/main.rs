//! Brewtopia storefront CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use thiserror::Error;
use tracing::error;

use brewtopia::{
    catalog::CatalogError,
    config::{Command, StorefrontConfig},
    logging,
    menu::{Category, ItemId},
    notifications::LogNotifier,
    payments::PaymentMethod,
    processing::SimulatedProcessor,
    receipt::{self, ReceiptError},
    session::MemorySession,
    storefront::{Storefront, StorefrontError},
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match StorefrontConfig::load() {
        Ok(config) => config,
        Err(error) => {
            // Prints help and version output too.
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");

            #[expect(clippy::print_stderr, reason = "the customer needs to see why")]
            {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}

async fn run(config: StorefrontConfig) -> Result<(), CliError> {
    let catalog = config.catalog()?;
    let mut storefront = Storefront::new(catalog, config.tax_rate, MemorySession::new(), LogNotifier)?;
    let processor = SimulatedProcessor::new(config.processing_delay());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        Command::Menu { category } => print_menu(&mut out, &storefront, category),
        Command::Order { items, payment } => {
            place_order(&mut out, &mut storefront, &processor, &items, payment).await
        }
    }
}

fn print_menu(
    out: &mut impl Write,
    storefront: &Storefront<MemorySession, LogNotifier>,
    only: Option<Category>,
) -> Result<(), CliError> {
    let categories = only.map_or_else(|| Category::ALL.to_vec(), |category| vec![category]);

    for category in categories {
        writeln!(out, "\n{category}")?;

        for item in storefront.menu(category) {
            writeln!(
                out,
                "  {:<14} {:<28} {:>8}  {}",
                item.id.as_str(),
                item.name,
                item.price.to_string(),
                item.description
            )?;
        }
    }

    Ok(())
}

async fn place_order(
    out: &mut impl Write,
    storefront: &mut Storefront<MemorySession, LogNotifier>,
    processor: &SimulatedProcessor,
    items: &[ItemId],
    payment: PaymentMethod,
) -> Result<(), CliError> {
    for id in items {
        storefront.add_to_cart(id)?;
    }

    storefront.proceed_to_payment()?;

    writeln!(out, "\nPaying with {payment}: {}", payment.description())?;

    storefront.summary()?.write_to(&mut *out)?;

    let confirmation = storefront
        .submit_payment(payment, processor, &mut rand::thread_rng())
        .await?;

    receipt::write_confirmation(&mut *out, &confirmation)?;

    Ok(())
}
