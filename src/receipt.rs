//! Receipt
//!
//! Order summary shown beside the payment options, and the confirmation
//! printed once the order is placed.

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    checkout::OrderConfirmation,
    pricing::{PricingError, TaxRate, Totals},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// One row of the summary: `"{quantity} x {name}"` and its line total.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine<'a> {
    /// Quantity and name, e.g. `2 x Latte`
    pub label: String,

    /// Unit price multiplied by quantity
    pub amount: Money<'a, Currency>,
}

/// What the customer is about to pay for.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary<'a> {
    lines: SmallVec<[SummaryLine<'a>; 8]>,
    tax_rate: TaxRate,
    totals: Totals<'a>,
}

impl<'a> OrderSummary<'a> {
    /// Summarise `cart` with tax charged at `tax_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any amount doesn't fit in minor units.
    pub fn new(cart: &Cart<'a>, tax_rate: TaxRate) -> Result<Self, PricingError> {
        let lines: SmallVec<[SummaryLine<'a>; 8]> = cart
            .iter()
            .map(|line| {
                Ok(SummaryLine {
                    label: format!("{} x {}", line.quantity(), line.name()),
                    amount: line.line_total()?,
                })
            })
            .collect::<Result<_, PricingError>>()?;

        Ok(Self {
            lines,
            tax_rate,
            totals: Totals::new(cart.total_price()?, tax_rate)?,
        })
    }

    /// Summary rows, in cart order
    pub fn lines(&self) -> &[SummaryLine<'a>] {
        &self.lines
    }

    /// Subtotal, tax and total
    pub fn totals(&self) -> Totals<'a> {
        self.totals
    }

    /// Write the summary as a table.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Amount"]);

        for line in &self.lines {
            builder.push_record([line.label.clone(), line.amount.to_string()]);
        }

        let item_rows = self.lines.len() + 1;

        builder.push_record(["Subtotal".to_string(), self.totals.subtotal.to_string()]);
        builder.push_record([
            format!("Tax ({}%)", self.tax_rate.percent_points()),
            self.totals.tax.to_string(),
        ]);
        builder.push_record(["Total".to_string(), self.totals.total.to_string()]);

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);
        theme.insert_horizontal_line(item_rows, separator);

        table.with(theme);
        table.modify(Columns::last(), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
    }
}

/// Write the confirmation page for a placed order.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if writing to `out` fails.
pub fn write_confirmation(
    mut out: impl io::Write,
    confirmation: &OrderConfirmation,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Order Number", confirmation.order_number.as_str()]);
    builder.push_record(["Payment Method", confirmation.payment_method.name()]);
    builder.push_record(["Estimated Ready", confirmation.estimated_ready_time]);
    builder.push_record(["Pickup Location", confirmation.pickup_location]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    writeln!(out, "\nOrder Confirmed!\n{table}\n{}", confirmation.instructions)
        .map_err(|_err| ReceiptError::IO)
}
