//! Invoices, line items and billing clients.

use businessos_shared::types::{ClientId, InvoiceId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::amount::total;
use crate::validation::{non_negative, not_blank, positive};

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Not yet sent.
    #[default]
    Draft,
    /// Sent to the client.
    Sent,
    /// Settled.
    Paid,
    /// Past due and unpaid.
    Overdue,
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct InvoiceItem {
    /// Line description.
    #[validate(custom(function = "not_blank", message = "Item description is required"))]
    pub description: String,
    /// Quantity.
    #[validate(custom(function = "positive"))]
    pub quantity: Decimal,
    /// Price per unit.
    #[validate(custom(function = "non_negative"))]
    pub unit_price: Decimal,
    /// `quantity × unit_price`.
    pub amount: Decimal,
}

impl InvoiceItem {
    /// Creates a line with its amount computed.
    #[must_use]
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            amount: quantity.saturating_mul(unit_price).round_dp(2),
        }
    }
}

/// Subtotal, tax and total for a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line amounts.
    pub subtotal: Decimal,
    /// `subtotal × tax_rate / 100`, rounded to cents.
    pub tax: Decimal,
    /// `subtotal + tax`.
    pub total: Decimal,
}

/// Computes invoice totals. `tax_rate` is a percentage (e.g. `10` for 10%).
#[must_use]
pub fn compute_totals(items: &[InvoiceItem], tax_rate: Decimal) -> InvoiceTotals {
    let subtotal = total(items.iter().map(|i| i.quantity.saturating_mul(i.unit_price)));
    let subtotal = subtotal.round_dp(2);
    let tax = (subtotal.saturating_mul(tax_rate) / Decimal::ONE_HUNDRED).round_dp(2);
    InvoiceTotals {
        subtotal,
        tax,
        total: subtotal.saturating_add(tax),
    }
}

/// An invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Human-facing number, e.g. `INV-2026-001`.
    pub invoice_number: String,
    /// Billed client.
    pub client_id: ClientId,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Status.
    pub status: InvoiceStatus,
    /// Sum of lines.
    pub subtotal: Decimal,
    /// Tax percentage.
    #[serde(default)]
    pub tax_rate: Decimal,
    /// Tax amount.
    pub tax: Decimal,
    /// Grand total.
    pub total: Decimal,
    /// Notes printed on the invoice.
    #[serde(default)]
    pub notes: Option<String>,
    /// Lines.
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

impl Invoice {
    /// True if unpaid and past its due date on `today`.
    #[must_use]
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        matches!(self.status, InvoiceStatus::Sent | InvoiceStatus::Overdue) && self.due_date < today
    }
}

/// Input for creating or updating an invoice. Totals are derived from the lines.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_invoice_dates"))]
pub struct InvoiceInput {
    /// Human-facing number.
    #[validate(custom(function = "not_blank", message = "Invoice number is required"))]
    pub invoice_number: String,
    /// Billed client.
    pub client_id: ClientId,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Status.
    pub status: InvoiceStatus,
    /// Tax percentage.
    #[validate(custom(function = "non_negative"))]
    pub tax_rate: Decimal,
    /// Notes.
    pub notes: Option<String>,
    /// Lines.
    #[validate(length(min = 1, message = "Add at least one line item"), nested)]
    pub items: Vec<InvoiceItem>,
}

fn validate_invoice_dates(input: &InvoiceInput) -> Result<(), ValidationError> {
    if input.due_date < input.issue_date {
        return Err(ValidationError::new("dates")
            .with_message("Due date must be on or after the issue date".into()));
    }
    Ok(())
}

/// Request body sent to the backend: input plus computed totals.
#[derive(Debug, Clone, Serialize)]
pub struct InvoicePayload<'a> {
    /// The form input.
    #[serde(flatten)]
    pub input: &'a InvoiceInput,
    /// Computed totals.
    #[serde(flatten)]
    pub totals: InvoiceTotals,
}

impl<'a> InvoicePayload<'a> {
    /// Builds the payload with totals computed from the lines.
    #[must_use]
    pub fn new(input: &'a InvoiceInput) -> Self {
        Self {
            totals: compute_totals(&input.items, input.tax_rate),
            input,
        }
    }
}

/// A billing client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// Contact name.
    pub name: String,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Company.
    #[serde(default)]
    pub company: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
}

/// Input for creating or updating a client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientInput {
    /// Contact name.
    #[validate(custom(function = "not_blank", message = "Client name is required"))]
    pub name: String,
    /// Email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}
