//! Invoices page.
//!
//! Invoices and clients load together; the client list feeds the picker in
//! the invoice dialog and the name column of the table.

use std::sync::Arc;

use businessos_core::finance::{
    Client, ClientInput, Invoice, InvoiceInput, InvoiceStatus, InvoiceTotals, amount,
    compute_totals,
};
use businessos_core::ports::{ClientApi, InvoiceApi};
use businessos_core::validate_input;
use businessos_shared::types::{ClientId, InvoiceId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// State of the invoices page.
pub struct InvoicesView {
    invoices_api: Arc<dyn InvoiceApi>,
    clients_api: Arc<dyn ClientApi>,
    scope: ViewScope,
    invoices: Vec<Invoice>,
    clients: Vec<Client>,
    status: Option<InvoiceStatus>,
}

impl InvoicesView {
    /// Empty page.
    pub fn new(
        invoices_api: Arc<dyn InvoiceApi>,
        clients_api: Arc<dyn ClientApi>,
        notifier: Notifier,
    ) -> Self {
        Self {
            invoices_api,
            clients_api,
            scope: ViewScope::new(notifier),
            invoices: Vec::new(),
            clients: Vec::new(),
            status: None,
        }
    }

    /// Lifetime of the page.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Invoices as last fetched.
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Clients as last fetched.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Restricts the table to one status.
    pub fn set_status(&mut self, status: Option<InvoiceStatus>) {
        self.status = status;
    }

    /// Invoices passing the status filter, newest issue date first.
    pub fn visible(&self) -> Vec<&Invoice> {
        let mut out: Vec<&Invoice> = self
            .invoices
            .iter()
            .filter(|i| self.status.is_none_or(|s| s == i.status))
            .collect();
        out.sort_by(|a, b| b.issue_date.cmp(&a.issue_date));
        out
    }

    /// Display name of a client, company first.
    pub fn client_name(&self, id: ClientId) -> Option<&str> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.company.as_deref().unwrap_or(&c.name))
    }

    /// Unpaid invoices past due on `today`.
    pub fn past_due(&self, today: NaiveDate) -> Vec<&Invoice> {
        self.invoices.iter().filter(|i| i.is_past_due(today)).collect()
    }

    /// Sum of unpaid invoice totals.
    pub fn outstanding(&self) -> Decimal {
        amount::total(
            self.invoices
                .iter()
                .filter(|i| matches!(i.status, InvoiceStatus::Sent | InvoiceStatus::Overdue))
                .map(|i| i.total),
        )
    }

    /// Totals shown live in the invoice dialog.
    pub fn preview(input: &InvoiceInput) -> InvoiceTotals {
        compute_totals(&input.items, input.tax_rate)
    }

    /// Fetches invoices and clients together; on failure neither list changes.
    pub async fn load(&mut self) -> bool {
        let invoices = &self.invoices_api;
        let clients = &self.clients_api;
        let fetched = self
            .scope
            .run("Failed to load invoices", async {
                tokio::try_join!(invoices.list_invoices(), clients.list_clients())
            })
            .await;
        let Some((invoices, clients)) = fetched else {
            return false;
        };
        self.invoices = invoices;
        self.clients = clients;
        true
    }

    /// Creates an invoice and re-fetches.
    pub async fn create(&mut self, input: InvoiceInput) -> bool {
        const TITLE: &str = "Failed to create invoice";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(invoice) = self
            .scope
            .run(TITLE, self.invoices_api.create_invoice(&input))
            .await
        else {
            return false;
        };
        self.scope
            .notifier()
            .success("Invoice created", invoice.invoice_number);
        self.load().await
    }

    /// Saves an invoice and re-fetches.
    pub async fn update(&mut self, id: InvoiceId, input: InvoiceInput) -> bool {
        const TITLE: &str = "Failed to update invoice";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        if self
            .scope
            .run(TITLE, self.invoices_api.update_invoice(id, &input))
            .await
            .is_none()
        {
            return false;
        }
        self.scope
            .notifier()
            .success("Invoice updated", input.invoice_number);
        self.load().await
    }

    /// Deletes an invoice and re-fetches.
    pub async fn delete(&mut self, id: InvoiceId) -> bool {
        if self
            .scope
            .run("Failed to delete invoice", self.invoices_api.delete_invoice(id))
            .await
            .is_none()
        {
            return false;
        }
        self.scope
            .notifier()
            .success("Invoice deleted", "The invoice was removed");
        self.load().await
    }

    /// Adds a billing client and re-fetches.
    pub async fn add_client(&mut self, input: ClientInput) -> bool {
        const TITLE: &str = "Failed to add client";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(client) = self
            .scope
            .run(TITLE, self.clients_api.create_client(&input))
            .await
        else {
            return false;
        };
        self.scope.notifier().success("Client added", client.name);
        self.load().await
    }

    /// Closes the page.
    pub fn close(&self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockClients, MockInvoices, server_error};
    use businessos_core::finance::InvoiceItem;
    use rust_decimal_macros::dec;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn client() -> Client {
        Client {
            id: ClientId::new(),
            name: "Jordan Price".into(),
            email: None,
            phone: None,
            company: Some("Acme Corp".into()),
            address: None,
        }
    }

    fn invoice(
        client: ClientId,
        number: &str,
        issued: NaiveDate,
        status: InvoiceStatus,
        total: Decimal,
    ) -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            invoice_number: number.into(),
            client_id: client,
            issue_date: issued,
            due_date: issued + chrono::Duration::days(30),
            status,
            subtotal: total,
            tax_rate: Decimal::ZERO,
            tax: Decimal::ZERO,
            total,
            notes: None,
            items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_load_joins_invoices_and_clients() {
        let acme = client();
        let invoices = vec![
            invoice(acme.id, "INV-001", date(1, 10), InvoiceStatus::Paid, dec!(500)),
            invoice(acme.id, "INV-002", date(3, 1), InvoiceStatus::Sent, dec!(3420)),
            invoice(acme.id, "INV-003", date(2, 5), InvoiceStatus::Overdue, dec!(80)),
        ];
        let mut inv = MockInvoices::new();
        let listed = invoices.clone();
        inv.expect_list_invoices().returning(move || Ok(listed.clone()));
        let mut cli = MockClients::new();
        let c = acme.clone();
        cli.expect_list_clients().returning(move || Ok(vec![c.clone()]));

        let mut view = InvoicesView::new(Arc::new(inv), Arc::new(cli), Notifier::new());
        assert!(view.load().await);

        let numbers: Vec<_> = view.visible().iter().map(|i| i.invoice_number.as_str()).collect();
        assert_eq!(numbers, ["INV-002", "INV-003", "INV-001"]);
        assert_eq!(view.client_name(acme.id), Some("Acme Corp"));
        assert_eq!(view.outstanding(), dec!(3500));
        assert_eq!(view.past_due(date(3, 20)).len(), 1);
    }

    #[tokio::test]
    async fn test_client_failure_leaves_both_lists() {
        let mut inv = MockInvoices::new();
        inv.expect_list_invoices().returning(|| Ok(Vec::new()));
        let mut cli = MockClients::new();
        cli.expect_list_clients().returning(|| Err(server_error()));

        let notifier = Notifier::new();
        let mut view = InvoicesView::new(Arc::new(inv), Arc::new(cli), notifier.clone());
        assert!(!view.load().await);
        assert!(view.invoices().is_empty());
        assert!(view.clients().is_empty());
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_preview_matches_line_arithmetic() {
        let input = InvoiceInput {
            invoice_number: "INV-010".into(),
            client_id: ClientId::new(),
            issue_date: date(4, 1),
            due_date: date(4, 30),
            status: InvoiceStatus::Draft,
            tax_rate: dec!(10),
            notes: None,
            items: vec![
                InvoiceItem::new("Consulting hours", dec!(20), dec!(150)),
                InvoiceItem::new("Travel expenses", dec!(1), dec!(420)),
            ],
        };
        let totals = InvoicesView::preview(&input);
        assert_eq!(totals.subtotal, dec!(3420));
        assert_eq!(totals.tax, dec!(342));
        assert_eq!(totals.total, dec!(3762));
    }

    #[tokio::test]
    async fn test_invoice_without_lines_is_rejected_locally() {
        let mut inv = MockInvoices::new();
        inv.expect_create_invoice().never();
        let notifier = Notifier::new();
        let mut view =
            InvoicesView::new(Arc::new(inv), Arc::new(MockClients::new()), notifier.clone());

        let input = InvoiceInput {
            invoice_number: "INV-011".into(),
            client_id: ClientId::new(),
            issue_date: date(4, 1),
            due_date: date(4, 30),
            status: InvoiceStatus::Draft,
            tax_rate: dec!(0),
            notes: None,
            items: Vec::new(),
        };
        assert!(!view.create(input).await);
        assert_eq!(notifier.drain()[0].message, "Add at least one line item");
    }
}
