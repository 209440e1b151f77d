//! `/api/finance` services.

use async_trait::async_trait;
use businessos_core::finance::{
    Budget, BudgetCategory, BudgetCategoryInput, BudgetInput, BudgetPerformance, Client,
    ClientInput, Invoice, InvoiceInput, InvoicePayload, Transaction, TransactionInput,
};
use businessos_core::ports::{BudgetApi, ClientApi, InvoiceApi, TransactionApi};
use businessos_shared::AppResult;
use businessos_shared::types::{BudgetCategoryId, BudgetId, ClientId, InvoiceId, TransactionId};

use crate::http::ApiClient;

/// Budgets and categories over REST.
#[derive(Debug, Clone)]
pub struct BudgetService {
    api: ApiClient,
}

impl BudgetService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BudgetApi for BudgetService {
    async fn list_budgets(&self) -> AppResult<Vec<Budget>> {
        self.api.get("/api/finance/budgets").await
    }

    async fn get_budget(&self, id: BudgetId) -> AppResult<Budget> {
        self.api.get(&format!("/api/finance/budgets/{id}")).await
    }

    async fn create_budget(&self, input: &BudgetInput) -> AppResult<Budget> {
        self.api.post("/api/finance/budgets", input).await
    }

    async fn update_budget(&self, id: BudgetId, input: &BudgetInput) -> AppResult<Budget> {
        self.api
            .put(&format!("/api/finance/budgets/{id}"), input)
            .await
    }

    async fn delete_budget(&self, id: BudgetId) -> AppResult<()> {
        self.api.delete(&format!("/api/finance/budgets/{id}")).await
    }

    async fn list_categories(&self, budget: BudgetId) -> AppResult<Vec<BudgetCategory>> {
        self.api
            .get(&format!("/api/finance/budgets/{budget}/categories"))
            .await
    }

    async fn create_category(
        &self,
        budget: BudgetId,
        input: &BudgetCategoryInput,
    ) -> AppResult<BudgetCategory> {
        self.api
            .post(&format!("/api/finance/budgets/{budget}/categories"), input)
            .await
    }

    async fn update_category(
        &self,
        budget: BudgetId,
        id: BudgetCategoryId,
        input: &BudgetCategoryInput,
    ) -> AppResult<BudgetCategory> {
        self.api
            .put(
                &format!("/api/finance/budgets/{budget}/categories/{id}"),
                input,
            )
            .await
    }

    async fn delete_category(&self, budget: BudgetId, id: BudgetCategoryId) -> AppResult<()> {
        self.api
            .delete(&format!("/api/finance/budgets/{budget}/categories/{id}"))
            .await
    }

    async fn performance(&self, budget: BudgetId) -> AppResult<BudgetPerformance> {
        self.api
            .get(&format!("/api/finance/budgets/{budget}/performance"))
            .await
    }
}

/// Invoices over REST. Totals travel with every write.
#[derive(Debug, Clone)]
pub struct InvoiceService {
    api: ApiClient,
}

impl InvoiceService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl InvoiceApi for InvoiceService {
    async fn list_invoices(&self) -> AppResult<Vec<Invoice>> {
        self.api.get("/api/finance/invoices").await
    }

    async fn get_invoice(&self, id: InvoiceId) -> AppResult<Invoice> {
        self.api.get(&format!("/api/finance/invoices/{id}")).await
    }

    async fn create_invoice(&self, input: &InvoiceInput) -> AppResult<Invoice> {
        self.api
            .post("/api/finance/invoices", &InvoicePayload::new(input))
            .await
    }

    async fn update_invoice(&self, id: InvoiceId, input: &InvoiceInput) -> AppResult<Invoice> {
        self.api
            .put(
                &format!("/api/finance/invoices/{id}"),
                &InvoicePayload::new(input),
            )
            .await
    }

    async fn delete_invoice(&self, id: InvoiceId) -> AppResult<()> {
        self.api.delete(&format!("/api/finance/invoices/{id}")).await
    }
}

/// Billing clients over REST.
#[derive(Debug, Clone)]
pub struct ClientService {
    api: ApiClient,
}

impl ClientService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ClientApi for ClientService {
    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.api.get("/api/finance/clients").await
    }

    async fn create_client(&self, input: &ClientInput) -> AppResult<Client> {
        self.api.post("/api/finance/clients", input).await
    }

    async fn update_client(&self, id: ClientId, input: &ClientInput) -> AppResult<Client> {
        self.api
            .put(&format!("/api/finance/clients/{id}"), input)
            .await
    }

    async fn delete_client(&self, id: ClientId) -> AppResult<()> {
        self.api.delete(&format!("/api/finance/clients/{id}")).await
    }
}

/// Transactions over REST.
#[derive(Debug, Clone)]
pub struct TransactionService {
    api: ApiClient,
}

impl TransactionService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TransactionApi for TransactionService {
    async fn list_transactions(&self) -> AppResult<Vec<Transaction>> {
        self.api.get("/api/finance/transactions").await
    }

    async fn create_transaction(&self, input: &TransactionInput) -> AppResult<Transaction> {
        self.api.post("/api/finance/transactions", input).await
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        input: &TransactionInput,
    ) -> AppResult<Transaction> {
        self.api
            .put(&format!("/api/finance/transactions/{id}"), input)
            .await
    }

    async fn delete_transaction(&self, id: TransactionId) -> AppResult<()> {
        self.api
            .delete(&format!("/api/finance/transactions/{id}"))
            .await
    }
}
