//! Budget, category, invoice, client and transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use businessos_core::activity::ActivityKind;
use businessos_core::finance::{
    Budget, BudgetCategory, BudgetCategoryInput, BudgetInput, BudgetPerformance, Client,
    ClientInput, Invoice, InvoiceInput, InvoiceItem, Transaction, TransactionInput,
    compute_totals, derive_performance,
};
use businessos_core::validate_input;
use businessos_shared::AppError;
use businessos_shared::types::{BudgetCategoryId, BudgetId, ClientId, InvoiceId, TransactionId};
use chrono::Utc;
use tracing::debug;

use crate::StubState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the finance routes.
pub fn routes() -> Router<StubState> {
    Router::new()
        .route("/finance/budgets", get(list_budgets).post(create_budget))
        .route(
            "/finance/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
        .route(
            "/finance/budgets/{id}/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/finance/budgets/{id}/categories/{category_id}",
            put(update_category).delete(delete_category),
        )
        .route("/finance/budgets/{id}/performance", get(performance))
        .route("/finance/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/finance/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
        .route("/finance/clients", get(list_clients).post(create_client))
        .route(
            "/finance/clients/{id}",
            put(update_client).delete(delete_client),
        )
        .route(
            "/finance/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/finance/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
}

// Budgets

/// GET `/finance/budgets`
async fn list_budgets(State(state): State<StubState>) -> Json<Vec<Budget>> {
    Json(state.store.budgets.list())
}

/// GET `/finance/budgets/{id}`
async fn get_budget(
    State(state): State<StubState>,
    Path(id): Path<BudgetId>,
) -> ApiResult<Json<Budget>> {
    state
        .store
        .budgets
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Budget"))
}

/// POST `/finance/budgets`
async fn create_budget(
    State(state): State<StubState>,
    auth: AuthUser,
    Json(input): Json<BudgetInput>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    validate_input(&input)?;
    let budget = Budget {
        id: BudgetId::new(),
        name: input.name.trim().to_string(),
        description: input.description,
        total_amount: input.total_amount,
        start_date: input.start_date,
        end_date: input.end_date,
        fiscal_year: input.fiscal_year,
        status: input.status,
        created_at: Some(Utc::now()),
    };
    let budget = state.store.budgets.insert(budget.id, budget);
    state.store.record(
        auth.email(),
        "created",
        ActivityKind::Finance,
        format!("Budget {} created", budget.name),
    );
    Ok((StatusCode::CREATED, Json(budget)))
}

/// PUT `/finance/budgets/{id}`
async fn update_budget(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<BudgetId>,
    Json(input): Json<BudgetInput>,
) -> ApiResult<Json<Budget>> {
    validate_input(&input)?;
    let budget = state
        .store
        .budgets
        .update(id, |b| {
            b.name = input.name.trim().to_string();
            b.description = input.description;
            b.total_amount = input.total_amount;
            b.start_date = input.start_date;
            b.end_date = input.end_date;
            b.fiscal_year = input.fiscal_year;
            b.status = input.status;
        })
        .ok_or_else(|| ApiError::not_found("Budget"))?;
    state.store.record(
        auth.email(),
        "updated",
        ActivityKind::Finance,
        format!("Budget {} updated", budget.name),
    );
    Ok(Json(budget))
}

/// DELETE `/finance/budgets/{id}` - Also removes the budget's categories.
async fn delete_budget(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<BudgetId>,
) -> ApiResult<StatusCode> {
    let budget = state
        .store
        .budgets
        .remove(id)
        .ok_or_else(|| ApiError::not_found("Budget"))?;
    state.store.categories.retain(|c| c.budget_id != id);
    state.store.record(
        auth.email(),
        "deleted",
        ActivityKind::Finance,
        format!("Budget {} deleted", budget.name),
    );
    Ok(StatusCode::NO_CONTENT)
}

// Categories

fn require_budget(state: &StubState, id: BudgetId) -> ApiResult<Budget> {
    state
        .store
        .budgets
        .get(id)
        .ok_or_else(|| ApiError::not_found("Budget"))
}

fn ensure_unique_category(
    state: &StubState,
    budget_id: BudgetId,
    name: &str,
    except: Option<BudgetCategoryId>,
) -> ApiResult<()> {
    let clash = state.store.categories.filter(|c| {
        c.budget_id == budget_id && Some(c.id) != except && c.name.eq_ignore_ascii_case(name.trim())
    });
    if clash.is_empty() {
        Ok(())
    } else {
        let message = format!("Category {} already exists in this budget", name.trim());
        Err(AppError::Conflict(message).into())
    }
}

/// GET `/finance/budgets/{id}/categories`
async fn list_categories(
    State(state): State<StubState>,
    Path(id): Path<BudgetId>,
) -> ApiResult<Json<Vec<BudgetCategory>>> {
    require_budget(&state, id)?;
    Ok(Json(state.store.categories.filter(|c| c.budget_id == id)))
}

/// POST `/finance/budgets/{id}/categories`
async fn create_category(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<BudgetId>,
    Json(input): Json<BudgetCategoryInput>,
) -> ApiResult<(StatusCode, Json<BudgetCategory>)> {
    validate_input(&input)?;
    let budget = require_budget(&state, id)?;
    ensure_unique_category(&state, id, &input.name, None)?;
    let category = BudgetCategory {
        id: BudgetCategoryId::new(),
        budget_id: id,
        name: input.name.trim().to_string(),
        description: input.description,
        allocated_amount: input.allocated_amount,
    };
    let category = state.store.categories.insert(category.id, category);
    state.store.record(
        auth.email(),
        "added a category to",
        ActivityKind::Finance,
        format!("{} added to {}", category.name, budget.name),
    );
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT `/finance/budgets/{id}/categories/{category_id}`
async fn update_category(
    State(state): State<StubState>,
    Path((id, category_id)): Path<(BudgetId, BudgetCategoryId)>,
    Json(input): Json<BudgetCategoryInput>,
) -> ApiResult<Json<BudgetCategory>> {
    validate_input(&input)?;
    require_budget(&state, id)?;
    if !state
        .store
        .categories
        .get(category_id)
        .is_some_and(|c| c.budget_id == id)
    {
        return Err(ApiError::not_found("Category"));
    }
    ensure_unique_category(&state, id, &input.name, Some(category_id))?;
    state
        .store
        .categories
        .update(category_id, |c| {
            c.name = input.name.trim().to_string();
            c.description = input.description;
            c.allocated_amount = input.allocated_amount;
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category"))
}

/// DELETE `/finance/budgets/{id}/categories/{category_id}`
async fn delete_category(
    State(state): State<StubState>,
    Path((id, category_id)): Path<(BudgetId, BudgetCategoryId)>,
) -> ApiResult<StatusCode> {
    match state.store.categories.get(category_id) {
        Some(c) if c.budget_id == id => {
            state.store.categories.remove(category_id);
            Ok(StatusCode::NO_CONTENT)
        }
        _ => Err(ApiError::not_found("Category")),
    }
}

/// GET `/finance/budgets/{id}/performance`
async fn performance(
    State(state): State<StubState>,
    Path(id): Path<BudgetId>,
) -> ApiResult<Json<BudgetPerformance>> {
    let budget = require_budget(&state, id)?;
    let categories = state.store.categories.filter(|c| c.budget_id == id);
    let transactions = state.store.transactions.list();
    debug!(budget = %budget.name, categories = categories.len(), "deriving performance");
    Ok(Json(derive_performance(&budget, &categories, &transactions)))
}

// Invoices

/// Rebuilds the invoice from its lines; client-sent totals are ignored.
fn build_invoice(id: InvoiceId, input: InvoiceInput) -> Invoice {
    let items: Vec<InvoiceItem> = input
        .items
        .into_iter()
        .map(|item| InvoiceItem::new(item.description, item.quantity, item.unit_price))
        .collect();
    let totals = compute_totals(&items, input.tax_rate);
    Invoice {
        id,
        invoice_number: input.invoice_number.trim().to_string(),
        client_id: input.client_id,
        issue_date: input.issue_date,
        due_date: input.due_date,
        status: input.status,
        subtotal: totals.subtotal,
        tax_rate: input.tax_rate,
        tax: totals.tax,
        total: totals.total,
        notes: input.notes,
        items,
    }
}

fn check_invoice(
    state: &StubState,
    input: &InvoiceInput,
    except: Option<InvoiceId>,
) -> ApiResult<()> {
    validate_input(input)?;
    if !state.store.clients.contains(input.client_id) {
        return Err(AppError::Validation("Unknown client".into()).into());
    }
    let number = input.invoice_number.trim();
    if !state
        .store
        .invoices
        .filter(|i| Some(i.id) != except && i.invoice_number == number)
        .is_empty()
    {
        return Err(AppError::Conflict(format!("Invoice {number} already exists")).into());
    }
    Ok(())
}

/// GET `/finance/invoices`
async fn list_invoices(State(state): State<StubState>) -> Json<Vec<Invoice>> {
    Json(state.store.invoices.list())
}

/// GET `/finance/invoices/{id}`
async fn get_invoice(
    State(state): State<StubState>,
    Path(id): Path<InvoiceId>,
) -> ApiResult<Json<Invoice>> {
    state
        .store
        .invoices
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Invoice"))
}

/// POST `/finance/invoices`
async fn create_invoice(
    State(state): State<StubState>,
    auth: AuthUser,
    Json(input): Json<InvoiceInput>,
) -> ApiResult<(StatusCode, Json<Invoice>)> {
    check_invoice(&state, &input, None)?;
    let id = InvoiceId::new();
    let invoice = state.store.invoices.insert(id, build_invoice(id, input));
    state.store.record(
        auth.email(),
        "issued",
        ActivityKind::Finance,
        format!("Invoice {} for {}", invoice.invoice_number, invoice.total),
    );
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// PUT `/finance/invoices/{id}`
async fn update_invoice(
    State(state): State<StubState>,
    Path(id): Path<InvoiceId>,
    Json(input): Json<InvoiceInput>,
) -> ApiResult<Json<Invoice>> {
    if !state.store.invoices.contains(id) {
        return Err(ApiError::not_found("Invoice"));
    }
    check_invoice(&state, &input, Some(id))?;
    let rebuilt = build_invoice(id, input);
    state
        .store
        .invoices
        .update(id, |invoice| *invoice = rebuilt)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Invoice"))
}

/// DELETE `/finance/invoices/{id}`
async fn delete_invoice(
    State(state): State<StubState>,
    Path(id): Path<InvoiceId>,
) -> ApiResult<StatusCode> {
    state
        .store
        .invoices
        .remove(id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError::not_found("Invoice"))
}

// Clients

/// GET `/finance/clients`
async fn list_clients(State(state): State<StubState>) -> Json<Vec<Client>> {
    Json(state.store.clients.list())
}

/// POST `/finance/clients`
async fn create_client(
    State(state): State<StubState>,
    Json(input): Json<ClientInput>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    validate_input(&input)?;
    let client = Client {
        id: ClientId::new(),
        name: input.name.trim().to_string(),
        email: input.email,
        phone: input.phone,
        company: input.company,
        address: input.address,
    };
    Ok((
        StatusCode::CREATED,
        Json(state.store.clients.insert(client.id, client)),
    ))
}

/// PUT `/finance/clients/{id}`
async fn update_client(
    State(state): State<StubState>,
    Path(id): Path<ClientId>,
    Json(input): Json<ClientInput>,
) -> ApiResult<Json<Client>> {
    validate_input(&input)?;
    state
        .store
        .clients
        .update(id, |c| {
            c.name = input.name.trim().to_string();
            c.email = input.email;
            c.phone = input.phone;
            c.company = input.company;
            c.address = input.address;
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Client"))
}

/// DELETE `/finance/clients/{id}` - Refused while invoices reference the client.
async fn delete_client(
    State(state): State<StubState>,
    Path(id): Path<ClientId>,
) -> ApiResult<StatusCode> {
    if !state.store.clients.contains(id) {
        return Err(ApiError::not_found("Client"));
    }
    let billed = state.store.invoices.filter(|i| i.client_id == id).len();
    if billed > 0 {
        return Err(AppError::Conflict(format!("Client has {billed} invoice(s)")).into());
    }
    state.store.clients.remove(id);
    Ok(StatusCode::NO_CONTENT)
}

// Transactions

/// GET `/finance/transactions`
async fn list_transactions(State(state): State<StubState>) -> Json<Vec<Transaction>> {
    Json(state.store.transactions.list())
}

/// POST `/finance/transactions`
async fn create_transaction(
    State(state): State<StubState>,
    auth: AuthUser,
    Json(input): Json<TransactionInput>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    validate_input(&input)?;
    let tx = Transaction {
        id: TransactionId::new(),
        date: input.date,
        description: input.description,
        transaction_type: input.transaction_type,
        category: input.category.trim().to_string(),
        amount: input.amount,
    };
    let tx = state.store.transactions.insert(tx.id, tx);
    state.store.record(
        auth.email(),
        "booked",
        ActivityKind::Finance,
        format!("{:?} of {} in {}", tx.transaction_type, tx.amount, tx.category),
    );
    Ok((StatusCode::CREATED, Json(tx)))
}

/// PUT `/finance/transactions/{id}`
async fn update_transaction(
    State(state): State<StubState>,
    Path(id): Path<TransactionId>,
    Json(input): Json<TransactionInput>,
) -> ApiResult<Json<Transaction>> {
    validate_input(&input)?;
    state
        .store
        .transactions
        .update(id, |tx| {
            tx.date = input.date;
            tx.description = input.description;
            tx.transaction_type = input.transaction_type;
            tx.category = input.category.trim().to_string();
            tx.amount = input.amount;
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Transaction"))
}

/// DELETE `/finance/transactions/{id}`
async fn delete_transaction(
    State(state): State<StubState>,
    Path(id): Path<TransactionId>,
) -> ApiResult<StatusCode> {
    state
        .store
        .transactions
        .remove(id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError::not_found("Transaction"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{admin_token, app, request, send};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn seeded_budget(state: &StubState) -> Budget {
        state.store.budgets.list().remove(0)
    }

    #[tokio::test]
    async fn test_create_category_then_list_contains_it() {
        let (app, state) = app();
        let token = admin_token(&state);
        let budget = seeded_budget(&state);
        let uri = format!("/api/finance/budgets/{}/categories", budget.id);
        let body = json!({ "name": "Training", "allocated_amount": "2500.00" });

        let (status, created) = send(&app, request("POST", &uri, &token, Some(&body))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["budget_id"], budget.id.to_string());

        let (status, listed) = send(&app, request("GET", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        let categories: Vec<BudgetCategory> = serde_json::from_value(listed).unwrap();
        let training = categories.iter().find(|c| c.name == "Training").unwrap();
        assert_eq!(training.allocated_amount, dec!(2500));
        assert_eq!(categories.last().map(|c| c.name.as_str()), Some("Training"));
    }

    #[tokio::test]
    async fn test_blank_category_name_is_rejected() {
        let (app, state) = app();
        let token = admin_token(&state);
        let budget = seeded_budget(&state);
        let uri = format!("/api/finance/budgets/{}/categories", budget.id);
        let body = json!({ "name": "  ", "allocated_amount": "10" });

        let (status, body) = send(&app, request("POST", &uri, &token, Some(&body))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["msg"], "Category name is required");
    }

    #[tokio::test]
    async fn test_duplicate_category_conflicts() {
        let (app, state) = app();
        let token = admin_token(&state);
        let budget = seeded_budget(&state);
        let uri = format!("/api/finance/budgets/{}/categories", budget.id);
        let body = json!({ "name": "marketing", "allocated_amount": "10" });

        let (status, _) = send(&app, request("POST", &uri, &token, Some(&body))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_budget_is_not_found() {
        let (app, state) = app();
        let token = admin_token(&state);
        let uri = format!("/api/finance/budgets/{}/categories", BudgetId::new());

        let (status, body) = send(&app, request("GET", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Budget not found");
    }

    #[tokio::test]
    async fn test_performance_sums_seeded_expenses() {
        let (app, state) = app();
        let token = admin_token(&state);
        let budget = seeded_budget(&state);
        let uri = format!("/api/finance/budgets/{}/performance", budget.id);

        let (status, body) = send(&app, request("GET", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        let perf: BudgetPerformance = serde_json::from_value(body).unwrap();
        assert_eq!(perf.total_allocated, dec!(40000));
        assert_eq!(perf.total_spent, dec!(27750));
        let marketing = perf.categories.iter().find(|c| c.name == "Marketing").unwrap();
        assert_eq!(marketing.spent_amount, dec!(14100));
    }

    #[tokio::test]
    async fn test_delete_budget_removes_categories() {
        let (app, state) = app();
        let token = admin_token(&state);
        let budget = seeded_budget(&state);
        let uri = format!("/api/finance/budgets/{}", budget.id);

        let (status, _) = send(&app, request("DELETE", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.categories.filter(|c| c.budget_id == budget.id).is_empty());
    }

    #[tokio::test]
    async fn test_invoice_totals_are_recomputed() {
        let (app, state) = app();
        let token = admin_token(&state);
        let client = state.store.clients.list().remove(0);
        let body = json!({
            "invoice_number": "INV-2026-002",
            "client_id": client.id,
            "issue_date": "2026-04-01",
            "due_date": "2026-04-30",
            "status": "Draft",
            "tax_rate": "20",
            "notes": null,
            "items": [
                { "description": "Workshop", "quantity": "2", "unit_price": "300", "amount": "1" }
            ],
            "subtotal": "1",
            "tax": "1",
            "total": "1"
        });

        let (status, created) =
            send(&app, request("POST", "/api/finance/invoices", &token, Some(&body))).await;
        assert_eq!(status, StatusCode::CREATED);
        let invoice: Invoice = serde_json::from_value(created).unwrap();
        assert_eq!(invoice.items[0].amount, dec!(600));
        assert_eq!(invoice.subtotal, dec!(600));
        assert_eq!(invoice.total, dec!(720));
    }

    #[tokio::test]
    async fn test_client_with_invoices_cannot_be_deleted() {
        let (app, state) = app();
        let token = admin_token(&state);
        let client = state.store.clients.list().remove(0);
        let uri = format!("/api/finance/clients/{}", client.id);

        let (status, _) = send(&app, request("DELETE", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_negative_transaction_amount_rejected() {
        let (app, state) = app();
        let token = admin_token(&state);
        let before = state.store.transactions.len();
        let body = json!({
            "date": "2026-05-01",
            "description": "Refund",
            "type": "Expense",
            "category": "Office",
            "amount": Decimal::NEGATIVE_ONE,
        });

        let (status, _) =
            send(&app, request("POST", "/api/finance/transactions", &token, Some(&body))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.store.transactions.len(), before);
    }
}
