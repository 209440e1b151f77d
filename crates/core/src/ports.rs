//! Service ports.
//!
//! One trait per REST resource group. The REST client implements them and
//! the view-models depend only on these traits, so views can be driven by
//! any backend (the HTTP client, the in-memory stub, or a mock).
//!
//! Every method either returns the parsed payload or an [`AppError`]. No
//! method retries.
//!
//! [`AppError`]: businessos_shared::AppError

use async_trait::async_trait;
use businessos_shared::AppResult;
use businessos_shared::types::{
    BudgetCategoryId, BudgetId, ChannelId, ClientId, DepartmentId, DocumentId, DocumentShareId,
    DocumentVersionId, EmployeeId, EventId, InvoiceId, PermissionId, RoleId, TaskId, TransactionId,
    UserId,
};

use crate::activity::ActivityItem;
use crate::admin::{
    Permission, Profile, Role, RoleInput, RolePermission, RoleUser, UpdateProfileInput,
    UserStatus,
};
use crate::calendar::{CalendarEvent, CalendarEventInput};
use crate::chat::{ChatChannel, ChatMessage, NewMessage};
use crate::documents::{
    DocumentShare, DocumentVersion, NewVersionInput, PermissionLevel, ShareInput,
};
use crate::finance::{
    Budget, BudgetCategory, BudgetCategoryInput, BudgetInput, BudgetPerformance, Client,
    ClientInput, Invoice, InvoiceInput, Transaction, TransactionInput,
};
use crate::hr::{Department, DepartmentInput, Employee, EmployeeInput};
use crate::tasks::{Task, TaskInput};

/// Users, roles and permissions (`/api/admin`).
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// All user profiles.
    async fn list_users(&self) -> AppResult<Vec<Profile>>;
    /// One profile.
    async fn get_user(&self, id: UserId) -> AppResult<Profile>;
    /// Partial profile update.
    async fn update_user(&self, id: UserId, input: &UpdateProfileInput) -> AppResult<Profile>;
    /// Activates or deactivates a user.
    async fn set_user_status(&self, id: UserId, status: UserStatus) -> AppResult<Profile>;

    /// All roles.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;
    /// One role.
    async fn get_role(&self, id: RoleId) -> AppResult<Role>;
    /// Creates a role.
    async fn create_role(&self, input: &RoleInput) -> AppResult<Role>;
    /// Renames or re-describes a role.
    async fn update_role(&self, id: RoleId, input: &RoleInput) -> AppResult<Role>;
    /// Deletes a non-system role.
    async fn delete_role(&self, id: RoleId) -> AppResult<()>;

    /// Permission catalogue.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;
    /// Permissions currently granted to a role.
    async fn role_permissions(&self, id: RoleId) -> AppResult<Vec<RolePermission>>;
    /// Replaces the role's permission set.
    async fn set_role_permissions(
        &self,
        id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()>;
    /// Users holding a role.
    async fn role_users(&self, id: RoleId) -> AppResult<Vec<RoleUser>>;
}

/// Budgets, their categories and performance (`/api/finance/budgets`).
#[async_trait]
pub trait BudgetApi: Send + Sync {
    /// All budgets.
    async fn list_budgets(&self) -> AppResult<Vec<Budget>>;
    /// One budget.
    async fn get_budget(&self, id: BudgetId) -> AppResult<Budget>;
    /// Creates a budget.
    async fn create_budget(&self, input: &BudgetInput) -> AppResult<Budget>;
    /// Updates a budget.
    async fn update_budget(&self, id: BudgetId, input: &BudgetInput) -> AppResult<Budget>;
    /// Deletes a budget and its categories.
    async fn delete_budget(&self, id: BudgetId) -> AppResult<()>;

    /// Categories of a budget.
    async fn list_categories(&self, budget: BudgetId) -> AppResult<Vec<BudgetCategory>>;
    /// Adds a category.
    async fn create_category(
        &self,
        budget: BudgetId,
        input: &BudgetCategoryInput,
    ) -> AppResult<BudgetCategory>;
    /// Updates a category.
    async fn update_category(
        &self,
        budget: BudgetId,
        id: BudgetCategoryId,
        input: &BudgetCategoryInput,
    ) -> AppResult<BudgetCategory>;
    /// Removes a category.
    async fn delete_category(&self, budget: BudgetId, id: BudgetCategoryId) -> AppResult<()>;

    /// Backend-derived spending figures.
    async fn performance(&self, budget: BudgetId) -> AppResult<BudgetPerformance>;
}

/// Invoices (`/api/finance/invoices`).
#[async_trait]
pub trait InvoiceApi: Send + Sync {
    /// All invoices.
    async fn list_invoices(&self) -> AppResult<Vec<Invoice>>;
    /// One invoice.
    async fn get_invoice(&self, id: InvoiceId) -> AppResult<Invoice>;
    /// Creates an invoice; totals are computed from the lines before sending.
    async fn create_invoice(&self, input: &InvoiceInput) -> AppResult<Invoice>;
    /// Updates an invoice.
    async fn update_invoice(&self, id: InvoiceId, input: &InvoiceInput) -> AppResult<Invoice>;
    /// Deletes an invoice.
    async fn delete_invoice(&self, id: InvoiceId) -> AppResult<()>;
}

/// Billing clients (`/api/finance/clients`).
#[async_trait]
pub trait ClientApi: Send + Sync {
    /// All clients.
    async fn list_clients(&self) -> AppResult<Vec<Client>>;
    /// Creates a client.
    async fn create_client(&self, input: &ClientInput) -> AppResult<Client>;
    /// Updates a client.
    async fn update_client(&self, id: ClientId, input: &ClientInput) -> AppResult<Client>;
    /// Deletes a client.
    async fn delete_client(&self, id: ClientId) -> AppResult<()>;
}

/// Income and expense ledger (`/api/finance/transactions`).
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// All transactions.
    async fn list_transactions(&self) -> AppResult<Vec<Transaction>>;
    /// Records a transaction.
    async fn create_transaction(&self, input: &TransactionInput) -> AppResult<Transaction>;
    /// Updates a transaction.
    async fn update_transaction(
        &self,
        id: TransactionId,
        input: &TransactionInput,
    ) -> AppResult<Transaction>;
    /// Deletes a transaction.
    async fn delete_transaction(&self, id: TransactionId) -> AppResult<()>;
}

/// Employees and departments (`/api/hr`).
#[async_trait]
pub trait HrApi: Send + Sync {
    /// All employees.
    async fn list_employees(&self) -> AppResult<Vec<Employee>>;
    /// One employee.
    async fn get_employee(&self, id: EmployeeId) -> AppResult<Employee>;
    /// Creates an employee.
    async fn create_employee(&self, input: &EmployeeInput) -> AppResult<Employee>;
    /// Updates an employee.
    async fn update_employee(&self, id: EmployeeId, input: &EmployeeInput) -> AppResult<Employee>;
    /// Deletes an employee.
    async fn delete_employee(&self, id: EmployeeId) -> AppResult<()>;

    /// All departments.
    async fn list_departments(&self) -> AppResult<Vec<Department>>;
    /// Creates a department.
    async fn create_department(&self, input: &DepartmentInput) -> AppResult<Department>;
    /// Updates a department.
    async fn update_department(
        &self,
        id: DepartmentId,
        input: &DepartmentInput,
    ) -> AppResult<Department>;
    /// Deletes a department.
    async fn delete_department(&self, id: DepartmentId) -> AppResult<()>;
}

/// Document shares and versions (`/api/documents/{id}`).
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Shares of a document.
    async fn list_shares(&self, document: DocumentId) -> AppResult<Vec<DocumentShare>>;
    /// Shares a document.
    async fn share(&self, document: DocumentId, input: &ShareInput) -> AppResult<DocumentShare>;
    /// Changes a share's level.
    async fn update_share(
        &self,
        document: DocumentId,
        share: DocumentShareId,
        level: PermissionLevel,
    ) -> AppResult<DocumentShare>;
    /// Revokes a share.
    async fn revoke_share(&self, document: DocumentId, share: DocumentShareId) -> AppResult<()>;

    /// Version history as stored.
    async fn list_versions(&self, document: DocumentId) -> AppResult<Vec<DocumentVersion>>;
    /// Records an uploaded version.
    async fn add_version(
        &self,
        document: DocumentId,
        input: &NewVersionInput,
    ) -> AppResult<DocumentVersion>;
    /// Restores an old version as a new latest version.
    async fn restore_version(
        &self,
        document: DocumentId,
        version: DocumentVersionId,
    ) -> AppResult<DocumentVersion>;
}

/// Tasks (`/api/tasks`).
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// All tasks.
    async fn list_tasks(&self) -> AppResult<Vec<Task>>;
    /// Creates a task.
    async fn create_task(&self, input: &TaskInput) -> AppResult<Task>;
    /// Updates a task.
    async fn update_task(&self, id: TaskId, input: &TaskInput) -> AppResult<Task>;
    /// Deletes a task.
    async fn delete_task(&self, id: TaskId) -> AppResult<()>;
}

/// Calendar events (`/api/calendar/events`).
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// All events.
    async fn list_events(&self) -> AppResult<Vec<CalendarEvent>>;
    /// Creates an event.
    async fn create_event(&self, input: &CalendarEventInput) -> AppResult<CalendarEvent>;
    /// Updates an event.
    async fn update_event(&self, id: EventId, input: &CalendarEventInput)
    -> AppResult<CalendarEvent>;
    /// Deletes an event.
    async fn delete_event(&self, id: EventId) -> AppResult<()>;
}

/// Activity feed (`/api/activity`).
#[async_trait]
pub trait ActivityApi: Send + Sync {
    /// Recent activity, in backend order.
    async fn list_activity(&self) -> AppResult<Vec<ActivityItem>>;
}

/// Team chat (`/api/chat`).
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// All channels.
    async fn list_channels(&self) -> AppResult<Vec<ChatChannel>>;
    /// Messages of a channel.
    async fn list_messages(&self, channel: ChannelId) -> AppResult<Vec<ChatMessage>>;
    /// Posts a message.
    async fn send_message(&self, channel: ChannelId, message: &NewMessage)
    -> AppResult<ChatMessage>;
}
