//! Port mocks and fixtures shared by the view tests.

use async_trait::async_trait;
use businessos_core::activity::ActivityItem;
use businessos_core::admin::{
    Permission, Profile, Role, RoleInput, RolePermission, RoleUser, UpdateProfileInput,
    UserStatus,
};
use businessos_core::calendar::{CalendarEvent, CalendarEventInput};
use businessos_core::chat::{ChatChannel, ChatMessage, NewMessage};
use businessos_core::documents::{
    DocumentShare, DocumentVersion, NewVersionInput, PermissionLevel, ShareInput,
};
use businessos_core::finance::{
    Budget, BudgetCategory, BudgetCategoryInput, BudgetInput, BudgetPerformance, Client,
    ClientInput, Invoice, InvoiceInput, Transaction, TransactionInput,
};
use businessos_core::hr::{Department, DepartmentInput, Employee, EmployeeInput};
use businessos_core::ports::{
    ActivityApi, AdminApi, BudgetApi, CalendarApi, ChatApi, ClientApi, DocumentApi, HrApi,
    InvoiceApi, TaskApi, TransactionApi,
};
use businessos_core::tasks::{Task, TaskInput};
use businessos_shared::types::{
    BudgetCategoryId, BudgetId, ChannelId, ClientId, DepartmentId, DocumentId, DocumentShareId,
    DocumentVersionId, EmployeeId, EventId, InvoiceId, PermissionId, RoleId, TaskId,
    TransactionId, UserId,
};
use businessos_shared::{AppError, AppResult};
use mockall::mock;

mock! {
    pub Budgets {}

    #[async_trait]
    impl BudgetApi for Budgets {
        async fn list_budgets(&self) -> AppResult<Vec<Budget>>;
        async fn get_budget(&self, id: BudgetId) -> AppResult<Budget>;
        async fn create_budget(&self, input: &BudgetInput) -> AppResult<Budget>;
        async fn update_budget(&self, id: BudgetId, input: &BudgetInput) -> AppResult<Budget>;
        async fn delete_budget(&self, id: BudgetId) -> AppResult<()>;
        async fn list_categories(&self, budget: BudgetId) -> AppResult<Vec<BudgetCategory>>;
        async fn create_category(
            &self,
            budget: BudgetId,
            input: &BudgetCategoryInput,
        ) -> AppResult<BudgetCategory>;
        async fn update_category(
            &self,
            budget: BudgetId,
            id: BudgetCategoryId,
            input: &BudgetCategoryInput,
        ) -> AppResult<BudgetCategory>;
        async fn delete_category(&self, budget: BudgetId, id: BudgetCategoryId) -> AppResult<()>;
        async fn performance(&self, budget: BudgetId) -> AppResult<BudgetPerformance>;
    }
}

mock! {
    pub Admin {}

    #[async_trait]
    impl AdminApi for Admin {
        async fn list_users(&self) -> AppResult<Vec<Profile>>;
        async fn get_user(&self, id: UserId) -> AppResult<Profile>;
        async fn update_user(&self, id: UserId, input: &UpdateProfileInput) -> AppResult<Profile>;
        async fn set_user_status(&self, id: UserId, status: UserStatus) -> AppResult<Profile>;
        async fn list_roles(&self) -> AppResult<Vec<Role>>;
        async fn get_role(&self, id: RoleId) -> AppResult<Role>;
        async fn create_role(&self, input: &RoleInput) -> AppResult<Role>;
        async fn update_role(&self, id: RoleId, input: &RoleInput) -> AppResult<Role>;
        async fn delete_role(&self, id: RoleId) -> AppResult<()>;
        async fn list_permissions(&self) -> AppResult<Vec<Permission>>;
        async fn role_permissions(&self, id: RoleId) -> AppResult<Vec<RolePermission>>;
        async fn set_role_permissions(
            &self,
            id: RoleId,
            permission_ids: &[PermissionId],
        ) -> AppResult<()>;
        async fn role_users(&self, id: RoleId) -> AppResult<Vec<RoleUser>>;
    }
}

mock! {
    pub Invoices {}

    #[async_trait]
    impl InvoiceApi for Invoices {
        async fn list_invoices(&self) -> AppResult<Vec<Invoice>>;
        async fn get_invoice(&self, id: InvoiceId) -> AppResult<Invoice>;
        async fn create_invoice(&self, input: &InvoiceInput) -> AppResult<Invoice>;
        async fn update_invoice(&self, id: InvoiceId, input: &InvoiceInput) -> AppResult<Invoice>;
        async fn delete_invoice(&self, id: InvoiceId) -> AppResult<()>;
    }
}

mock! {
    pub Clients {}

    #[async_trait]
    impl ClientApi for Clients {
        async fn list_clients(&self) -> AppResult<Vec<Client>>;
        async fn create_client(&self, input: &ClientInput) -> AppResult<Client>;
        async fn update_client(&self, id: ClientId, input: &ClientInput) -> AppResult<Client>;
        async fn delete_client(&self, id: ClientId) -> AppResult<()>;
    }
}

mock! {
    pub Transactions {}

    #[async_trait]
    impl TransactionApi for Transactions {
        async fn list_transactions(&self) -> AppResult<Vec<Transaction>>;
        async fn create_transaction(&self, input: &TransactionInput) -> AppResult<Transaction>;
        async fn update_transaction(
            &self,
            id: TransactionId,
            input: &TransactionInput,
        ) -> AppResult<Transaction>;
        async fn delete_transaction(&self, id: TransactionId) -> AppResult<()>;
    }
}

mock! {
    pub Hr {}

    #[async_trait]
    impl HrApi for Hr {
        async fn list_employees(&self) -> AppResult<Vec<Employee>>;
        async fn get_employee(&self, id: EmployeeId) -> AppResult<Employee>;
        async fn create_employee(&self, input: &EmployeeInput) -> AppResult<Employee>;
        async fn update_employee(
            &self,
            id: EmployeeId,
            input: &EmployeeInput,
        ) -> AppResult<Employee>;
        async fn delete_employee(&self, id: EmployeeId) -> AppResult<()>;
        async fn list_departments(&self) -> AppResult<Vec<Department>>;
        async fn create_department(&self, input: &DepartmentInput) -> AppResult<Department>;
        async fn update_department(
            &self,
            id: DepartmentId,
            input: &DepartmentInput,
        ) -> AppResult<Department>;
        async fn delete_department(&self, id: DepartmentId) -> AppResult<()>;
    }
}

mock! {
    pub Documents {}

    #[async_trait]
    impl DocumentApi for Documents {
        async fn list_shares(&self, document: DocumentId) -> AppResult<Vec<DocumentShare>>;
        async fn share(&self, document: DocumentId, input: &ShareInput) -> AppResult<DocumentShare>;
        async fn update_share(
            &self,
            document: DocumentId,
            share: DocumentShareId,
            level: PermissionLevel,
        ) -> AppResult<DocumentShare>;
        async fn revoke_share(&self, document: DocumentId, share: DocumentShareId) -> AppResult<()>;
        async fn list_versions(&self, document: DocumentId) -> AppResult<Vec<DocumentVersion>>;
        async fn add_version(
            &self,
            document: DocumentId,
            input: &NewVersionInput,
        ) -> AppResult<DocumentVersion>;
        async fn restore_version(
            &self,
            document: DocumentId,
            version: DocumentVersionId,
        ) -> AppResult<DocumentVersion>;
    }
}

mock! {
    pub Tasks {}

    #[async_trait]
    impl TaskApi for Tasks {
        async fn list_tasks(&self) -> AppResult<Vec<Task>>;
        async fn create_task(&self, input: &TaskInput) -> AppResult<Task>;
        async fn update_task(&self, id: TaskId, input: &TaskInput) -> AppResult<Task>;
        async fn delete_task(&self, id: TaskId) -> AppResult<()>;
    }
}

mock! {
    pub Calendar {}

    #[async_trait]
    impl CalendarApi for Calendar {
        async fn list_events(&self) -> AppResult<Vec<CalendarEvent>>;
        async fn create_event(&self, input: &CalendarEventInput) -> AppResult<CalendarEvent>;
        async fn update_event(
            &self,
            id: EventId,
            input: &CalendarEventInput,
        ) -> AppResult<CalendarEvent>;
        async fn delete_event(&self, id: EventId) -> AppResult<()>;
    }
}

mock! {
    pub Activity {}

    #[async_trait]
    impl ActivityApi for Activity {
        async fn list_activity(&self) -> AppResult<Vec<ActivityItem>>;
    }
}

mock! {
    pub Chat {}

    #[async_trait]
    impl ChatApi for Chat {
        async fn list_channels(&self) -> AppResult<Vec<ChatChannel>>;
        async fn list_messages(&self, channel: ChannelId) -> AppResult<Vec<ChatMessage>>;
        async fn send_message(
            &self,
            channel: ChannelId,
            message: &NewMessage,
        ) -> AppResult<ChatMessage>;
    }
}

/// The simulated backend failure used across view tests.
pub fn server_error() -> AppError {
    AppError::Api {
        status: 500,
        detail: "Internal Server Error".into(),
    }
}
