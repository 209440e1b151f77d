//! REST implementations of the core service ports.
//!
//! Each service is a thin wrapper over [`ApiClient`]: one method, one
//! request. Validation happens in the callers, totals are computed before
//! sending, and errors come back typed from the transport.

mod admin;
mod documents;
mod finance;
mod hr;
mod workspace;

use std::sync::Arc;

use businessos_core::ports::{
    ActivityApi, AdminApi, BudgetApi, CalendarApi, ChatApi, ClientApi, DocumentApi, HrApi,
    InvoiceApi, TaskApi, TransactionApi,
};

use crate::http::ApiClient;

pub use admin::AdminService;
pub use documents::DocumentService;
pub use finance::{BudgetService, ClientService, InvoiceService, TransactionService};
pub use hr::HrService;
pub use workspace::{ActivityService, CalendarService, ChatService, TaskService};

/// Every port behind one handle, sharing a single [`ApiClient`].
#[derive(Clone)]
pub struct Services {
    /// Users, roles and permissions.
    pub admin: Arc<dyn AdminApi>,
    /// Budgets and categories.
    pub budgets: Arc<dyn BudgetApi>,
    /// Invoices.
    pub invoices: Arc<dyn InvoiceApi>,
    /// Billing clients.
    pub clients: Arc<dyn ClientApi>,
    /// Transactions.
    pub transactions: Arc<dyn TransactionApi>,
    /// Employees and departments.
    pub hr: Arc<dyn HrApi>,
    /// Document shares and versions.
    pub documents: Arc<dyn DocumentApi>,
    /// Tasks.
    pub tasks: Arc<dyn TaskApi>,
    /// Calendar.
    pub calendar: Arc<dyn CalendarApi>,
    /// Activity feed.
    pub activity: Arc<dyn ActivityApi>,
    /// Team chat.
    pub chat: Arc<dyn ChatApi>,
}

impl Services {
    /// Builds every REST service over `api`.
    #[must_use]
    pub fn new(api: &ApiClient) -> Self {
        Self {
            admin: Arc::new(AdminService::new(api.clone())),
            budgets: Arc::new(BudgetService::new(api.clone())),
            invoices: Arc::new(InvoiceService::new(api.clone())),
            clients: Arc::new(ClientService::new(api.clone())),
            transactions: Arc::new(TransactionService::new(api.clone())),
            hr: Arc::new(HrService::new(api.clone())),
            documents: Arc::new(DocumentService::new(api.clone())),
            tasks: Arc::new(TaskService::new(api.clone())),
            calendar: Arc::new(CalendarService::new(api.clone())),
            activity: Arc::new(ActivityService::new(api.clone())),
            chat: Arc::new(ChatService::new(api.clone())),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
