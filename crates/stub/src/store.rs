//! In-memory tables.
//!
//! Every table remembers insertion order so list endpoints return rows in a
//! stable order, like a database with a serial primary key would.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use businessos_core::activity::{ActivityItem, ActivityKind};
use businessos_core::admin::{Permission, Profile, Role};
use businessos_core::calendar::CalendarEvent;
use businessos_core::chat::{ChatChannel, ChatMessage};
use businessos_core::documents::{DocumentShare, DocumentVersion};
use businessos_core::finance::{Budget, BudgetCategory, Client, Invoice, Transaction};
use businessos_core::hr::{Department, Employee};
use businessos_core::tasks::Task;
use businessos_shared::types::{
    ActivityId, BudgetCategoryId, BudgetId, ChannelId, ClientId, DepartmentId, DocumentShareId,
    DocumentVersionId, EmployeeId, EventId, InvoiceId, MessageId, PermissionId, RoleId, TaskId,
    TransactionId, UserId,
};
use chrono::Utc;
use dashmap::DashMap;

/// A table of rows keyed by ID, listed in insertion order.
#[derive(Debug)]
pub struct Table<K, T>
where
    K: Eq + Hash,
{
    rows: DashMap<K, (u64, T)>,
    next_seq: AtomicU64,
}

impl<K, T> Default for Table<K, T>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            rows: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl<K, T> Table<K, T>
where
    K: Eq + Hash + Copy,
    T: Clone,
{
    /// Inserts a new row and returns it.
    pub fn insert(&self, id: K, row: T) -> T {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.rows.insert(id, (seq, row.clone()));
        row
    }

    /// Row by ID.
    pub fn get(&self, id: K) -> Option<T> {
        self.rows.get(&id).map(|entry| entry.1.clone())
    }

    /// True if the ID exists.
    pub fn contains(&self, id: K) -> bool {
        self.rows.contains_key(&id)
    }

    /// Mutates a row in place, keeping its position.
    pub fn update(&self, id: K, apply: impl FnOnce(&mut T)) -> Option<T> {
        self.rows.get_mut(&id).map(|mut entry| {
            apply(&mut entry.1);
            entry.1.clone()
        })
    }

    /// Removes a row.
    pub fn remove(&self, id: K) -> Option<T> {
        self.rows.remove(&id).map(|(_, (_, row))| row)
    }

    /// Drops every row failing `keep`.
    pub fn retain(&self, keep: impl Fn(&T) -> bool) {
        self.rows.retain(|_, (_, row)| keep(row));
    }

    /// All rows in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.filter(|_| true)
    }

    /// Matching rows in insertion order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(u64, T)> = self
            .rows
            .iter()
            .filter(|entry| predicate(&entry.1))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sign-in credentials of a stub account.
#[derive(Debug, Clone)]
pub struct Account {
    /// Profile the account signs in as.
    pub user_id: UserId,
    /// Plain-text password; the stub is a test double.
    pub password: String,
}

/// Every table the stub serves.
#[derive(Debug, Default)]
pub struct Store {
    /// Credentials keyed by lowercase email.
    pub accounts: DashMap<String, Account>,
    /// Live refresh tokens.
    pub refresh_tokens: DashMap<String, UserId>,

    /// User profiles.
    pub users: Table<UserId, Profile>,
    /// Roles.
    pub roles: Table<RoleId, Role>,
    /// Permission catalogue.
    pub permissions: Table<PermissionId, Permission>,
    /// Granted permissions per role.
    pub role_permissions: DashMap<RoleId, Vec<PermissionId>>,
    /// Members per role.
    pub role_members: DashMap<RoleId, Vec<UserId>>,

    /// Budgets.
    pub budgets: Table<BudgetId, Budget>,
    /// Budget categories.
    pub categories: Table<BudgetCategoryId, BudgetCategory>,
    /// Invoices.
    pub invoices: Table<InvoiceId, Invoice>,
    /// Billing clients.
    pub clients: Table<ClientId, Client>,
    /// Ledger.
    pub transactions: Table<TransactionId, Transaction>,

    /// Employees.
    pub employees: Table<EmployeeId, Employee>,
    /// Departments.
    pub departments: Table<DepartmentId, Department>,

    /// Document shares.
    pub shares: Table<DocumentShareId, DocumentShare>,
    /// Document versions.
    pub versions: Table<DocumentVersionId, DocumentVersion>,

    /// Tasks.
    pub tasks: Table<TaskId, Task>,
    /// Calendar events.
    pub events: Table<EventId, CalendarEvent>,
    /// Activity feed.
    pub activity: Table<ActivityId, ActivityItem>,
    /// Chat channels.
    pub channels: Table<ChannelId, ChatChannel>,
    /// Chat messages.
    pub messages: Table<MessageId, ChatMessage>,
}

impl Store {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers sign-in credentials for a profile.
    pub fn add_account(&self, email: &str, password: &str, user_id: UserId) {
        self.accounts.insert(
            email.to_lowercase(),
            Account {
                user_id,
                password: password.to_string(),
            },
        );
    }

    /// Appends an activity feed entry.
    pub fn record(&self, actor: &str, action: &str, kind: ActivityKind, summary: String) {
        let id = ActivityId::new();
        self.activity.insert(
            id,
            ActivityItem {
                id,
                actor: actor.to_string(),
                action: action.to_string(),
                kind,
                summary,
                occurred_at: Utc::now(),
            },
        );
    }
}
