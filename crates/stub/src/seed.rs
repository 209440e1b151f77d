//! Demo data set.

use std::collections::HashMap;

use businessos_core::activity::ActivityKind;
use businessos_core::admin::{Permission, Profile, Role, UserStatus};
use businessos_core::calendar::{CalendarEvent, EventKind};
use businessos_core::chat::{ChatChannel, ChatMessage};
use businessos_core::documents::{DocumentShare, DocumentVersion, PermissionLevel};
use businessos_core::finance::{
    Budget, BudgetCategory, BudgetStatus, Client, Invoice, InvoiceItem, InvoiceStatus,
    Transaction, TransactionType, compute_totals,
};
use businessos_core::hr::{Department, Employee, EmployeeStatus};
use businessos_core::tasks::{Task, TaskPriority, TaskStatus};
use businessos_shared::types::{
    BudgetCategoryId, BudgetId, ChannelId, ClientId, DepartmentId, DocumentId, DocumentShareId,
    DocumentVersionId, EmployeeId, EventId, InvoiceId, MessageId, PermissionId, RoleId, TaskId,
    TransactionId, UserId,
};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::store::Store;

/// Email of the demo administrator.
pub const DEMO_EMAIL: &str = "admin@businessos.dev";
/// Password of the demo administrator.
pub const DEMO_PASSWORD: &str = "admin123";
/// Document that carries the demo shares and versions.
pub const DEMO_DOCUMENT_ID: DocumentId =
    DocumentId::from_uuid(Uuid::from_u128(0x0198_0000_0000_7000_8000_0000_0000_0d0c));

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn profile(name: &str, email: &str, department: &str, status: UserStatus) -> Profile {
    Profile {
        id: UserId::new(),
        name: name.to_string(),
        email: email.to_string(),
        company: Some("BusinessOS Demo".to_string()),
        role: None,
        department: Some(department.to_string()),
        contact_info: HashMap::new(),
        preferences: HashMap::new(),
        status,
        avatar_url: None,
        created_at: Some(Utc::now()),
    }
}

/// Builds a store populated with a small, coherent demo company.
pub fn demo_store() -> Store {
    let store = Store::new();
    let admin = seed_admin(&store);
    seed_finance(&store);
    seed_hr(&store);
    seed_documents(&store, admin);
    seed_work(&store, admin);
    store
}

fn seed_admin(store: &Store) -> UserId {
    let admin = profile("Alex Admin", DEMO_EMAIL, "Operations", UserStatus::Active);
    let maria = profile("Maria Lopez", "maria@businessos.dev", "Finance", UserStatus::Active);
    let sam = profile("Sam Carter", "sam@businessos.dev", "Sales", UserStatus::Inactive);
    store.add_account(DEMO_EMAIL, DEMO_PASSWORD, admin.id);
    store.add_account(&maria.email, "password", maria.id);
    for user in [&admin, &maria, &sam] {
        store.users.insert(user.id, user.clone());
    }

    let catalogue = [
        ("finance.budgets.read", "finance", "View budgets"),
        ("finance.budgets.write", "finance", "Create and edit budgets"),
        ("finance.invoices.write", "finance", "Create and send invoices"),
        ("hr.employees.read", "hr", "View employee records"),
        ("hr.employees.write", "hr", "Edit employee records"),
        ("documents.share", "documents", "Share documents"),
        ("admin.users.manage", "admin", "Manage users"),
        ("admin.roles.manage", "admin", "Manage roles and permissions"),
    ];
    let permissions: Vec<Permission> = catalogue
        .iter()
        .map(|(name, category, description)| {
            let p = Permission {
                id: PermissionId::new(),
                name: (*name).to_string(),
                category: (*category).to_string(),
                description: Some((*description).to_string()),
            };
            store.permissions.insert(p.id, p)
        })
        .collect();

    let administrator = Role {
        id: RoleId::new(),
        name: "Administrator".to_string(),
        description: Some("Full access".to_string()),
        is_system: true,
    };
    let manager = Role {
        id: RoleId::new(),
        name: "Finance Manager".to_string(),
        description: Some("Budgets and invoices".to_string()),
        is_system: false,
    };
    let viewer = Role {
        id: RoleId::new(),
        name: "Viewer".to_string(),
        description: None,
        is_system: false,
    };
    store
        .role_permissions
        .insert(administrator.id, permissions.iter().map(|p| p.id).collect());
    store.role_permissions.insert(
        manager.id,
        permissions
            .iter()
            .filter(|p| p.category == "finance")
            .map(|p| p.id)
            .collect(),
    );
    store.role_permissions.insert(
        viewer.id,
        permissions
            .iter()
            .filter(|p| p.name.ends_with(".read"))
            .map(|p| p.id)
            .collect(),
    );
    store.role_members.insert(administrator.id, vec![admin.id]);
    store.role_members.insert(manager.id, vec![maria.id]);
    store.role_members.insert(viewer.id, vec![sam.id]);
    for role in [administrator, manager, viewer] {
        store.roles.insert(role.id, role);
    }

    admin.id
}

fn seed_finance(store: &Store) {
    let budget = Budget {
        id: BudgetId::new(),
        name: "Operations 2026".to_string(),
        description: Some("Company-wide operating budget".to_string()),
        total_amount: Decimal::from(50_000),
        start_date: date(2026, 1, 1),
        end_date: date(2026, 12, 31),
        fiscal_year: "FY2026".to_string(),
        status: BudgetStatus::Active,
        created_at: Some(Utc::now()),
    };
    store.budgets.insert(budget.id, budget.clone());

    for (name, allocated) in [
        ("Marketing", 15_000),
        ("Travel", 8_000),
        ("Office", 5_000),
        ("Software", 12_000),
    ] {
        let category = BudgetCategory {
            id: BudgetCategoryId::new(),
            budget_id: budget.id,
            name: name.to_string(),
            description: None,
            allocated_amount: Decimal::from(allocated),
        };
        store.categories.insert(category.id, category);
    }

    let ledger = [
        (date(2026, 1, 12), "Trade show booth", TransactionType::Expense, "Marketing", 6_200),
        (date(2026, 1, 20), "Flights to Berlin", TransactionType::Expense, "Travel", 2_400),
        (date(2026, 2, 3), "Ad campaign", TransactionType::Expense, "Marketing", 7_900),
        (date(2026, 2, 15), "Desk chairs", TransactionType::Expense, "Office", 1_150),
        (date(2026, 3, 1), "CRM licences", TransactionType::Expense, "Software", 4_800),
        (date(2026, 3, 9), "Client visit", TransactionType::Expense, "Travel", 5_300),
        (date(2026, 3, 30), "Consulting retainer", TransactionType::Income, "Services", 18_000),
    ];
    for (day, description, transaction_type, category, amount) in ledger {
        let tx = Transaction {
            id: TransactionId::new(),
            date: day,
            description: description.to_string(),
            transaction_type,
            category: category.to_string(),
            amount: Decimal::from(amount),
        };
        store.transactions.insert(tx.id, tx);
    }

    let client = Client {
        id: ClientId::new(),
        name: "Jordan Price".to_string(),
        email: Some("jordan@acme.example".to_string()),
        phone: None,
        company: Some("Acme Corp".to_string()),
        address: Some("1 Market Street".to_string()),
    };
    store.clients.insert(client.id, client.clone());

    let items = vec![
        InvoiceItem::new("Consulting hours", Decimal::from(20), Decimal::from(150)),
        InvoiceItem::new("Travel expenses", Decimal::ONE, Decimal::from(420)),
    ];
    let tax_rate = Decimal::from(10);
    let totals = compute_totals(&items, tax_rate);
    let invoice = Invoice {
        id: InvoiceId::new(),
        invoice_number: "INV-2026-001".to_string(),
        client_id: client.id,
        issue_date: date(2026, 3, 1),
        due_date: date(2026, 3, 31),
        status: InvoiceStatus::Sent,
        subtotal: totals.subtotal,
        tax_rate,
        tax: totals.tax,
        total: totals.total,
        notes: Some("Net 30".to_string()),
        items,
    };
    store.invoices.insert(invoice.id, invoice);
}

fn seed_hr(store: &Store) {
    for name in ["Engineering", "Finance", "Sales", "Operations"] {
        let department = Department {
            id: DepartmentId::new(),
            name: name.to_string(),
            description: None,
            manager_id: None,
        };
        store.departments.insert(department.id, department);
    }

    let employee = |first: &str, last: &str, position: &str, dept: &str, manager| Employee {
        id: EmployeeId::new(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@businessos.dev", first.to_lowercase()),
        position: Some(position.to_string()),
        department: Some(dept.to_string()),
        manager_id: manager,
        hire_date: Some(date(2024, 4, 1)),
        salary: Some(Decimal::from(72_000)),
        status: EmployeeStatus::Active,
    };
    let ceo = employee("Riley", "Morgan", "CEO", "Operations", None);
    let cto = employee("Priya", "Natarajan", "CTO", "Engineering", Some(ceo.id));
    let dev = employee("Tom", "Becker", "Engineer", "Engineering", Some(cto.id));
    let mut rep = employee("Lena", "Fischer", "Account Executive", "Sales", Some(ceo.id));
    rep.status = EmployeeStatus::OnLeave;
    for e in [ceo, cto, dev, rep] {
        store.employees.insert(e.id, e);
    }
}

fn seed_documents(store: &Store, admin: UserId) {
    let now = Utc::now();
    for number in 1..=2 {
        let id = DocumentVersionId::new();
        store.versions.insert(
            id,
            DocumentVersion {
                id,
                document_id: DEMO_DOCUMENT_ID,
                version_number: number,
                storage_path: format!("documents/{DEMO_DOCUMENT_ID}/{id}/handbook.pdf"),
                size_bytes: 48_000 + u64::from(number) * 1_000,
                created_by: Some(admin),
                created_at: now,
                comment: Some(format!("Revision {number}")),
            },
        );
    }
    let share = DocumentShare {
        id: DocumentShareId::new(),
        document_id: DEMO_DOCUMENT_ID,
        shared_with: "maria@businessos.dev".to_string(),
        permission_level: PermissionLevel::Comment,
        created_at: now,
    };
    store.shares.insert(share.id, share);
}

fn seed_work(store: &Store, admin: UserId) {
    let today = Utc::now().date_naive();
    let tasks = [
        ("Prepare Q2 forecast", TaskStatus::InProgress, TaskPriority::High, "Finance", Some(3)),
        ("Renew office lease", TaskStatus::Todo, TaskPriority::Urgent, "Operations", Some(-2)),
        ("Update onboarding guide", TaskStatus::Review, TaskPriority::Low, "HR", None),
        ("Close March books", TaskStatus::Done, TaskPriority::Medium, "Finance", Some(-10)),
        ("Plan team offsite", TaskStatus::Todo, TaskPriority::Medium, "HR", Some(21)),
    ];
    for (title, status, priority, category, due) in tasks {
        let task = Task {
            id: TaskId::new(),
            title: title.to_string(),
            description: None,
            status,
            priority,
            category: category.to_string(),
            assignee: Some(admin),
            due_date: due.map(|days| today + Duration::days(days)),
            created_at: Utc::now(),
        };
        store.tasks.insert(task.id, task);
    }

    let events = [
        ("Budget review", 0, (10, 0), EventKind::Meeting),
        ("Invoice run", 0, (16, 30), EventKind::Deadline),
        ("1:1 with Maria", 2, (9, 0), EventKind::Meeting),
        ("Renew insurance", 7, (0, 0), EventKind::Reminder),
    ];
    for (title, offset, (hour, minute), kind) in events {
        let start = (today + Duration::days(offset))
            .and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default());
        let event = CalendarEvent {
            id: EventId::new(),
            title: title.to_string(),
            start,
            end: start + Duration::hours(1),
            all_day: kind == EventKind::Reminder,
            location: None,
            kind,
        };
        store.events.insert(event.id, event);
    }

    let general = ChatChannel {
        id: ChannelId::new(),
        name: "general".to_string(),
    };
    let finance = ChatChannel {
        id: ChannelId::new(),
        name: "finance".to_string(),
    };
    for (author, body) in [
        ("Alex Admin", "Welcome to BusinessOS!"),
        ("Maria Lopez", "Q1 numbers are in the budget analysis tab."),
    ] {
        let message = ChatMessage {
            id: MessageId::new(),
            channel_id: general.id,
            author: author.to_string(),
            body: body.to_string(),
            sent_at: Utc::now(),
        };
        store.messages.insert(message.id, message);
    }
    store.channels.insert(general.id, general);
    store.channels.insert(finance.id, finance);

    store.record(
        DEMO_EMAIL,
        "created",
        ActivityKind::Finance,
        "Budget Operations 2026 created".to_string(),
    );
    store.record(
        "maria@businessos.dev",
        "sent",
        ActivityKind::Finance,
        "Invoice INV-2026-001 sent to Acme Corp".to_string(),
    );
    store.record(
        DEMO_EMAIL,
        "completed",
        ActivityKind::Task,
        "Task Close March books completed".to_string(),
    );
}
