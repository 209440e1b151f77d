//! BusinessOS command line
//!
//! Drives the same view-models as the web front end against the configured
//! backend. Every command signs in first, except `ask`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use businessos_client::{ApiClient, Services, SessionProvider, SupabaseAuth};
use businessos_core::finance::BudgetCategoryInput;
use businessos_core::ports::BudgetApi;
use businessos_core::tasks::{TaskSortKey, TaskStatus};
use businessos_shared::{AppConfig, AppResult};
use businessos_shared::types::{BudgetId, Currency, RoleId, format_currency, format_percentage};
use businessos_views::{
    AssistantView, BudgetAnalysisView, BudgetCategoriesView, CalendarView, Notifier, RolesView,
    TaskManagerView, ToastLevel, TransactionsView, UsersView,
};

#[derive(Parser, Debug)]
#[command(name = "businessos", about = "Manage budgets, tasks, users and roles from the terminal")]
struct Cli {
    /// Account email
    #[arg(long, global = true, env = "BUSINESSOS_EMAIL")]
    email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "BUSINESSOS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and show the account
    Login,
    /// List budgets
    Budgets,
    /// List the categories of a budget
    Categories {
        /// Budget ID
        #[arg(long)]
        budget: BudgetId,
        /// Only categories whose name contains this
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a category to a budget
    AddCategory {
        /// Budget ID
        #[arg(long)]
        budget: BudgetId,
        /// Category name
        #[arg(long)]
        name: String,
        /// Amount allocated
        #[arg(long)]
        amount: Decimal,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
    /// List transactions with income and expense totals
    Transactions {
        /// Only this category
        #[arg(long, default_value = "all")]
        category: String,
        /// Description or category contains this
        #[arg(long, default_value = "")]
        search: String,
        /// First day included
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day included
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show spending against allocations
    Performance {
        /// Budget ID; the first budget when omitted
        #[arg(long)]
        budget: Option<BudgetId>,
    },
    /// List tasks
    Tasks {
        /// Only this column
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Title or description contains this
        #[arg(long, default_value = "")]
        search: String,
        /// Sort column
        #[arg(long, value_enum, default_value_t = SortArg::Due)]
        sort: SortArg,
        /// Largest first
        #[arg(long)]
        desc: bool,
    },
    /// Show the events of a day
    Calendar {
        /// Day to show, today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List users
    Users {
        /// Name, email or department contains this
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List roles, or the permissions of one role
    Permissions {
        /// Role ID
        #[arg(long)]
        role: Option<RoleId>,
        /// Only this permission category
        #[arg(long)]
        category: Option<String>,
    },
    /// Ask the help assistant
    Ask {
        /// Question text
        question: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Todo,
    InProgress,
    Review,
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Todo => Self::Todo,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Review => Self::Review,
            StatusArg::Done => Self::Done,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Due,
    Priority,
    Title,
    Created,
    Status,
}

impl From<SortArg> for TaskSortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Due => Self::DueDate,
            SortArg::Priority => Self::Priority,
            SortArg::Title => Self::Title,
            SortArg::Created => Self::CreatedAt,
            SortArg::Status => Self::Status,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "businessos=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Command::Ask { question } = &cli.command {
        ask(&question.join(" "));
        return Ok(());
    }

    let config = AppConfig::load().context("failed to load configuration")?;
    let (auth, services) = connect(&config)?;
    let email = cli.email.as_deref().context("--email or BUSINESSOS_EMAIL is required")?;
    let password = cli
        .password
        .as_deref()
        .context("--password or BUSINESSOS_PASSWORD is required")?;
    let user = auth
        .sign_in(email, password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("sign-in failed")?;
    debug!(email = %user.email, "signed in");

    let notifier = Notifier::new();
    let outcome = match cli.command {
        Command::Login => {
            println!("Signed in as {} ({})", user.email, user.id);
            Ok(())
        }
        command => execute(command, &services, &notifier).await,
    }
    .and_then(|()| report(&notifier));

    finish(outcome, auth.sign_out()).await
}

/// Signs out whatever the command's outcome, then returns that outcome.
async fn finish<F>(outcome: Result<()>, sign_out: F) -> Result<()>
where
    F: Future<Output = AppResult<()>>,
{
    if let Err(err) = sign_out.await {
        debug!(error = %err, "sign-out failed");
    }
    outcome
}

async fn execute(command: Command, services: &Services, notifier: &Notifier) -> Result<()> {
    match command {
        Command::Budgets => budgets(services).await?,
        Command::Categories { budget, search } => {
            let mut view =
                BudgetCategoriesView::new(services.budgets.clone(), budget, notifier.clone());
            view.set_search(search);
            if view.load().await {
                for c in view.visible() {
                    let allocated = format_currency(c.allocated_amount, Currency::Usd);
                    println!("{:<24} {allocated:>14}  {}", c.name, c.id);
                }
                let total = format_currency(view.total_allocated(), Currency::Usd);
                println!("{:<24} {total:>14}", "Total");
            }
        }
        Command::AddCategory {
            budget,
            name,
            amount,
            description,
        } => {
            let mut view =
                BudgetCategoriesView::new(services.budgets.clone(), budget, notifier.clone());
            let input = BudgetCategoryInput {
                name,
                description,
                allocated_amount: amount,
            };
            if view.create(input).await {
                println!("{} categories", view.categories().len());
            }
        }
        Command::Transactions {
            category,
            search,
            from,
            to,
        } => {
            let mut view = TransactionsView::new(services.transactions.clone(), notifier.clone());
            let filter = view.filter_mut();
            filter.category = category;
            filter.search = search;
            filter.from = from;
            filter.to = to;
            if view.load().await {
                transactions(&view);
            }
        }
        Command::Performance { budget } => {
            let mut view =
                BudgetAnalysisView::new(services.budgets.clone(), Currency::Usd, notifier.clone());
            let opened = match budget {
                Some(id) => view.open().await && view.select(id).await,
                None => view.open().await,
            };
            if opened {
                performance(&view);
            }
        }
        Command::Tasks {
            status,
            search,
            sort,
            desc,
        } => {
            let mut view = TaskManagerView::new(services.tasks.clone(), notifier.clone());
            view.filter_mut().status = status.map(Into::into);
            view.filter_mut().search = search;
            let key = TaskSortKey::from(sort);
            if view.sort().key != key {
                view.sort_by(key);
            }
            if desc {
                view.sort_by(key);
            }
            if view.load().await {
                for t in view.visible() {
                    let due = t.due_date.map_or_else(|| "-".to_string(), |d| d.to_string());
                    let status = format!("{:?}", t.status);
                    let priority = format!("{:?}", t.priority);
                    println!("{status:<12} {priority:<8} {due:<10} {}", t.title);
                }
            }
        }
        Command::Calendar { date } => {
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let mut view = CalendarView::new(services.calendar.clone(), today, notifier.clone());
            if view.load().await {
                let days: Vec<String> = view.markers().iter().map(u32::to_string).collect();
                println!("{} {}: events on {}", today.year(), today.month(), days.join(", "));
                for e in view.day_events() {
                    let (start, end) = (e.start.format("%H:%M"), e.end.format("%H:%M"));
                    println!("  {start} - {end}  {}", e.title);
                }
            }
        }
        Command::Users { search } => {
            let mut view = UsersView::new(services.admin.clone(), notifier.clone());
            view.filter_mut().search = search;
            if view.load().await {
                for u in view.visible() {
                    println!("{:<24} {:<32} {:?}", u.name, u.email, u.status);
                }
            }
        }
        Command::Permissions { role, category } => {
            let mut roles = RolesView::new(services.admin.clone(), notifier.clone());
            match role {
                None => {
                    if roles.load().await {
                        for r in roles.roles() {
                            let system = if r.is_system { " (system)" } else { "" };
                            println!("{}  {}{system}", r.id, r.name);
                        }
                    }
                }
                Some(id) => {
                    let mut dialog = roles.edit_permissions(id).await;
                    if let Some(category) = category {
                        dialog.set_category(category);
                    }
                    if dialog.is_open() {
                        for (group, permissions) in dialog.grouped() {
                            println!("{group}");
                            for p in permissions {
                                let checked = dialog.selected().contains(&p.id);
                                let mark = if checked { 'x' } else { ' ' };
                                println!("  [{mark}] {}", p.name);
                            }
                        }
                    }
                }
            }
        }
        Command::Login | Command::Ask { .. } => {}
    }
    Ok(())
}

fn connect(config: &AppConfig) -> Result<(Arc<SupabaseAuth>, Services)> {
    let timeout = Duration::from_secs(config.api.timeout_secs);
    let auth = Arc::new(SupabaseAuth::new(&config.supabase, timeout)?);
    let session: Arc<dyn SessionProvider> = auth.clone();
    let api = ApiClient::new(&config.api, session)?;
    Ok((auth, Services::new(&api)))
}

async fn budgets(services: &Services) -> Result<()> {
    let budgets = services
        .budgets
        .list_budgets()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    for b in budgets {
        println!(
            "{}  {:<24} {:>14}  {} to {}",
            b.id,
            b.name,
            format_currency(b.total_amount, Currency::Usd),
            b.start_date,
            b.end_date
        );
    }
    Ok(())
}

fn performance(view: &BudgetAnalysisView) {
    if let Some(cards) = view.summary() {
        println!(
            "Allocated {}  Spent {}  Remaining {}  Used {}",
            cards.allocated, cards.spent, cards.remaining, cards.utilization
        );
    }
    for row in view.rows() {
        println!(
            "{:<24} {:>12} {:>12} {:>8}  {}",
            row.category,
            row.allocated,
            row.spent,
            format_percentage(row.percentage),
            row.status.label()
        );
    }
}

fn transactions(view: &TransactionsView) {
    for tx in view.visible() {
        let amount = format_currency(tx.amount, Currency::Usd);
        let kind = format!("{:?}", tx.transaction_type);
        println!("{}  {kind:<8} {:<16} {amount:>14}  {}", tx.date, tx.category, tx.description);
    }
    let summary = view.summary();
    println!(
        "Income {}  Expenses {}  Net {}",
        format_currency(summary.income, Currency::Usd),
        format_currency(summary.expense, Currency::Usd),
        format_currency(summary.net, Currency::Usd)
    );
    for (category, total) in view.expense_breakdown() {
        println!("  {category:<24} {:>14}", format_currency(total, Currency::Usd));
    }
}

fn ask(question: &str) {
    let mut view = AssistantView::default();
    match view.ask(question) {
        Some(reply) => println!("{}", reply.text),
        None => println!("{}", view.turns()[0].text),
    }
}

/// Prints toasts; any error toast fails the command.
fn report(notifier: &Notifier) -> Result<()> {
    let mut failed = false;
    for toast in notifier.drain() {
        match toast.level {
            ToastLevel::Error => {
                failed = true;
                eprintln!("error: {}: {}", toast.title, toast.message);
            }
            ToastLevel::Success | ToastLevel::Info => {
                println!("{}: {}", toast.title, toast.message);
            }
        }
    }
    if failed {
        bail!("command failed");
    }
    Ok(())
}
