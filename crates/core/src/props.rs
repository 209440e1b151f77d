//! Property-based tests for list, chart and calendar logic.

use businessos_shared::types::{BudgetCategoryId, BudgetId, EventId, PermissionId, TaskId};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::admin::{Permission, filter_permissions, group_by_category};
use crate::calendar::{CalendarEvent, EventKind, events_on};
use crate::finance::charts::{allocated_vs_spent, allocation_pie, category_rows};
use crate::finance::{BudgetPerformance, CategoryPerformance, CategoryStatus, spending_percentage};
use crate::listing::SortDirection;
use crate::tasks::{self, Task, TaskFilter, TaskPriority, TaskSort, TaskSortKey, TaskStatus};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn task_with_due(index: usize, offset: Option<i64>) -> Task {
    Task {
        id: TaskId::new(),
        title: format!("task-{index}"),
        description: None,
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        category: String::new(),
        assignee: None,
        due_date: offset.map(|days| base_date() + Duration::days(days)),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn performance_from(amounts: &[(i64, i64)]) -> BudgetPerformance {
    let categories: Vec<CategoryPerformance> = amounts
        .iter()
        .enumerate()
        .map(|(i, (allocated, spent))| {
            let allocated = Decimal::from(*allocated);
            let spent = Decimal::from(*spent);
            let percentage = spending_percentage(allocated, spent);
            CategoryPerformance {
                category_id: BudgetCategoryId::new(),
                name: format!("cat-{i}"),
                allocated_amount: allocated,
                spent_amount: spent,
                remaining_amount: allocated - spent,
                spending_percentage: percentage,
                status: CategoryStatus::from_percentage(percentage),
            }
        })
        .collect();
    let total_allocated = categories.iter().map(|c| c.allocated_amount).sum();
    let total_spent = categories.iter().map(|c| c.spent_amount).sum();
    BudgetPerformance {
        budget_id: BudgetId::new(),
        budget_name: "prop".into(),
        total_allocated,
        total_spent,
        total_remaining: total_allocated - total_spent,
        overall_percentage: spending_percentage(total_allocated, total_spent),
        categories,
        monthly_spending: Vec::new(),
    }
}

const CATEGORIES: [&str; 4] = ["finance", "hr", "admin", "documents"];

fn permission(index: usize, category: usize) -> Permission {
    Permission {
        id: PermissionId::new(),
        name: format!("perm-{index}"),
        category: CATEGORIES[category].to_string(),
        description: None,
    }
}

proptest! {
    /// Ascending due-date sort is non-decreasing with undated tasks last.
    #[test]
    fn test_due_date_sort_nulls_last(
        offsets in prop::collection::vec(prop::option::of(-400i64..400), 0..40),
    ) {
        let list: Vec<Task> = offsets
            .iter()
            .enumerate()
            .map(|(i, o)| task_with_due(i, *o))
            .collect();
        let sort = TaskSort::by(TaskSortKey::DueDate);
        let sorted = tasks::apply(&list, &TaskFilter::default(), sort);

        prop_assert_eq!(sorted.len(), list.len());
        let first_null = sorted
            .iter()
            .position(|t| t.due_date.is_none())
            .unwrap_or(sorted.len());
        prop_assert!(sorted[first_null..].iter().all(|t| t.due_date.is_none()));
        for pair in sorted[..first_null].windows(2) {
            prop_assert!(pair[0].due_date <= pair[1].due_date);
        }
    }

    /// Descending keeps undated tasks last too; undated tasks keep input order.
    #[test]
    fn test_due_date_sort_desc_stable_nulls(
        offsets in prop::collection::vec(prop::option::of(-400i64..400), 0..40),
    ) {
        let list: Vec<Task> = offsets
            .iter()
            .enumerate()
            .map(|(i, o)| task_with_due(i, *o))
            .collect();
        let sort = TaskSort {
            direction: SortDirection::Desc,
            ..TaskSort::by(TaskSortKey::DueDate)
        };
        let sorted = tasks::apply(&list, &TaskFilter::default(), sort);

        let dated = sorted.iter().take_while(|t| t.due_date.is_some()).count();
        for pair in sorted[..dated].windows(2) {
            prop_assert!(pair[0].due_date >= pair[1].due_date);
        }
        let undated_out: Vec<_> = sorted[dated..].iter().map(|t| t.id).collect();
        let undated_in: Vec<_> = list
            .iter()
            .filter(|t| t.due_date.is_none())
            .map(|t| t.id)
            .collect();
        prop_assert_eq!(undated_out, undated_in);
    }

    /// Reshaping into rows, pie and bars never loses allocated money.
    #[test]
    fn test_chart_mapping_preserves_allocated_sum(
        amounts in prop::collection::vec((0i64..1_000_000, 0i64..2_000_000), 0..20),
    ) {
        let perf = performance_from(&amounts);
        let input: Decimal = perf.categories.iter().map(|c| c.allocated_amount).sum();

        let rows: Decimal = category_rows(&perf).iter().map(|r| r.allocated).sum();
        let pie: Decimal = allocation_pie(&perf).iter().map(|s| s.value).sum();
        let bars: Decimal = allocated_vs_spent(&perf).series[0].values.iter().copied().sum();

        prop_assert_eq!(rows, input);
        prop_assert_eq!(pie, input);
        prop_assert_eq!(bars, input);
    }

    /// `"all"` returns everything; a concrete category returns exactly its
    /// members in input order.
    #[test]
    fn test_permission_filter(
        cats in prop::collection::vec(0usize..CATEGORIES.len(), 0..30),
        pick in 0usize..CATEGORIES.len(),
    ) {
        let permissions: Vec<Permission> = cats
            .iter()
            .enumerate()
            .map(|(i, c)| permission(i, *c))
            .collect();

        prop_assert_eq!(filter_permissions(&permissions, "all"), permissions.clone());

        let category = CATEGORIES[pick];
        let filtered = filter_permissions(&permissions, category);
        let expected: Vec<Permission> = permissions
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        prop_assert_eq!(filtered, expected);

        let grouped: usize = group_by_category(&permissions).iter().map(|(_, m)| m.len()).sum();
        prop_assert_eq!(grouped, permissions.len());
    }

    /// Day lookup matches on the calendar date only, whatever the time.
    #[test]
    fn test_events_on_matches_date_only(
        starts in prop::collection::vec((0i64..60, 0i64..(24 * 60)), 0..30),
        selected in 0i64..60,
    ) {
        let events: Vec<CalendarEvent> = starts
            .iter()
            .map(|(day, minute)| {
                let start = (base_date() + Duration::days(*day))
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + Duration::minutes(*minute);
                CalendarEvent {
                    id: EventId::new(),
                    title: String::new(),
                    start,
                    end: start,
                    all_day: false,
                    location: None,
                    kind: EventKind::Other,
                }
            })
            .collect();
        let date = base_date() + Duration::days(selected);

        let found = events_on(&events, date);
        let expected = starts.iter().filter(|(day, _)| *day == selected).count();
        prop_assert_eq!(found.len(), expected);
        prop_assert!(found.iter().all(|e| e.start.date() == date));
    }

    /// Spending more never moves a category to a healthier status.
    #[test]
    fn test_status_monotonic_in_percentage(a in 0i64..20_000, b in 0i64..20_000) {
        let (low, high) = (a.min(b), a.max(b));
        let severity = |pct: i64| match CategoryStatus::from_percentage(Decimal::new(pct, 2)) {
            CategoryStatus::UnderBudget => 0,
            CategoryStatus::OnTrack => 1,
            CategoryStatus::NearLimit => 2,
            CategoryStatus::OverBudget => 3,
        };
        prop_assert!(severity(low) <= severity(high));
    }
}
