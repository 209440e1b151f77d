//! Task manager: filtering, sorting and status counts.

use std::cmp::Ordering;

use businessos_shared::types::{TaskId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::listing::{
    NullsPlacement, SortDirection, any_field_matches, category_matches, compare_optional,
};
use crate::validation::not_blank;

/// Workflow column of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Waiting for review.
    Review,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];
}

/// Task priority. Ordering is by urgency, `Low` smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low.
    Low,
    /// Medium.
    #[default]
    Medium,
    /// High.
    High,
    /// Urgent.
    Urgent,
}

/// A task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task ID.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Free-form category.
    #[serde(default)]
    pub category: String,
    /// Assigned user.
    #[serde(default)]
    pub assignee: Option<UserId>,
    /// Due date; tasks without one sort last by default.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Input for creating or updating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Title.
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Category.
    pub category: String,
    /// Assignee.
    pub assignee: Option<UserId>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}

/// Task list filter.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Matches title or description.
    pub search: String,
    /// Restricts to one status.
    pub status: Option<TaskStatus>,
    /// Restricts to one priority.
    pub priority: Option<TaskPriority>,
    /// Category, `"all"` for any.
    pub category: String,
}

impl TaskFilter {
    /// True if the task passes every predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|s| s == task.status)
            && self.priority.is_none_or(|p| p == task.priority)
            && category_matches(&task.category, &self.category)
            && any_field_matches(
                [
                    task.title.as_str(),
                    task.description.as_deref().unwrap_or_default(),
                ],
                &self.search,
            )
    }
}

/// Column a task list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSortKey {
    /// Due date.
    #[default]
    DueDate,
    /// Priority.
    Priority,
    /// Title, case-insensitive.
    Title,
    /// Creation time.
    CreatedAt,
    /// Status.
    Status,
}

/// Sort settings for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskSort {
    /// Sort column.
    pub key: TaskSortKey,
    /// Direction.
    pub direction: SortDirection,
    /// Placement of tasks without a due date.
    pub nulls: NullsPlacement,
}

impl TaskSort {
    /// Ascending by `key`, missing values last.
    #[must_use]
    pub fn by(key: TaskSortKey) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    /// Same key, flipped direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        Self {
            direction: self.direction.toggled(),
            ..self
        }
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self.key {
            TaskSortKey::DueDate => compare_optional(
                a.due_date.as_ref(),
                b.due_date.as_ref(),
                self.direction,
                self.nulls,
            ),
            TaskSortKey::Priority => self.direction.apply(a.priority.cmp(&b.priority)),
            TaskSortKey::Title => self
                .direction
                .apply(a.title.to_lowercase().cmp(&b.title.to_lowercase())),
            TaskSortKey::CreatedAt => self.direction.apply(a.created_at.cmp(&b.created_at)),
            TaskSortKey::Status => self.direction.apply(a.status.cmp(&b.status)),
        }
    }
}

/// Filters then stably sorts the task list into a new vector.
#[must_use]
pub fn apply(tasks: &[Task], filter: &TaskFilter, sort: TaskSort) -> Vec<Task> {
    let mut out: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
    out.sort_by(|a, b| sort.compare(a, b));
    out
}

/// Number of tasks per status, in board order, zero counts included.
#[must_use]
pub fn count_by_status(tasks: &[Task]) -> Vec<(TaskStatus, usize)> {
    TaskStatus::ALL
        .iter()
        .map(|status| (*status, tasks.iter().filter(|t| t.status == *status).count()))
        .collect()
}

/// Open tasks whose due date is before `today`.
#[must_use]
pub fn overdue(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Done)
        .filter(|t| t.due_date.is_some_and(|d| d < today))
        .collect()
}

/// Distinct categories in first-seen order, blanks skipped.
#[must_use]
pub fn categories(tasks: &[Task]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for task in tasks {
        if !task.category.is_empty() && !out.contains(&task.category) {
            out.push(task.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn task(title: &str, due: Option<u32>, priority: TaskPriority) -> Task {
        Task {
            id: TaskId::new(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority,
            category: "General".into(),
            assignee: None,
            due_date: due.map(day),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task("c", Some(12), TaskPriority::Low),
            task("none-1", None, TaskPriority::Urgent),
            task("a", Some(3), TaskPriority::High),
            task("none-2", None, TaskPriority::Low),
            task("b", Some(7), TaskPriority::Medium),
        ]
    }

    #[rstest]
    #[case(SortDirection::Asc, NullsPlacement::Last, &["a", "b", "c", "none-1", "none-2"])]
    #[case(SortDirection::Desc, NullsPlacement::Last, &["c", "b", "a", "none-1", "none-2"])]
    #[case(SortDirection::Asc, NullsPlacement::First, &["none-1", "none-2", "a", "b", "c"])]
    fn test_due_date_sort(
        #[case] direction: SortDirection,
        #[case] nulls: NullsPlacement,
        #[case] expected: &[&str],
    ) {
        let sort = TaskSort {
            key: TaskSortKey::DueDate,
            direction,
            nulls,
        };
        let sorted = apply(&sample(), &TaskFilter::default(), sort);
        assert_eq!(titles(&sorted), expected);
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let tasks = vec![
            task("first-low", None, TaskPriority::Low),
            task("urgent", None, TaskPriority::Urgent),
            task("second-low", None, TaskPriority::Low),
        ];
        let sorted = apply(
            &tasks,
            &TaskFilter::default(),
            TaskSort::by(TaskSortKey::Priority).toggled(),
        );
        assert_eq!(titles(&sorted), ["urgent", "first-low", "second-low"]);
    }

    #[test]
    fn test_filter_by_priority_and_search() {
        let mut tasks = sample();
        tasks[2].description = Some("Quarterly REPORT".into());
        let filter = TaskFilter {
            search: "report".into(),
            priority: Some(TaskPriority::High),
            ..TaskFilter::default()
        };
        let out = apply(&tasks, &filter, TaskSort::default());
        assert_eq!(titles(&out), ["a"]);
    }

    #[test]
    fn test_category_all_keeps_everything() {
        let filter = TaskFilter {
            category: "all".into(),
            ..TaskFilter::default()
        };
        assert_eq!(apply(&sample(), &filter, TaskSort::default()).len(), 5);
    }

    #[test]
    fn test_count_by_status_includes_zeroes() {
        let mut tasks = sample();
        tasks[0].status = TaskStatus::Done;
        let counts = count_by_status(&tasks);
        assert_eq!(
            counts,
            vec![
                (TaskStatus::Todo, 4),
                (TaskStatus::InProgress, 0),
                (TaskStatus::Review, 0),
                (TaskStatus::Done, 1),
            ]
        );
    }

    #[test]
    fn test_overdue_skips_done_and_undated() {
        let mut tasks = sample();
        tasks[2].status = TaskStatus::Done;
        let late = overdue(&tasks, day(10));
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].title, "b");
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&TaskPriority::Urgent).unwrap(),
            "\"urgent\""
        );
    }

    #[test]
    fn test_categories_first_seen() {
        let mut tasks = sample();
        tasks[1].category = "Ops".into();
        tasks[3].category = String::new();
        assert_eq!(categories(&tasks), ["General", "Ops"]);
    }
}
