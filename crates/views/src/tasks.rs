//! Task manager.
//!
//! Holds the fetched task list and derives the filtered, sorted view from
//! it on every read. Clicking the active sort column flips its direction.

use std::sync::Arc;

use businessos_core::ports::TaskApi;
use businessos_core::tasks::{
    self, Task, TaskFilter, TaskInput, TaskSort, TaskSortKey, TaskStatus,
};
use businessos_core::validate_input;
use businessos_shared::types::TaskId;
use chrono::NaiveDate;

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// State of the task manager.
pub struct TaskManagerView {
    api: Arc<dyn TaskApi>,
    scope: ViewScope,
    tasks: Vec<Task>,
    filter: TaskFilter,
    sort: TaskSort,
}

fn input_from(task: &Task, status: TaskStatus) -> TaskInput {
    TaskInput {
        title: task.title.clone(),
        description: task.description.clone(),
        status,
        priority: task.priority,
        category: task.category.clone(),
        assignee: task.assignee,
        due_date: task.due_date,
    }
}

impl TaskManagerView {
    /// Empty manager sorted by due date, soonest first.
    pub fn new(api: Arc<dyn TaskApi>, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            sort: TaskSort::default(),
        }
    }

    /// Lifetime of the page.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Tasks as last fetched, backend order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mutable filter.
    pub fn filter_mut(&mut self) -> &mut TaskFilter {
        &mut self.filter
    }

    /// Current sort.
    pub fn sort(&self) -> TaskSort {
        self.sort
    }

    /// Sorts by `key`; the same key again flips direction.
    pub fn sort_by(&mut self, key: TaskSortKey) {
        self.sort = if self.sort.key == key {
            self.sort.toggled()
        } else {
            TaskSort {
                key,
                ..self.sort
            }
        };
    }

    /// Filtered and sorted tasks.
    pub fn visible(&self) -> Vec<Task> {
        tasks::apply(&self.tasks, &self.filter, self.sort)
    }

    /// Category options for the filter box.
    pub fn categories(&self) -> Vec<String> {
        tasks::categories(&self.tasks)
    }

    /// Column counts for the board header.
    pub fn counts(&self) -> Vec<(TaskStatus, usize)> {
        tasks::count_by_status(&self.tasks)
    }

    /// Open tasks past due on `today`.
    pub fn overdue(&self, today: NaiveDate) -> Vec<&Task> {
        tasks::overdue(&self.tasks, today)
    }

    /// Fetches the tasks.
    pub async fn load(&mut self) -> bool {
        match self
            .scope
            .run("Failed to load tasks", self.api.list_tasks())
            .await
        {
            Some(tasks) => {
                self.tasks = tasks;
                true
            }
            None => false,
        }
    }

    /// Creates a task and re-fetches.
    pub async fn create(&mut self, input: TaskInput) -> bool {
        const TITLE: &str = "Failed to create task";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(task) = self.scope.run(TITLE, self.api.create_task(&input)).await else {
            return false;
        };
        self.scope.notifier().success("Task created", task.title);
        self.load().await
    }

    /// Saves a task and re-fetches.
    pub async fn update(&mut self, id: TaskId, input: TaskInput) -> bool {
        const TITLE: &str = "Failed to update task";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        if self
            .scope
            .run(TITLE, self.api.update_task(id, &input))
            .await
            .is_none()
        {
            return false;
        }
        self.scope.notifier().success("Task updated", input.title);
        self.load().await
    }

    /// Moves a task to another column.
    pub async fn move_to(&mut self, id: TaskId, status: TaskStatus) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };
        let input = input_from(task, status);
        self.update(id, input).await
    }

    /// Deletes a task and re-fetches.
    pub async fn delete(&mut self, id: TaskId) -> bool {
        if self
            .scope
            .run("Failed to delete task", self.api.delete_task(id))
            .await
            .is_none()
        {
            return false;
        }
        self.scope.notifier().success("Task deleted", "The task was removed");
        self.load().await
    }

    /// Closes the page.
    pub fn close(&self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTasks, server_error};
    use businessos_core::SortDirection;
    use businessos_core::tasks::TaskPriority;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn task(title: &str, due: Option<(i32, u32, u32)>, priority: TaskPriority) -> Task {
        Task {
            id: TaskId::new(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority,
            category: "ops".into(),
            assignee: None,
            due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    fn board() -> Vec<Task> {
        vec![
            task("Renew domain", None, TaskPriority::Low),
            task("File VAT return", Some((2026, 4, 20)), TaskPriority::Urgent),
            task("Plan offsite", Some((2026, 6, 1)), TaskPriority::Medium),
            task("Order laptops", Some((2026, 3, 15)), TaskPriority::High),
        ]
    }

    async fn view_with(tasks: Vec<Task>) -> TaskManagerView {
        let mut mock = MockTasks::new();
        mock.expect_list_tasks().returning(move || Ok(tasks.clone()));
        let mut view = TaskManagerView::new(Arc::new(mock), Notifier::new());
        assert!(view.load().await);
        view
    }

    #[rstest]
    #[case(
        SortDirection::Asc,
        ["Order laptops", "File VAT return", "Plan offsite", "Renew domain"]
    )]
    #[case(
        SortDirection::Desc,
        ["Plan offsite", "File VAT return", "Order laptops", "Renew domain"]
    )]
    #[tokio::test]
    async fn test_due_date_sort_keeps_undated_last(
        #[case] direction: SortDirection,
        #[case] expected: [&str; 4],
    ) {
        let mut view = view_with(board()).await;
        if direction == SortDirection::Desc {
            view.sort_by(TaskSortKey::DueDate);
        }
        assert_eq!(view.sort().direction, direction);
        let titles: Vec<_> = view.visible().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, expected);
    }

    #[tokio::test]
    async fn test_switching_key_keeps_direction() {
        let mut view = view_with(board()).await;
        view.sort_by(TaskSortKey::DueDate);
        view.sort_by(TaskSortKey::Priority);
        assert_eq!(view.sort().key, TaskSortKey::Priority);
        assert_eq!(view.sort().direction, SortDirection::Desc);
        assert_eq!(view.visible()[0].title, "File VAT return");
    }

    #[tokio::test]
    async fn test_overdue_and_counts() {
        let view = view_with(board()).await;
        let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let overdue: Vec<_> = view.overdue(today).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(overdue, ["Order laptops"]);
        assert_eq!(view.counts()[0], (TaskStatus::Todo, 4));
    }

    #[tokio::test]
    async fn test_move_to_done_sends_full_task() {
        let tasks = board();
        let target = tasks[1].clone();
        let mut mock = MockTasks::new();
        let listed = tasks.clone();
        mock.expect_list_tasks().returning(move || Ok(listed.clone()));
        let expected = target.clone();
        mock.expect_update_task()
            .withf(move |id, input| {
                *id == expected.id
                    && input.status == TaskStatus::Done
                    && input.title == expected.title
                    && input.due_date == expected.due_date
            })
            .times(1)
            .returning(move |_, _| Ok(target.clone()));

        let mut view = TaskManagerView::new(Arc::new(mock), Notifier::new());
        view.load().await;
        assert!(view.move_to(tasks[1].id, TaskStatus::Done).await);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_tasks() {
        let tasks = board();
        let mut mock = MockTasks::new();
        let listed = tasks.clone();
        mock.expect_list_tasks()
            .times(1)
            .returning(move || Ok(listed.clone()));
        mock.expect_delete_task()
            .returning(|_| Err(server_error()));

        let notifier = Notifier::new();
        let mut view = TaskManagerView::new(Arc::new(mock), notifier.clone());
        view.load().await;
        assert!(!view.delete(tasks[0].id).await);
        assert_eq!(view.tasks(), tasks.as_slice());
        assert_eq!(notifier.len(), 1);
    }
}
