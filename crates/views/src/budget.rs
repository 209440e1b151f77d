//! Budget categories dialog.
//!
//! Lists the categories of one budget and creates, edits or removes them.
//! Every successful write is followed by a full re-fetch; nothing is
//! patched locally.

use std::sync::Arc;

use businessos_core::finance::{BudgetCategory, BudgetCategoryInput, amount};
use businessos_core::listing::{category_matches, contains_ignore_case};
use businessos_core::ports::BudgetApi;
use businessos_core::validate_input;
use businessos_shared::types::{BudgetCategoryId, BudgetId};
use rust_decimal::Decimal;

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// State of the categories dialog for one budget.
pub struct BudgetCategoriesView {
    api: Arc<dyn BudgetApi>,
    scope: ViewScope,
    budget: BudgetId,
    categories: Vec<BudgetCategory>,
    search: String,
    selected: String,
}

impl BudgetCategoriesView {
    /// Dialog for `budget`; call [`load`](Self::load) to fill it.
    pub fn new(api: Arc<dyn BudgetApi>, budget: BudgetId, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            budget,
            categories: Vec::new(),
            search: String::new(),
            selected: String::new(),
        }
    }

    /// Lifetime of the dialog.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Categories as last fetched.
    pub fn categories(&self) -> &[BudgetCategory] {
        &self.categories
    }

    /// Sets the name search.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Restricts the list to one category name; `"all"` shows everything.
    pub fn select_category(&mut self, name: impl Into<String>) {
        self.selected = name.into();
    }

    /// Categories passing the search and selection, in fetched order.
    pub fn visible(&self) -> Vec<&BudgetCategory> {
        self.categories
            .iter()
            .filter(|c| category_matches(&c.name, &self.selected))
            .filter(|c| contains_ignore_case(&c.name, &self.search))
            .collect()
    }

    /// Sum of every allocation.
    pub fn total_allocated(&self) -> Decimal {
        amount::total(self.categories.iter().map(|c| c.allocated_amount))
    }

    /// Fetches the categories. Returns `false` on failure, leaving the list as it was.
    pub async fn load(&mut self) -> bool {
        let fetched = self
            .scope
            .run(
                "Failed to load categories",
                self.api.list_categories(self.budget),
            )
            .await;
        match fetched {
            Some(categories) => {
                self.categories = categories;
                true
            }
            None => false,
        }
    }

    /// Creates a category and re-fetches.
    pub async fn create(&mut self, input: BudgetCategoryInput) -> bool {
        const TITLE: &str = "Failed to create category";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let created = self
            .scope
            .run(TITLE, self.api.create_category(self.budget, &input))
            .await;
        let Some(created) = created else {
            return false;
        };
        self.scope
            .notifier()
            .success("Category created", format!("{} added to the budget", created.name));
        self.load().await
    }

    /// Updates a category and re-fetches.
    pub async fn update(&mut self, id: BudgetCategoryId, input: BudgetCategoryInput) -> bool {
        const TITLE: &str = "Failed to update category";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let updated = self
            .scope
            .run(TITLE, self.api.update_category(self.budget, id, &input))
            .await;
        if updated.is_none() {
            return false;
        }
        self.scope.notifier().success("Category updated", input.name);
        self.load().await
    }

    /// Removes a category and re-fetches.
    pub async fn delete(&mut self, id: BudgetCategoryId) -> bool {
        let deleted = self
            .scope
            .run(
                "Failed to delete category",
                self.api.delete_category(self.budget, id),
            )
            .await;
        if deleted.is_none() {
            return false;
        }
        self.scope
            .notifier()
            .success("Category deleted", "The category was removed");
        self.load().await
    }

    /// Closes the dialog; late responses are dropped.
    pub fn close(&self) {
        self.scope.close();
    }
}
