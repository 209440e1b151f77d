//! Budget analysis page.
//!
//! Picks a budget, fetches its backend-computed performance and reshapes it
//! into chart data. No spending figure is computed here.

use std::sync::Arc;

use businessos_core::finance::charts::{
    allocated_vs_spent, allocation_pie, attention_list, category_rows, monthly_trend,
    spending_pie, summary_cards,
};
use businessos_core::finance::{
    Budget, BudgetPerformance, CategoryChartRow, PieSlice, SeriesChart, SummaryCards,
};
use businessos_core::ports::BudgetApi;
use businessos_shared::types::{BudgetId, Currency};

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// State of the analysis page.
pub struct BudgetAnalysisView {
    api: Arc<dyn BudgetApi>,
    scope: ViewScope,
    currency: Currency,
    budgets: Vec<Budget>,
    selected: Option<BudgetId>,
    performance: Option<BudgetPerformance>,
}

impl BudgetAnalysisView {
    /// Empty page formatting amounts in `currency`.
    pub fn new(api: Arc<dyn BudgetApi>, currency: Currency, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            currency,
            budgets: Vec::new(),
            selected: None,
            performance: None,
        }
    }

    /// Lifetime of the page.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Budgets to choose from.
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Selected budget.
    pub fn selected(&self) -> Option<BudgetId> {
        self.selected
    }

    /// Performance of the selected budget, once loaded.
    pub fn performance(&self) -> Option<&BudgetPerformance> {
        self.performance.as_ref()
    }

    /// Loads the budgets, selects the first if nothing valid is selected and
    /// fetches its performance.
    pub async fn open(&mut self) -> bool {
        let Some(budgets) = self
            .scope
            .run("Failed to load budgets", self.api.list_budgets())
            .await
        else {
            return false;
        };
        self.budgets = budgets;
        let keep = self
            .selected
            .filter(|id| self.budgets.iter().any(|b| b.id == *id));
        match keep.or_else(|| self.budgets.first().map(|b| b.id)) {
            Some(id) => self.select(id).await,
            None => {
                self.selected = None;
                self.performance = None;
                true
            }
        }
    }

    /// Switches to `budget`. On failure the previous selection stays.
    pub async fn select(&mut self, budget: BudgetId) -> bool {
        let fetched = self
            .scope
            .run("Failed to load budget analysis", self.api.performance(budget))
            .await;
        let Some(performance) = fetched else {
            return false;
        };
        self.selected = Some(budget);
        self.performance = Some(performance);
        true
    }

    /// Breakdown table rows.
    pub fn rows(&self) -> Vec<CategoryChartRow> {
        self.performance.as_ref().map(category_rows).unwrap_or_default()
    }

    /// Allocation pie.
    pub fn allocation_pie(&self) -> Vec<PieSlice> {
        self.performance.as_ref().map(allocation_pie).unwrap_or_default()
    }

    /// Spending pie.
    pub fn spending_pie(&self) -> Vec<PieSlice> {
        self.performance.as_ref().map(spending_pie).unwrap_or_default()
    }

    /// Allocated vs spent bars.
    pub fn bars(&self) -> SeriesChart {
        self.performance
            .as_ref()
            .map(allocated_vs_spent)
            .unwrap_or_default()
    }

    /// Monthly spending line.
    pub fn trend(&self) -> SeriesChart {
        self.performance.as_ref().map(monthly_trend).unwrap_or_default()
    }

    /// Formatted totals.
    pub fn summary(&self) -> Option<SummaryCards> {
        self.performance
            .as_ref()
            .map(|p| summary_cards(p, self.currency))
    }

    /// Over-budget and near-limit categories, worst first.
    pub fn attention(&self) -> Vec<CategoryChartRow> {
        self.performance.as_ref().map(attention_list).unwrap_or_default()
    }

    /// Closes the page.
    pub fn close(&self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBudgets, server_error};
    use businessos_core::finance::{BudgetStatus, CategoryPerformance, CategoryStatus};
    use businessos_shared::types::BudgetCategoryId;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn budget(name: &str) -> Budget {
        Budget {
            id: BudgetId::new(),
            name: name.into(),
            description: None,
            total_amount: dec!(50000),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            fiscal_year: "FY2026".into(),
            status: BudgetStatus::Active,
            created_at: None,
        }
    }

    fn line(
        name: &str,
        allocated: Decimal,
        spent: Decimal,
        status: CategoryStatus,
    ) -> CategoryPerformance {
        CategoryPerformance {
            category_id: BudgetCategoryId::new(),
            name: name.into(),
            allocated_amount: allocated,
            spent_amount: spent,
            remaining_amount: allocated - spent,
            spending_percentage: (spent / allocated * dec!(100)).round_dp(2),
            status,
        }
    }

    fn performance(budget: &Budget) -> BudgetPerformance {
        BudgetPerformance {
            budget_id: budget.id,
            budget_name: budget.name.clone(),
            total_allocated: dec!(23000),
            total_spent: dec!(21800),
            total_remaining: dec!(1200),
            overall_percentage: dec!(94.78),
            categories: vec![
                line("Marketing", dec!(15000), dec!(14100), CategoryStatus::NearLimit),
                line("Travel", dec!(8000), dec!(7700), CategoryStatus::NearLimit),
            ],
            monthly_spending: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_open_selects_first_budget() {
        let ops = budget("Operations 2026");
        let perf = performance(&ops);
        let mut mock = MockBudgets::new();
        let listed = vec![ops.clone(), budget("Hiring 2026")];
        mock.expect_list_budgets()
            .times(1)
            .returning(move || Ok(listed.clone()));
        let expected_id = ops.id;
        mock.expect_performance()
            .withf(move |id| *id == expected_id)
            .times(1)
            .returning(move |_| Ok(perf.clone()));

        let mut view = BudgetAnalysisView::new(Arc::new(mock), Currency::Usd, Notifier::new());
        assert!(view.open().await);

        assert_eq!(view.selected(), Some(ops.id));
        let allocated: Decimal = view.rows().iter().map(|r| r.allocated).sum();
        assert_eq!(allocated, dec!(23000));
        assert_eq!(view.bars().labels, ["Marketing", "Travel"]);
        assert!(view.summary().is_some());
    }

    #[tokio::test]
    async fn test_failed_switch_keeps_previous_budget() {
        let ops = budget("Operations 2026");
        let perf = performance(&ops);
        let mut mock = MockBudgets::new();
        let listed = vec![ops.clone()];
        mock.expect_list_budgets().returning(move || Ok(listed.clone()));
        let ops_id = ops.id;
        mock.expect_performance()
            .withf(move |id| *id == ops_id)
            .returning(move |_| Ok(perf.clone()));
        mock.expect_performance()
            .withf(move |id| *id != ops_id)
            .returning(|_| Err(server_error()));

        let notifier = Notifier::new();
        let mut view = BudgetAnalysisView::new(Arc::new(mock), Currency::Usd, notifier.clone());
        assert!(view.open().await);
        let before = view.performance().cloned();

        assert!(!view.select(BudgetId::new()).await);
        assert_eq!(view.selected(), Some(ops.id));
        assert_eq!(view.performance().cloned(), before);
        assert_eq!(notifier.error_count(), 1);
    }

    #[tokio::test]
    async fn test_no_budgets_means_no_charts() {
        let mut mock = MockBudgets::new();
        mock.expect_list_budgets().returning(|| Ok(Vec::new()));
        mock.expect_performance().never();

        let mut view = BudgetAnalysisView::new(Arc::new(mock), Currency::Eur, Notifier::new());
        assert!(view.open().await);
        assert!(view.rows().is_empty());
        assert!(view.summary().is_none());
        assert!(view.trend().labels.is_empty());
    }
}
