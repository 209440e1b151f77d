//! Budget data types.

use businessos_shared::types::{BudgetCategoryId, BudgetId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{non_negative, not_blank};

/// Budget lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BudgetStatus {
    /// Currently tracked.
    Active,
    /// Being prepared.
    #[default]
    Draft,
    /// Closed, read-only.
    Archived,
}

/// A budget record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Budget name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Total amount available.
    pub total_amount: Decimal,
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// Fiscal-year label, e.g. `FY2026`.
    pub fiscal_year: String,
    /// Lifecycle status.
    pub status: BudgetStatus,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Budget {
    /// True if `date` falls within the budget period (inclusive).
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Input for creating or updating a budget.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_budget_period"))]
pub struct BudgetInput {
    /// Budget name.
    #[validate(custom(function = "not_blank", message = "Budget name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Total amount available.
    #[validate(custom(function = "non_negative"))]
    pub total_amount: Decimal,
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// Fiscal-year label.
    #[validate(custom(function = "not_blank", message = "Fiscal year is required"))]
    pub fiscal_year: String,
    /// Lifecycle status.
    pub status: BudgetStatus,
}

fn validate_budget_period(input: &BudgetInput) -> Result<(), ValidationError> {
    if input.end_date < input.start_date {
        return Err(ValidationError::new("period")
            .with_message("End date must be on or after the start date".into()));
    }
    Ok(())
}

/// A budget category (allocation line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category ID.
    pub id: BudgetCategoryId,
    /// Parent budget ID.
    pub budget_id: BudgetId,
    /// Category name; expense transactions are matched to it by name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Amount allocated.
    pub allocated_amount: Decimal,
}

/// Input for creating or updating a budget category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BudgetCategoryInput {
    /// Category name.
    #[validate(custom(function = "not_blank", message = "Category name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Amount allocated.
    #[validate(custom(function = "non_negative"))]
    pub allocated_amount: Decimal,
}

/// Spending status of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryStatus {
    /// Spent more than allocated.
    #[serde(rename = "Over Budget")]
    OverBudget,
    /// 90% or more spent.
    #[serde(rename = "Near Limit")]
    NearLimit,
    /// 50% to 90% spent.
    #[serde(rename = "On Track")]
    OnTrack,
    /// Less than 50% spent.
    #[serde(rename = "Under Budget")]
    UnderBudget,
}

impl CategoryStatus {
    /// Classifies a spending percentage (0-100 scale).
    #[must_use]
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage > Decimal::ONE_HUNDRED {
            Self::OverBudget
        } else if percentage >= Decimal::from(90) {
            Self::NearLimit
        } else if percentage >= Decimal::from(50) {
            Self::OnTrack
        } else {
            Self::UnderBudget
        }
    }

    /// Label shown on badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OverBudget => "Over Budget",
            Self::NearLimit => "Near Limit",
            Self::OnTrack => "On Track",
            Self::UnderBudget => "Under Budget",
        }
    }
}

/// Backend-derived performance of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    /// Category ID.
    pub category_id: BudgetCategoryId,
    /// Category name.
    pub name: String,
    /// Amount allocated.
    pub allocated_amount: Decimal,
    /// Amount spent so far.
    pub spent_amount: Decimal,
    /// Allocated minus spent (negative when over budget).
    pub remaining_amount: Decimal,
    /// Spent as a percentage of allocated.
    pub spending_percentage: Decimal,
    /// Spending status.
    pub status: CategoryStatus,
}

/// Spending total for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySpending {
    /// Month label, `YYYY-MM`.
    pub month: String,
    /// Amount spent in the month.
    pub amount: Decimal,
}

/// Backend-derived budget performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPerformance {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub budget_name: String,
    /// Sum of category allocations.
    pub total_allocated: Decimal,
    /// Sum of category spending.
    pub total_spent: Decimal,
    /// Allocated minus spent.
    pub total_remaining: Decimal,
    /// Spent as a percentage of allocated.
    pub overall_percentage: Decimal,
    /// Per-category figures.
    pub categories: Vec<CategoryPerformance>,
    /// Spending per month, chronological.
    #[serde(default)]
    pub monthly_spending: Vec<MonthlySpending>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_input;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn input() -> BudgetInput {
        BudgetInput {
            name: "Operations".into(),
            description: None,
            total_amount: dec!(50000),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            fiscal_year: "FY2026".into(),
            status: BudgetStatus::Active,
        }
    }

    #[rstest]
    #[case(dec!(100.01), CategoryStatus::OverBudget)]
    #[case(dec!(100), CategoryStatus::NearLimit)]
    #[case(dec!(90), CategoryStatus::NearLimit)]
    #[case(dec!(89.99), CategoryStatus::OnTrack)]
    #[case(dec!(50), CategoryStatus::OnTrack)]
    #[case(dec!(49.99), CategoryStatus::UnderBudget)]
    #[case(dec!(0), CategoryStatus::UnderBudget)]
    fn test_category_status_thresholds(#[case] pct: Decimal, #[case] expected: CategoryStatus) {
        assert_eq!(CategoryStatus::from_percentage(pct), expected);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&CategoryStatus::NearLimit).unwrap(),
            "\"Near Limit\""
        );
        assert_eq!(
            serde_json::to_string(&BudgetStatus::Archived).unwrap(),
            "\"Archived\""
        );
    }

    #[test]
    fn test_budget_input_valid() {
        assert!(validate_input(&input()).is_ok());
    }

    #[test]
    fn test_budget_input_rejects_inverted_period() {
        let mut bad = input();
        bad.end_date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let err = validate_input(&bad).unwrap_err();
        assert!(err.to_string().contains("End date"));
    }

    #[test]
    fn test_category_input_rejects_negative() {
        let bad = BudgetCategoryInput {
            name: "Travel".into(),
            description: None,
            allocated_amount: dec!(-1),
        };
        assert!(validate_input(&bad).is_err());
    }

    #[test]
    fn test_budget_covers() {
        let budget = Budget {
            id: BudgetId::new(),
            name: "Ops".into(),
            description: None,
            total_amount: dec!(1),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            fiscal_year: "FY2026".into(),
            status: BudgetStatus::Active,
            created_at: None,
        };
        assert!(budget.covers(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!budget.covers(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    }
}
