//! Derived report types
//!
//! Computed on demand from store contents; never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::category::CategoryType;
use super::ids::CategoryId;

/// Income/expense totals over a date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`
    pub balance: f64,
    /// "monthly" when the window sits inside one calendar month, else
    /// "custom"; informational only
    pub period: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Per-category accumulated amount over a date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category_id: CategoryId,
    /// Empty when the referenced category has since been deleted
    pub category_name: String,
    pub amount: f64,
    /// Share of the combined total across all summarized categories;
    /// income and expense amounts share one denominator
    pub percentage: f64,
    /// None when the referenced category has since been deleted
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
}

/// Budget-vs-spend comparison over the budget's coverage window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub budget: Budget,
    pub spent_amount: f64,
    pub remaining: f64,
    /// Spend as a percentage of the budgeted amount; 0 when the amount
    /// is not positive
    pub progress: f64,
    pub is_over_budget: bool,
}
