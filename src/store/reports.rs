//! Aggregation operations
//!
//! Pure read-side computations over the store's current snapshot: income
//! vs expense totals, per-category breakdowns, and budget-vs-spend reports.
//! Each takes the shared lock, computes, and releases; nothing is mutated.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

use super::Store;
use crate::error::{TallybookError, TallybookResult};
use crate::models::{
    BudgetId, BudgetReport, CategoryId, CategorySummary, CategoryType, FinancialSummary,
    TransactionType,
};

impl Store {
    /// Sum transaction amounts in `[start, end]` split by type
    ///
    /// The period label is "monthly" when the window's endpoints share a
    /// calendar year and month, else "custom"; it is informational only.
    pub fn financial_summary(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> TallybookResult<FinancialSummary> {
        let state = self.state_read()?;

        let mut total_income = 0.0;
        let mut total_expenses = 0.0;

        for txn in &state.transactions {
            if txn.date < start_date || txn.date > end_date {
                continue;
            }

            match txn.transaction_type {
                TransactionType::Income => total_income += txn.amount,
                TransactionType::Expense => total_expenses += txn.amount,
            }
        }

        let period = if start_date.year() == end_date.year()
            && start_date.month() == end_date.month()
        {
            "monthly"
        } else {
            "custom"
        };

        Ok(FinancialSummary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            period: period.to_string(),
            start_date,
            end_date,
        })
    }

    /// Accumulate transaction amounts per category over `[start, end]`
    ///
    /// Categories with no transactions in the window are omitted. A category
    /// that was deleted after its transactions were recorded still gets a
    /// summary entry, with an empty name and no type. Percentages are each
    /// category's share of the combined total; income and expense amounts
    /// share the one denominator.
    pub fn category_summary(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> TallybookResult<Vec<CategorySummary>> {
        let state = self.state_read()?;

        let mut category_amounts: HashMap<CategoryId, f64> = HashMap::new();

        for txn in &state.transactions {
            if txn.date < start_date || txn.date > end_date {
                continue;
            }

            *category_amounts.entry(txn.category_id).or_insert(0.0) += txn.amount;
        }

        let mut category_names: HashMap<CategoryId, &str> = HashMap::new();
        let mut category_types: HashMap<CategoryId, CategoryType> = HashMap::new();
        for category in &state.categories {
            if category_amounts.contains_key(&category.id) {
                category_names.insert(category.id, category.name.as_str());
                category_types.insert(category.id, category.category_type);
            }
        }

        let total_amount: f64 = category_amounts.values().sum();

        let mut summaries: Vec<CategorySummary> = category_amounts
            .iter()
            .map(|(&category_id, &amount)| {
                let percentage = if total_amount > 0.0 {
                    (amount / total_amount) * 100.0
                } else {
                    0.0
                };

                CategorySummary {
                    category_id,
                    category_name: category_names
                        .get(&category_id)
                        .map(|name| name.to_string())
                        .unwrap_or_default(),
                    amount,
                    percentage,
                    category_type: category_types.get(&category_id).copied(),
                }
            })
            .collect();

        // Map iteration order is arbitrary; order by id for stable output
        summaries.sort_by_key(|s| s.category_id);

        Ok(summaries)
    }

    /// Compare a budget's amount against the spend in its coverage window
    ///
    /// Spend sums every transaction of the budget's category inside the
    /// window, income and expense alike; categorizing an income record
    /// under a budgeted category counts it toward the cap on purpose.
    pub fn budget_report(&self, budget_id: BudgetId) -> TallybookResult<BudgetReport> {
        let state = self.state_read()?;

        let budget = state
            .budgets
            .iter()
            .find(|b| b.id == budget_id)
            .cloned()
            .ok_or_else(|| TallybookError::budget_not_found(budget_id.to_string()))?;

        let start_date = budget.month;
        let end_date = budget.period.end_of_window(start_date);

        let mut spent_amount = 0.0;
        for txn in &state.transactions {
            if txn.category_id == budget.category_id
                && txn.date >= start_date
                && txn.date <= end_date
            {
                spent_amount += txn.amount;
            }
        }

        let remaining = budget.amount - spent_amount;
        let progress = if budget.amount > 0.0 {
            (spent_amount / budget.amount) * 100.0
        } else {
            0.0
        };
        let is_over_budget = spent_amount > budget.amount;

        Ok(BudgetReport {
            budget,
            spent_amount,
            remaining,
            progress,
            is_over_budget,
        })
    }
}
