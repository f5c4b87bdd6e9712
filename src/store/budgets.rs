//! Budget operations
//!
//! At most one budget may exist per `(category, period, year-month)` key;
//! both create and update enforce it, update excluding the record itself.

use chrono::DateTime;

use super::{BudgetFilters, Store};
use crate::error::{TallybookError, TallybookResult};
use crate::models::{Budget, BudgetId};

impl Store {
    /// List budgets matching the filters, in insertion order
    pub fn budgets(&self, filters: &BudgetFilters) -> TallybookResult<Vec<Budget>> {
        let state = self.state_read()?;

        Ok(state
            .budgets
            .iter()
            .filter(|b| filters.matches(b))
            .cloned()
            .collect())
    }

    /// Get a budget by id
    pub fn budget(&self, id: BudgetId) -> TallybookResult<Budget> {
        let state = self.state_read()?;
        state
            .budgets
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| TallybookError::budget_not_found(id.to_string()))
    }

    /// Create a budget; assigns the id, defaults `created_at`, persists
    pub fn create_budget(&self, mut budget: Budget) -> TallybookResult<Budget> {
        let mut state = self.state_write()?;

        budget
            .validate()
            .map_err(|e| TallybookError::Validation(e.to_string()))?;

        if !state.category_exists(budget.category_id) {
            return Err(TallybookError::Conflict(format!(
                "category {} does not exist",
                budget.category_id
            )));
        }

        if state
            .budgets
            .iter()
            .any(|existing| existing.period_key() == budget.period_key())
        {
            return Err(TallybookError::Conflict(format!(
                "budget already exists for category {} and this period",
                budget.category_id
            )));
        }

        budget.id = BudgetId::new(state.next_budget_id);
        state.next_budget_id += 1;

        if budget.created_at == DateTime::UNIX_EPOCH {
            budget.created_at = self.now();
        }

        state.budgets.push(budget.clone());

        if let Err(e) = self.save_state(&state) {
            state.budgets.pop();
            state.next_budget_id -= 1;
            return Err(e);
        }

        Ok(budget)
    }

    /// Update a budget in place; the record must carry an existing id
    pub fn update_budget(&self, budget: Budget) -> TallybookResult<()> {
        let mut state = self.state_write()?;

        budget
            .validate()
            .map_err(|e| TallybookError::Validation(e.to_string()))?;

        if !state.category_exists(budget.category_id) {
            return Err(TallybookError::Conflict(format!(
                "category {} does not exist",
                budget.category_id
            )));
        }

        let position = state
            .budgets
            .iter()
            .position(|b| b.id == budget.id)
            .ok_or_else(|| TallybookError::budget_not_found(budget.id.to_string()))?;

        for (i, other) in state.budgets.iter().enumerate() {
            if i != position && other.period_key() == budget.period_key() {
                return Err(TallybookError::Conflict(format!(
                    "budget already exists for category {} and this period",
                    budget.category_id
                )));
            }
        }

        let previous = std::mem::replace(&mut state.budgets[position], budget);

        if let Err(e) = self.save_state(&state) {
            state.budgets[position] = previous;
            return Err(e);
        }

        Ok(())
    }

    /// Delete a budget by id
    pub fn delete_budget(&self, id: BudgetId) -> TallybookResult<()> {
        let mut state = self.state_write()?;

        let position = state
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| TallybookError::budget_not_found(id.to_string()))?;

        let removed = state.budgets.remove(position);

        if let Err(e) = self.save_state(&state) {
            state.budgets.insert(position, removed);
            return Err(e);
        }

        Ok(())
    }
}
