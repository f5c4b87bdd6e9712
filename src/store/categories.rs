//! Category operations
//!
//! Categories are unique per `(name, type)` pair. Deleting a category does
//! not cascade: transactions and budgets keep their now-dangling reference.

use super::Store;
use crate::error::{TallybookError, TallybookResult};
use crate::models::{Category, CategoryId};

impl Store {
    /// List all categories in insertion order
    pub fn categories(&self) -> TallybookResult<Vec<Category>> {
        let state = self.state_read()?;
        Ok(state.categories.clone())
    }

    /// Get a category by id
    pub fn category(&self, id: CategoryId) -> TallybookResult<Category> {
        let state = self.state_read()?;
        state
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| TallybookError::category_not_found(id.to_string()))
    }

    /// Create a category; assigns the id and persists
    pub fn create_category(&self, mut category: Category) -> TallybookResult<Category> {
        let mut state = self.state_write()?;

        category
            .validate()
            .map_err(|e| TallybookError::Validation(e.to_string()))?;

        for existing in &state.categories {
            if existing.name == category.name
                && existing.category_type == category.category_type
            {
                return Err(TallybookError::Conflict(format!(
                    "category '{}' already exists with type '{}'",
                    category.name, category.category_type
                )));
            }
        }

        category.id = CategoryId::new(state.next_category_id);
        state.next_category_id += 1;
        state.categories.push(category.clone());

        if let Err(e) = self.save_state(&state) {
            // Roll the append back so memory and disk stay in sync
            state.categories.pop();
            state.next_category_id -= 1;
            return Err(e);
        }

        Ok(category)
    }

    /// Update a category in place; the record must carry an existing id
    pub fn update_category(&self, category: Category) -> TallybookResult<()> {
        let mut state = self.state_write()?;

        category
            .validate()
            .map_err(|e| TallybookError::Validation(e.to_string()))?;

        let position = state
            .categories
            .iter()
            .position(|c| c.id == category.id)
            .ok_or_else(|| TallybookError::category_not_found(category.id.to_string()))?;

        for (i, other) in state.categories.iter().enumerate() {
            if i != position
                && other.name == category.name
                && other.category_type == category.category_type
            {
                return Err(TallybookError::Conflict(format!(
                    "category '{}' already exists with type '{}'",
                    category.name, category.category_type
                )));
            }
        }

        let previous = std::mem::replace(&mut state.categories[position], category);

        if let Err(e) = self.save_state(&state) {
            state.categories[position] = previous;
            return Err(e);
        }

        Ok(())
    }

    /// Delete a category by id
    ///
    /// Dependent transactions and budgets are left untouched.
    pub fn delete_category(&self, id: CategoryId) -> TallybookResult<()> {
        let mut state = self.state_write()?;

        let position = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| TallybookError::category_not_found(id.to_string()))?;

        let removed = state.categories.remove(position);

        if let Err(e) = self.save_state(&state) {
            state.categories.insert(position, removed);
            return Err(e);
        }

        Ok(())
    }
}
