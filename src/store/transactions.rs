//! Transaction operations
//!
//! Create and update check that the referenced category exists at the time
//! of the call. The check and the mutation happen under the same exclusive
//! lock, so a concurrent category delete cannot slip between them.

use chrono::DateTime;

use super::{Store, TransactionFilters};
use crate::error::{TallybookError, TallybookResult};
use crate::models::{Transaction, TransactionId};

impl Store {
    /// List transactions matching the filters, paginated, in insertion order
    pub fn transactions(&self, filters: &TransactionFilters) -> TallybookResult<Vec<Transaction>> {
        let state = self.state_read()?;

        let result: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|t| filters.matches(t))
            .cloned()
            .collect();

        Ok(filters.paginate(result))
    }

    /// Get a transaction by id
    pub fn transaction(&self, id: TransactionId) -> TallybookResult<Transaction> {
        let state = self.state_read()?;
        state
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TallybookError::transaction_not_found(id.to_string()))
    }

    /// Create a transaction; assigns the id, defaults `created_at`, persists
    pub fn create_transaction(&self, mut transaction: Transaction) -> TallybookResult<Transaction> {
        let mut state = self.state_write()?;

        transaction
            .validate(self.now())
            .map_err(|e| TallybookError::Validation(e.to_string()))?;

        if !state.category_exists(transaction.category_id) {
            return Err(TallybookError::Conflict(format!(
                "category {} does not exist",
                transaction.category_id
            )));
        }

        transaction.id = TransactionId::new(state.next_transaction_id);
        state.next_transaction_id += 1;

        if transaction.created_at == DateTime::UNIX_EPOCH {
            transaction.created_at = self.now();
        }

        state.transactions.push(transaction.clone());

        if let Err(e) = self.save_state(&state) {
            state.transactions.pop();
            state.next_transaction_id -= 1;
            return Err(e);
        }

        Ok(transaction)
    }

    /// Update a transaction in place; the record must carry an existing id
    pub fn update_transaction(&self, transaction: Transaction) -> TallybookResult<()> {
        let mut state = self.state_write()?;

        transaction
            .validate(self.now())
            .map_err(|e| TallybookError::Validation(e.to_string()))?;

        if !state.category_exists(transaction.category_id) {
            return Err(TallybookError::Conflict(format!(
                "category {} does not exist",
                transaction.category_id
            )));
        }

        let position = state
            .transactions
            .iter()
            .position(|t| t.id == transaction.id)
            .ok_or_else(|| TallybookError::transaction_not_found(transaction.id.to_string()))?;

        let previous = std::mem::replace(&mut state.transactions[position], transaction);

        if let Err(e) = self.save_state(&state) {
            state.transactions[position] = previous;
            return Err(e);
        }

        Ok(())
    }

    /// Delete a transaction by id
    pub fn delete_transaction(&self, id: TransactionId) -> TallybookResult<()> {
        let mut state = self.state_write()?;

        let position = state
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TallybookError::transaction_not_found(id.to_string()))?;

        let removed = state.transactions.remove(position);

        if let Err(e) = self.save_state(&state) {
            state.transactions.insert(position, removed);
            return Err(e);
        }

        Ok(())
    }
}
