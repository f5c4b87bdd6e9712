//! Embedded record store
//!
//! Owns the three record collections (categories, transactions, budgets)
//! behind a single reader-writer lock, persists the whole document to one
//! JSON file after every mutation, and reloads it at startup.
//!
//! The coarse lock is deliberate: a write operation holds the exclusive
//! lock across validation, the in-memory mutation, and the file write, so
//! the file on disk always reflects a fully-validated, fully-applied state.

pub mod file_io;
pub mod filters;

mod budgets;
mod categories;
mod reports;
mod transactions;

pub use filters::{BudgetFilters, TransactionFilters};

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::paths::TallybookPaths;
use crate::error::{TallybookError, TallybookResult};
use crate::models::{default_categories, Budget, Category, Transaction};

/// Persisted document layout: the three collections, in insertion order
///
/// Id counters are not persisted; they are recomputed from the record ids
/// on every load.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Serialization view over the in-memory state, to avoid cloning on save
#[derive(Serialize)]
struct StoreDocumentRef<'a> {
    categories: &'a [Category],
    transactions: &'a [Transaction],
    budgets: &'a [Budget],
}

/// Everything guarded by the store's lock: the three collections and the
/// per-kind id counters
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) categories: Vec<Category>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) budgets: Vec<Budget>,
    pub(crate) next_category_id: i64,
    pub(crate) next_transaction_id: i64,
    pub(crate) next_budget_id: i64,
}

impl StoreState {
    /// Recompute each id counter as `max(existing ids) + 1`
    ///
    /// The persisted format does not store counters, so they are derived
    /// rather than trusted.
    fn recompute_next_ids(&mut self) {
        self.next_category_id = self
            .categories
            .iter()
            .map(|c| c.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        self.next_transaction_id = self
            .transactions
            .iter()
            .map(|t| t.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        self.next_budget_id = self
            .budgets
            .iter()
            .map(|b| b.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;
    }

    /// Check whether a category id resolves to an existing category
    pub(crate) fn category_exists(&self, id: crate::models::CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }
}

/// The embedded record store
///
/// Construct once via [`Store::open`] and share by reference; all
/// operations take `&self` and synchronize internally.
pub struct Store {
    path: PathBuf,
    clock: Box<dyn Clock>,
    state: RwLock<StoreState>,
}

impl Store {
    /// Open the store at `path`, loading persisted state or seeding the
    /// default category set if the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> TallybookResult<Self> {
        Self::open_with_clock(path, SystemClock)
    }

    /// Open the store with an explicit time source
    ///
    /// Date validation depends on "now"; tests pass a fixed clock here.
    pub fn open_with_clock(
        path: impl Into<PathBuf>,
        clock: impl Clock + 'static,
    ) -> TallybookResult<Self> {
        let store = Self {
            path: path.into(),
            clock: Box::new(clock),
            state: RwLock::new(StoreState::default()),
        };
        store.load_or_seed()?;
        Ok(store)
    }

    /// Open the store at the platform default location
    ///
    /// See [`TallybookPaths`] for the resolution rules.
    pub fn open_default() -> TallybookResult<Self> {
        let paths = TallybookPaths::new()?;
        paths.ensure_directories()?;
        Self::open(paths.data_file())
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted document, or fall back to defaults
    ///
    /// On any load failure the default categories are seeded and persisted
    /// immediately; a failure to persist even the seed state is fatal and
    /// propagates to the caller of `open`.
    fn load_or_seed(&self) -> TallybookResult<()> {
        let mut state = self.state_write()?;

        match file_io::read_json::<StoreDocument, _>(&self.path) {
            Ok(document) => {
                state.categories = document.categories;
                state.transactions = document.transactions;
                state.budgets = document.budgets;
            }
            Err(_) => {
                state.categories = default_categories();
                state.transactions = Vec::new();
                state.budgets = Vec::new();
                self.save_state(&state)?;
            }
        }

        state.recompute_next_ids();
        Ok(())
    }

    /// Serialize the whole state to the backing file
    ///
    /// Callers hold the write guard, so the file never sees a half-applied
    /// mutation.
    pub(crate) fn save_state(&self, state: &StoreState) -> TallybookResult<()> {
        let document = StoreDocumentRef {
            categories: &state.categories,
            transactions: &state.transactions,
            budgets: &state.budgets,
        };
        file_io::write_json_atomic(&self.path, &document)
    }

    pub(crate) fn state_read(&self) -> TallybookResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|e| TallybookError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    pub(crate) fn state_write(&self) -> TallybookResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|e| TallybookError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, PaymentMethod, TransactionType};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, Store) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tallybook.json");
        let store = Store::open(path).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_open_seeds_default_categories() {
        let (_temp_dir, store) = create_test_store();

        let categories = store.categories().unwrap();
        assert_eq!(categories.len(), 7);

        // Both types are represented
        assert!(categories
            .iter()
            .any(|c| c.category_type == CategoryType::Income));
        assert!(categories
            .iter()
            .any(|c| c.category_type == CategoryType::Expense));

        // The seed state is persisted immediately
        assert!(store.path().exists());
    }

    #[test]
    fn test_open_falls_back_on_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tallybook.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = Store::open(&path).unwrap();
        assert_eq!(store.categories().unwrap().len(), 7);

        // The corrupt file was replaced by the seeded document
        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.categories().unwrap().len(), 7);
    }

    #[test]
    fn test_reload_preserves_state_and_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tallybook.json");

        let created = {
            let store = Store::open(&path).unwrap();
            let a = store
                .create_category(crate::models::Category::new(
                    "Books",
                    CategoryType::Expense,
                    "#112233",
                    "📚",
                ))
                .unwrap();
            let b = store
                .create_category(crate::models::Category::new(
                    "Gifts",
                    CategoryType::Expense,
                    "#445566",
                    "🎁",
                ))
                .unwrap();
            vec![a, b]
        };

        let store = Store::open(&path).unwrap();
        let categories = store.categories().unwrap();
        assert_eq!(categories.len(), 9);
        // Insertion order survives the round-trip
        assert_eq!(categories[7], created[0]);
        assert_eq!(categories[8], created[1]);
    }

    #[test]
    fn test_next_ids_recomputed_after_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tallybook.json");

        {
            let store = Store::open(&path).unwrap();
            let category = store
                .create_category(crate::models::Category::new(
                    "Books",
                    CategoryType::Expense,
                    "#112233",
                    "📚",
                ))
                .unwrap();
            assert_eq!(category.id.as_i64(), 8); // after the 7 defaults
        }

        let store = Store::open(&path).unwrap();
        let category = store
            .create_category(crate::models::Category::new(
                "Gifts",
                CategoryType::Expense,
                "#445566",
                "🎁",
            ))
            .unwrap();
        assert_eq!(category.id.as_i64(), 9);
    }

    #[test]
    fn test_transaction_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tallybook.json");

        let created = {
            let store = Store::open(&path).unwrap();
            store
                .create_transaction(crate::models::Transaction::with_description(
                    42.5,
                    TransactionType::Expense,
                    CategoryId::new(1),
                    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
                    PaymentMethod::Card,
                    "round trip",
                ))
                .unwrap()
        };

        let store = Store::open(&path).unwrap();
        let loaded = store.transaction(created.id).unwrap();
        assert_eq!(loaded, created);
    }
}
