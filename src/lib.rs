//! tallybook - Embedded JSON-backed record store for personal finance tracking
//!
//! This library provides the storage core of a personal finance tracker:
//! an in-memory collection of categories, transactions, and budgets guarded
//! by one reader-writer lock, persisted whole to a single JSON file after
//! every mutation, and queried through composable filters and derived
//! reports. Transport layers (HTTP handlers, CLIs) sit on top of it and are
//! out of scope here.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution for the backing file
//! - `error`: Custom error types
//! - `clock`: Injectable time source for date validation
//! - `models`: Record kinds (categories, transactions, budgets) and reports
//! - `store`: The record store itself, its filters, and aggregations
//!
//! # Example
//!
//! ```rust,no_run
//! use tallybook::models::{Transaction, TransactionType, PaymentMethod, CategoryId};
//! use tallybook::store::{Store, TransactionFilters};
//! use chrono::Utc;
//!
//! # fn main() -> tallybook::TallybookResult<()> {
//! let store = Store::open("finance.json")?;
//!
//! store.create_transaction(Transaction::new(
//!     12.50,
//!     TransactionType::Expense,
//!     CategoryId::new(1),
//!     Utc::now(),
//!     PaymentMethod::Card,
//! ))?;
//!
//! let recent = store.transactions(&TransactionFilters {
//!     limit: Some(20),
//!     ..Default::default()
//! })?;
//! # let _ = recent;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use error::{TallybookError, TallybookResult};
pub use store::Store;
