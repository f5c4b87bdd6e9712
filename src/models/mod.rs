//! Core data models for tallybook
//!
//! This module contains the record kinds held by the store (categories,
//! transactions, budgets) and the report types derived from them.

pub mod budget;
pub mod category;
pub mod ids;
pub mod report;
pub mod transaction;

pub use budget::{Budget, BudgetPeriod, BudgetValidationError};
pub use category::{default_categories, Category, CategoryType, CategoryValidationError};
pub use ids::{BudgetId, CategoryId, TransactionId};
pub use report::{BudgetReport, CategorySummary, FinancialSummary};
pub use transaction::{
    PaymentMethod, Transaction, TransactionType, TransactionValidationError,
};
