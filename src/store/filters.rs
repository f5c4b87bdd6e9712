//! Query filters for list operations
//!
//! Filters are sets of optional predicates combined with AND. An empty
//! filter matches everything; `Default` gives the unfiltered query.

use chrono::{DateTime, Datelike, Utc};

use crate::models::{
    Budget, BudgetPeriod, CategoryId, PaymentMethod, Transaction, TransactionType,
};

/// Optional conjunctive predicates for listing transactions
///
/// Date bounds are inclusive on both ends. `offset` and `limit` paginate
/// the filtered result; an offset past the end yields an empty list.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilters {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    pub transaction_type: Option<TransactionType>,
    pub payment_method: Option<PaymentMethod>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TransactionFilters {
    /// Check whether a transaction passes every set predicate
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(start) = self.start_date {
            if txn.date < start {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if txn.date > end {
                return false;
            }
        }

        if let Some(category_id) = self.category_id {
            if txn.category_id != category_id {
                return false;
            }
        }

        if let Some(transaction_type) = self.transaction_type {
            if txn.transaction_type != transaction_type {
                return false;
            }
        }

        if let Some(payment_method) = self.payment_method {
            if txn.payment_method != payment_method {
                return false;
            }
        }

        true
    }

    /// Apply offset and limit to a filtered result
    ///
    /// The offset is clamped: past-the-end offsets return an empty list
    /// rather than an error. A missing limit means "the remainder".
    pub fn paginate(&self, result: Vec<Transaction>) -> Vec<Transaction> {
        let start = self.offset.unwrap_or(0);
        if start >= result.len() {
            return Vec::new();
        }

        let end = match self.limit {
            Some(limit) if limit > 0 => (start + limit).min(result.len()),
            _ => result.len(),
        };

        result[start..end].to_vec()
    }
}

/// Optional conjunctive predicates for listing budgets
///
/// The month predicate compares calendar year and month only; day and
/// time-of-day components are ignored.
#[derive(Debug, Clone, Default)]
pub struct BudgetFilters {
    pub category_id: Option<CategoryId>,
    pub period: Option<BudgetPeriod>,
    pub month: Option<DateTime<Utc>>,
}

impl BudgetFilters {
    /// Check whether a budget passes every set predicate
    pub fn matches(&self, budget: &Budget) -> bool {
        if let Some(category_id) = self.category_id {
            if budget.category_id != category_id {
                return false;
            }
        }

        if let Some(period) = self.period {
            if budget.period != period {
                return false;
            }
        }

        if let Some(month) = self.month {
            let year_match = budget.month.year() == month.year();
            let month_match = budget.month.month() == month.month();
            if !(year_match && month_match) {
                return false;
            }
        }

        true
    }
}
