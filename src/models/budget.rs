//! Budget model
//!
//! A budget caps spending for one category over a recurring period. The
//! `month` field anchors the period: the budget covers the window starting
//! at that instant and running one month, week, or year.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{BudgetId, CategoryId};

/// How long a budget's coverage window runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Weekly,
    Yearly,
}

impl BudgetPeriod {
    /// End of the coverage window anchored at `anchor`, inclusive
    ///
    /// The window is conceptually half-open; the end is pulled back one
    /// nanosecond so callers can compare with `date <= end`.
    pub fn end_of_window(&self, anchor: DateTime<Utc>) -> DateTime<Utc> {
        let next_start = match self {
            Self::Monthly => anchor.checked_add_months(Months::new(1)),
            Self::Weekly => anchor.checked_add_signed(Duration::days(7)),
            Self::Yearly => anchor.checked_add_months(Months::new(12)),
        };

        match next_start {
            Some(next_start) => next_start - Duration::nanoseconds(1),
            None => DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Check if a date falls within the window anchored at `anchor`
    pub fn contains(&self, anchor: DateTime<Utc>, date: DateTime<Utc>) -> bool {
        date >= anchor && date <= self.end_of_window(anchor)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Weekly => write!(f, "weekly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = BudgetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "yearly" => Ok(Self::Yearly),
            other => Err(BudgetValidationError::InvalidPeriod(other.to_string())),
        }
    }
}

/// A spending cap for one category over one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier, assigned by the store
    pub id: BudgetId,

    /// The category this budget caps
    pub category_id: CategoryId,

    /// Budgeted amount
    pub amount: f64,

    /// Period length
    pub period: BudgetPeriod,

    /// Anchor instant the coverage window starts at
    pub month: DateTime<Utc>,

    /// Denormalized spend counter; reports compute spend themselves and
    /// leave this untouched
    #[serde(default)]
    pub spent: f64,

    /// When the record was created; the store fills this in if left unset
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget; id and created_at are assigned by the store
    pub fn new(
        category_id: CategoryId,
        amount: f64,
        period: BudgetPeriod,
        month: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BudgetId::UNASSIGNED,
            category_id,
            amount,
            period,
            month,
            spent: 0.0,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// The uniqueness key: at most one budget may exist per category,
    /// period, and calendar year-month of the anchor
    pub fn period_key(&self) -> (CategoryId, BudgetPeriod, i32, u32) {
        (
            self.category_id,
            self.period,
            self.month.year(),
            self.month.month(),
        )
    }

    /// Validate the budget
    ///
    /// Referential checks on `category_id` are the store's responsibility.
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !(self.amount > 0.0) {
            return Err(BudgetValidationError::InvalidAmount(self.amount));
        }

        if self.category_id.as_i64() <= 0 {
            return Err(BudgetValidationError::MissingCategory);
        }

        if self.month == DateTime::<Utc>::UNIX_EPOCH {
            return Err(BudgetValidationError::MissingMonth);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.2} from {}",
            self.period,
            self.amount,
            self.month.format("%Y-%m-%d")
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    InvalidAmount(f64),
    InvalidPeriod(String),
    MissingCategory,
    MissingMonth,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(amount) => {
                write!(f, "Budget amount must be positive, got {}", amount)
            }
            Self::InvalidPeriod(s) => write!(
                f,
                "Budget period must be 'monthly', 'weekly' or 'yearly', got '{}'",
                s
            ),
            Self::MissingCategory => write!(f, "Budget requires a category"),
            Self::MissingMonth => write!(f, "Budget month is required"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_monthly_window() {
        let period = BudgetPeriod::Monthly;
        let start = anchor(2024, 1, 1);

        assert!(period.contains(start, start));
        assert!(period.contains(start, anchor(2024, 1, 31)));
        // One nanosecond before the next month
        assert!(period.contains(start, anchor(2024, 2, 1) - Duration::nanoseconds(1)));
        assert!(!period.contains(start, anchor(2024, 2, 1)));
        assert!(!period.contains(start, anchor(2023, 12, 31)));
    }

    #[test]
    fn test_monthly_window_year_boundary() {
        let period = BudgetPeriod::Monthly;
        let start = anchor(2024, 12, 1);

        assert!(period.contains(start, anchor(2024, 12, 31)));
        assert!(!period.contains(start, anchor(2025, 1, 1)));
    }

    #[test]
    fn test_weekly_window() {
        let period = BudgetPeriod::Weekly;
        let start = anchor(2024, 1, 1);

        assert!(period.contains(start, anchor(2024, 1, 7)));
        assert!(period.contains(start, anchor(2024, 1, 8) - Duration::nanoseconds(1)));
        assert!(!period.contains(start, anchor(2024, 1, 8)));
    }

    #[test]
    fn test_yearly_window() {
        let period = BudgetPeriod::Yearly;
        let start = anchor(2024, 3, 1);

        assert!(period.contains(start, anchor(2024, 12, 31)));
        assert!(period.contains(start, anchor(2025, 2, 28)));
        assert!(!period.contains(start, anchor(2025, 3, 1)));
    }

    #[test]
    fn test_period_key_ignores_day_and_time() {
        let a = Budget::new(CategoryId::new(1), 100.0, BudgetPeriod::Monthly, anchor(2024, 1, 1));
        let mut b = a.clone();
        b.month = Utc.with_ymd_and_hms(2024, 1, 15, 18, 30, 0).unwrap();

        assert_eq!(a.period_key(), b.period_key());

        b.month = anchor(2024, 2, 1);
        assert_ne!(a.period_key(), b.period_key());
    }

    #[test]
    fn test_budget_validation() {
        let mut budget =
            Budget::new(CategoryId::new(1), 200.0, BudgetPeriod::Monthly, anchor(2024, 1, 1));
        assert!(budget.validate().is_ok());

        budget.amount = 0.0;
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::InvalidAmount(_))
        ));

        budget.amount = f64::NAN;
        assert!(budget.validate().is_err());

        budget.amount = 200.0;
        budget.category_id = CategoryId::UNASSIGNED;
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::MissingCategory)
        );

        budget.category_id = CategoryId::new(1);
        budget.month = DateTime::<Utc>::UNIX_EPOCH;
        assert_eq!(budget.validate(), Err(BudgetValidationError::MissingMonth));
    }

    #[test]
    fn test_period_parse_and_display() {
        assert_eq!("monthly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Monthly);
        assert_eq!("weekly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Weekly);
        assert_eq!("yearly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Yearly);
        assert!("daily".parse::<BudgetPeriod>().is_err());

        assert_eq!(BudgetPeriod::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_serialization() {
        let mut budget =
            Budget::new(CategoryId::new(3), 500.0, BudgetPeriod::Weekly, anchor(2024, 1, 1));
        budget.id = BudgetId::new(2);

        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["period"], "weekly");
        assert_eq!(json["category_id"], 3);
        assert_eq!(json["spent"], 0.0);

        let deserialized: Budget = serde_json::from_value(json).unwrap();
        assert_eq!(budget, deserialized);
    }
}
