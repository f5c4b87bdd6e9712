//! Transaction model
//!
//! A transaction records a single income or expense amount against a
//! category. Dates are validated against an injected "now" because records
//! may not be posted more than 24 hours into the future.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};

/// Whether a transaction adds to or subtracts from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(TransactionValidationError::InvalidType(other.to_string())),
        }
    }
}

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Card => write!(f, "card"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "transfer" => Ok(Self::Transfer),
            other => Err(TransactionValidationError::InvalidPaymentMethod(
                other.to_string(),
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store
    pub id: TransactionId,

    /// Amount, always positive; the type carries the sign
    pub amount: f64,

    /// Income or expense
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// The category this transaction belongs to
    pub category_id: CategoryId,

    /// When the transaction occurred
    pub date: DateTime<Utc>,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// How the transaction was paid
    pub payment_method: PaymentMethod,

    /// When the record was created; the store fills this in if left unset
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction; id and created_at are assigned by the store
    pub fn new(
        amount: f64,
        transaction_type: TransactionType,
        category_id: CategoryId,
        date: DateTime<Utc>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id: TransactionId::UNASSIGNED,
            amount,
            transaction_type,
            category_id,
            date,
            description: String::new(),
            payment_method,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Create a transaction with a description
    pub fn with_description(
        amount: f64,
        transaction_type: TransactionType,
        category_id: CategoryId,
        date: DateTime<Utc>,
        payment_method: PaymentMethod,
        description: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(amount, transaction_type, category_id, date, payment_method);
        txn.description = description.into();
        txn
    }

    /// Check that the amount is positive and finite
    pub fn is_valid_amount(&self) -> bool {
        self.amount > 0.0 && self.amount.is_finite()
    }

    /// Validate the transaction against the given current time
    ///
    /// Referential checks on `category_id` are the store's responsibility;
    /// this only covers field-level rules.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), TransactionValidationError> {
        if !self.is_valid_amount() {
            return Err(TransactionValidationError::InvalidAmount(self.amount));
        }

        if self.category_id.as_i64() <= 0 {
            return Err(TransactionValidationError::MissingCategory);
        }

        // The epoch is the serde default, so an epoch date means "unset"
        if self.date == DateTime::<Utc>::UNIX_EPOCH {
            return Err(TransactionValidationError::MissingDate);
        }

        if self.date > now + Duration::hours(24) {
            return Err(TransactionValidationError::DateInFuture(self.date));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2}",
            self.date.format("%Y-%m-%d"),
            self.transaction_type,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    InvalidAmount(f64),
    InvalidType(String),
    InvalidPaymentMethod(String),
    MissingCategory,
    MissingDate,
    DateInFuture(DateTime<Utc>),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(amount) => {
                write!(f, "Transaction amount must be positive and finite, got {}", amount)
            }
            Self::InvalidType(s) => {
                write!(f, "Transaction type must be 'income' or 'expense', got '{}'", s)
            }
            Self::InvalidPaymentMethod(s) => write!(
                f,
                "Payment method must be 'cash', 'card' or 'transfer', got '{}'",
                s
            ),
            Self::MissingCategory => write!(f, "Transaction requires a category"),
            Self::MissingDate => write!(f, "Transaction date is required"),
            Self::DateInFuture(date) => {
                write!(f, "Transaction date {} is too far in the future", date)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn valid_transaction() -> Transaction {
        Transaction::new(
            49.99,
            TransactionType::Expense,
            CategoryId::new(1),
            Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap(),
            PaymentMethod::Card,
        )
    }

    #[test]
    fn test_valid_transaction() {
        assert!(valid_transaction().validate(test_now()).is_ok());
    }

    #[test]
    fn test_amount_validation() {
        let mut txn = valid_transaction();

        txn.amount = 0.0;
        assert!(matches!(
            txn.validate(test_now()),
            Err(TransactionValidationError::InvalidAmount(_))
        ));

        txn.amount = -5.0;
        assert!(txn.validate(test_now()).is_err());

        txn.amount = f64::NAN;
        assert!(txn.validate(test_now()).is_err());

        txn.amount = f64::INFINITY;
        assert!(txn.validate(test_now()).is_err());
    }

    #[test]
    fn test_category_required() {
        let mut txn = valid_transaction();
        txn.category_id = CategoryId::UNASSIGNED;
        assert_eq!(
            txn.validate(test_now()),
            Err(TransactionValidationError::MissingCategory)
        );
    }

    #[test]
    fn test_date_required() {
        let mut txn = valid_transaction();
        txn.date = DateTime::<Utc>::UNIX_EPOCH;
        assert_eq!(
            txn.validate(test_now()),
            Err(TransactionValidationError::MissingDate)
        );
    }

    #[test]
    fn test_date_future_bound() {
        let now = test_now();
        let mut txn = valid_transaction();

        // Up to 24h ahead is allowed
        txn.date = now + Duration::hours(23);
        assert!(txn.validate(now).is_ok());

        txn.date = now + Duration::hours(25);
        assert!(matches!(
            txn.validate(now),
            Err(TransactionValidationError::DateInFuture(_))
        ));
    }

    #[test]
    fn test_enum_parse_and_display() {
        assert_eq!(
            "income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert!("invalid".parse::<TransactionType>().is_err());

        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!(
            "transfer".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Transfer
        );
        assert!("crypto".parse::<PaymentMethod>().is_err());

        assert_eq!(PaymentMethod::Transfer.to_string(), "transfer");
    }

    #[test]
    fn test_serialization() {
        let mut txn = Transaction::with_description(
            120.0,
            TransactionType::Expense,
            CategoryId::new(2),
            Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            PaymentMethod::Cash,
            "weekly groceries",
        );
        txn.id = TransactionId::new(9);

        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["payment_method"], "cash");
        assert_eq!(json["category_id"], 2);

        let deserialized: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(txn, deserialized);
    }

    #[test]
    fn test_missing_created_at_defaults_to_epoch() {
        let json = r#"{
            "id": 1,
            "amount": 10.0,
            "type": "income",
            "category_id": 5,
            "date": "2024-01-10T00:00:00Z",
            "payment_method": "card"
        }"#;

        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.created_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(txn.description, "");
    }
}
