//! Category model
//!
//! Categories label transactions and budgets as either income or expense.
//! A fresh store is seeded with a small default set spanning both types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// Whether a category tracks income or expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for CategoryType {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(CategoryValidationError::InvalidType(other.to_string())),
        }
    }
}

/// A transaction/budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, assigned by the store
    pub id: CategoryId,

    /// Category name, unique per type
    pub name: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub category_type: CategoryType,

    /// Display color (hex string)
    pub color: String,

    /// Display icon
    pub icon: String,
}

impl Category {
    /// Create a new category; the id is assigned by the store on create
    pub fn new(
        name: impl Into<String>,
        category_type: CategoryType,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: CategoryId::UNASSIGNED,
            name: name.into(),
            category_type,
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The category set a fresh store is seeded with
///
/// Four expense and three income categories, ids 1-7.
pub fn default_categories() -> Vec<Category> {
    let mut categories = vec![
        // Expense categories
        Category::new("Food", CategoryType::Expense, "#FF6B6B", "🍕"),
        Category::new("Transport", CategoryType::Expense, "#4ECDC4", "🚗"),
        Category::new("Entertainment", CategoryType::Expense, "#45B7D1", "🎬"),
        Category::new("Clothing", CategoryType::Expense, "#FFEAA7", "👕"),
        // Income categories
        Category::new("Salary", CategoryType::Income, "#A8E6CF", "💰"),
        Category::new("Freelance", CategoryType::Income, "#DCEDC1", "💻"),
        Category::new("Investments", CategoryType::Income, "#FFD3B6", "📈"),
    ];

    for (i, category) in categories.iter_mut().enumerate() {
        category.id = CategoryId::new(i as i64 + 1);
    }

    categories
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidType(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidType(s) => {
                write!(f, "Category type must be 'income' or 'expense', got '{}'", s)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries", CategoryType::Expense, "#FF6B6B", "🛒");
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.category_type, CategoryType::Expense);
        assert!(!category.id.is_assigned());
    }

    #[test]
    fn test_category_validation() {
        let mut category = Category::new("Valid", CategoryType::Expense, "#000000", "x");
        assert!(category.validate().is_ok());

        category.name = String::new();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));

        category.name = "a".repeat(50);
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_default_categories() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 7);

        // Sequential ids starting at 1
        for (i, category) in defaults.iter().enumerate() {
            assert_eq!(category.id.as_i64(), i as i64 + 1);
            assert!(category.validate().is_ok());
        }

        let expenses = defaults
            .iter()
            .filter(|c| c.category_type == CategoryType::Expense)
            .count();
        let income = defaults
            .iter()
            .filter(|c| c.category_type == CategoryType::Income)
            .count();
        assert_eq!(expenses, 4);
        assert_eq!(income, 3);
    }

    #[test]
    fn test_type_parse_and_display() {
        assert_eq!("income".parse::<CategoryType>().unwrap(), CategoryType::Income);
        assert_eq!("expense".parse::<CategoryType>().unwrap(), CategoryType::Expense);
        assert!("transfer".parse::<CategoryType>().is_err());

        assert_eq!(CategoryType::Income.to_string(), "income");
        assert_eq!(CategoryType::Expense.to_string(), "expense");
    }

    #[test]
    fn test_serialization() {
        let mut category = Category::new("Salary", CategoryType::Income, "#A8E6CF", "💰");
        category.id = CategoryId::new(5);

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["type"], "income");

        let deserialized: Category = serde_json::from_value(json).unwrap();
        assert_eq!(category, deserialized);
    }
}
