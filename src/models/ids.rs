//! Strongly-typed ID wrappers for all record kinds
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! record kinds at compile time. IDs are sequential i64 values assigned by
//! the store; `0` means "not yet assigned".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// The unassigned sentinel; the store replaces it on create
            pub const UNASSIGNED: Self = Self(0);

            /// Wrap a raw id value
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the underlying id value
            pub const fn as_i64(&self) -> i64 {
                self.0
            }

            /// Check whether the store has assigned this id
            pub const fn is_assigned(&self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(CategoryId);
define_id!(TransactionId);
define_id!(BudgetId);
