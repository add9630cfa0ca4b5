//! Relief request category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of assistance requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "relief_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReliefCategory {
    /// Dry rations and cooked meals.
    Food,
    /// Temporary housing or shelter materials.
    Shelter,
    /// Medicine and medical care.
    Medical,
    /// Cash grant.
    Cash,
    /// Anything else.
    Other,
}

impl ReliefCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Shelter => "shelter",
            Self::Medical => "medical",
            Self::Cash => "cash",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ReliefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReliefCategory {
    type Err = relief_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "shelter" => Ok(Self::Shelter),
            "medical" => Ok(Self::Medical),
            "cash" => Ok(Self::Cash),
            "other" => Ok(Self::Other),
            _ => Err(relief_core::AppError::validation(format!(
                "Invalid relief category: '{s}'. Expected one of: food, shelter, medical, cash, other"
            ))),
        }
    }
}
