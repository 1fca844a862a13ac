//! Subscription plan types

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Billing plans offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Basic,
    Advanced,
    Corporate,
}

impl PlanType {
    /// Parse a plan type from a request string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            "corporate" => Ok(Self::Corporate),
            other => Err(ValidationError::InvalidVariant {
                field: "plan_type",
                value: other.to_owned(),
            }),
        }
    }

    /// Get string representation as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
            Self::Corporate => "corporate",
        }
    }
}
