//! Owner domain models.

use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A person whose holdings are tracked. Owns zero or more stock lots.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: String,
    pub name: String,
}

/// Input model for creating a new owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOwner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl NewOwner {
    /// Validates the new owner data. Display names are alphabetic only.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Owner name cannot be empty".to_string(),
            )));
        }
        if !self.name.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                format!("Owner name must be alphabetic: {}", self.name),
            )));
        }
        Ok(())
    }
}
