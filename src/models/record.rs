use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::models::element::ElementKind;
use crate::utils::constants::{MISSING_VALUE, UNKNOWN_LOCATION};

/// One normalized forecast row. Unresolved fields hold the sentinel text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ForecastRecord {
    #[validate(length(min = 1))]
    pub location: String,

    pub min_temp: String,

    pub max_temp: String,

    pub description: String,
}

impl ForecastRecord {
    pub fn new(location: String, min_temp: String, max_temp: String, description: String) -> Self {
        Self {
            location,
            min_temp,
            max_temp,
            description,
        }
    }

    /// A record with every element field at its sentinel.
    pub fn unresolved(location: Option<String>) -> Self {
        Self {
            location: location.unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            min_temp: MISSING_VALUE.to_string(),
            max_temp: MISSING_VALUE.to_string(),
            description: MISSING_VALUE.to_string(),
        }
    }

    pub fn set(&mut self, kind: ElementKind, value: String) {
        match kind {
            ElementKind::Description => self.description = value,
            ElementKind::MinTemp => self.min_temp = value,
            ElementKind::MaxTemp => self.max_temp = value,
        }
    }

    pub fn get(&self, kind: ElementKind) -> &str {
        match kind {
            ElementKind::Description => &self.description,
            ElementKind::MinTemp => &self.min_temp,
            ElementKind::MaxTemp => &self.max_temp,
        }
    }

    pub fn is_resolved(&self, kind: ElementKind) -> bool {
        self.get(kind) != MISSING_VALUE
    }

    pub fn has_known_location(&self) -> bool {
        self.location != UNKNOWN_LOCATION
    }

    pub fn is_complete(&self) -> bool {
        self.has_known_location()
            && [
                ElementKind::Description,
                ElementKind::MinTemp,
                ElementKind::MaxTemp,
            ]
            .iter()
            .all(|kind| self.is_resolved(*kind))
    }

    pub fn validate_record(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}
