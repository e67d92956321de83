use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{ForecastRecord, LocationNode};
use crate::utils::constants::LOCATION_NAME_KEY;

/// Flattens location nodes into [`ForecastRecord`]s.
///
/// Missing or malformed sub-fields never fail the record; they keep their
/// sentinel. Only the first time slot of each element is read.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    name_key: String,
}

impl RecordNormalizer {
    pub fn new() -> Self {
        Self {
            name_key: LOCATION_NAME_KEY.to_string(),
        }
    }

    /// Read the location name from `name_key`; pairs with a custom locator marker.
    pub fn with_name_key(name_key: &str) -> Self {
        Self {
            name_key: name_key.to_string(),
        }
    }

    pub fn normalize(&self, node: LocationNode<'_>) -> ForecastRecord {
        let mut record = ForecastRecord::unresolved(node.name_by(&self.name_key));

        for element in node.weather_elements() {
            let Some(value) = element.first_value() else {
                continue;
            };

            match element.kind() {
                Some(kind) => record.set(kind, value),
                None => debug!(
                    location = %record.location,
                    element = element.element_name().unwrap_or_default(),
                    "ignoring unrecognised weather element"
                ),
            }
        }

        record
    }

    /// `None` when the value is not an object at all.
    pub fn normalize_value(&self, value: &Value) -> Option<ForecastRecord> {
        LocationNode::from_value(value).map(|node| self.normalize(node))
    }

    /// Normalize a located list in parallel, keeping input order.
    pub fn normalize_all(&self, nodes: &[Value]) -> Vec<ForecastRecord> {
        let records: Vec<Option<ForecastRecord>> = nodes
            .par_iter()
            .map(|value| self.normalize_value(value))
            .collect();

        let skipped = records.iter().filter(|r| r.is_none()).count();
        if skipped > 0 {
            warn!(skipped, "skipped location entries that are not JSON objects");
        }

        records.into_iter().flatten().collect()
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
