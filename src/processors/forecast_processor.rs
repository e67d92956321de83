use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ForecastError, Result};
use crate::models::ForecastRecord;
use crate::processors::{CoverageChecker, CoverageReport, LocationLocator, RecordNormalizer};
use crate::utils::progress::ProgressReporter;

/// Locate, normalize and check one decoded feed document.
pub struct ForecastProcessor {
    max_workers: usize,
    locator: LocationLocator,
    normalizer: RecordNormalizer,
}

impl ForecastProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            locator: LocationLocator::new(),
            normalizer: RecordNormalizer::new(),
        }
    }

    /// Marker used to find the location list; it also names each record.
    pub fn with_marker_key(mut self, marker_key: &str) -> Self {
        self.locator = LocationLocator::with_marker_key(marker_key);
        self.normalizer = RecordNormalizer::with_name_key(marker_key);
        self
    }

    pub fn locator(&self) -> &LocationLocator {
        &self.locator
    }

    pub fn process_document(
        &self,
        doc: &Value,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<ForecastRecord>, CoverageReport)> {
        if let Some(p) = progress {
            p.set_message("Searching for the location list...");
        }

        let candidates = self.locator.candidates(doc);
        let Some(selected) = candidates.first() else {
            return Err(ForecastError::LocationListNotFound {
                marker: self.locator.marker_key().to_string(),
            });
        };

        info!(
            pointer = %selected.pointer,
            locations = selected.len(),
            "found location list"
        );
        if candidates.len() > 1 {
            let ignored: Vec<&str> = candidates[1..].iter().map(|c| c.pointer.as_str()).collect();
            warn!(
                selected = %selected.pointer,
                ?ignored,
                "document holds several location lists, using the first"
            );
        }

        if let Some(p) = progress {
            p.set_message(&format!("Normalizing {} locations...", selected.len()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ForecastError::Config(e.to_string()))?;
        let records = pool.install(|| self.normalizer.normalize_all(selected.records));
        debug!(records = records.len(), workers = self.max_workers, "normalized");

        if let Some(p) = progress {
            p.set_message("Checking coverage...");
        }

        let report = CoverageChecker::new().check_coverage(&records);

        if let Some(p) = progress {
            p.finish_with_message("Processing complete");
        }

        Ok((records, report))
    }
}

impl Default for ForecastProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
