use crate::models::{ElementKind, ForecastRecord};

const FIELDS: [ElementKind; 3] = [
    ElementKind::Description,
    ElementKind::MinTemp,
    ElementKind::MaxTemp,
];

#[derive(Debug, Clone, Default)]
pub struct CoverageReport {
    pub total_records: usize,
    pub complete_records: usize,
    pub unknown_locations: usize,
    pub missing_descriptions: usize,
    pub missing_min_temps: usize,
    pub missing_max_temps: usize,
    pub issues: Vec<CoverageIssue>,
}

#[derive(Debug, Clone)]
pub struct CoverageIssue {
    pub location: String,
    pub issue_type: IssueType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    InvalidRecord,
    NonNumericTemperature,
    MinAboveMax,
}

impl CoverageReport {
    pub fn missing(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Description => self.missing_descriptions,
            ElementKind::MinTemp => self.missing_min_temps,
            ElementKind::MaxTemp => self.missing_max_temps,
        }
    }

    pub fn has_gaps(&self) -> bool {
        self.complete_records < self.total_records
    }
}

/// Summarises how much of a batch resolved. Gaps and issues are reported,
/// never fatal.
pub struct CoverageChecker;

impl CoverageChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check_coverage(&self, records: &[ForecastRecord]) -> CoverageReport {
        let mut report = CoverageReport {
            total_records: records.len(),
            ..Default::default()
        };

        for record in records {
            if record.is_complete() {
                report.complete_records += 1;
            }
            if !record.has_known_location() {
                report.unknown_locations += 1;
            }

            for kind in FIELDS {
                if record.is_resolved(kind) {
                    continue;
                }
                match kind {
                    ElementKind::Description => report.missing_descriptions += 1,
                    ElementKind::MinTemp => report.missing_min_temps += 1,
                    ElementKind::MaxTemp => report.missing_max_temps += 1,
                }
            }

            if let Err(e) = record.validate_record() {
                report.issues.push(CoverageIssue {
                    location: record.location.clone(),
                    issue_type: IssueType::InvalidRecord,
                    details: e.to_string(),
                });
            }

            self.check_temperatures(record, &mut report);
        }

        report
    }

    fn check_temperatures(&self, record: &ForecastRecord, report: &mut CoverageReport) {
        let mut parsed = [None, None];

        for (slot, kind) in [ElementKind::MinTemp, ElementKind::MaxTemp].into_iter().enumerate() {
            if !record.is_resolved(kind) {
                continue;
            }
            let text = record.get(kind);
            match text.trim().parse::<f64>() {
                Ok(value) => parsed[slot] = Some(value),
                Err(_) => report.issues.push(CoverageIssue {
                    location: record.location.clone(),
                    issue_type: IssueType::NonNumericTemperature,
                    details: format!("{} '{}' is not a number", kind, text),
                }),
            }
        }

        if let [Some(min), Some(max)] = parsed {
            if min > max {
                report.issues.push(CoverageIssue {
                    location: record.location.clone(),
                    issue_type: IssueType::MinAboveMax,
                    details: format!("min temperature {} is above max temperature {}", min, max),
                });
            }
        }
    }

    pub fn generate_summary(&self, report: &CoverageReport) -> String {
        let mut summary = String::new();
        let percent = |count: usize| {
            if report.total_records == 0 {
                0.0
            } else {
                100.0 * count as f64 / report.total_records as f64
            }
        };

        summary.push_str("=== Coverage Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Complete Records: {} ({:.1}%)\n",
            report.complete_records,
            percent(report.complete_records)
        ));
        summary.push_str(&format!(
            "Unknown Locations: {}\n",
            report.unknown_locations
        ));
        for kind in FIELDS {
            summary.push_str(&format!(
                "Missing {}: {} ({:.1}%)\n",
                kind,
                report.missing(kind),
                percent(report.missing(kind))
            ));
        }
        summary.push_str(&format!("\nIssues: {}\n", report.issues.len()));

        if !report.issues.is_empty() {
            summary.push_str("\nTop 10 Issues:\n");
            for (i, issue) in report.issues.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. {}: {}\n",
                    i + 1,
                    issue.location,
                    issue.details
                ));
            }
        }

        summary
    }
}

impl Default for CoverageChecker {
    fn default() -> Self {
        Self::new()
    }
}
