pub mod coverage_checker;
pub mod forecast_processor;
pub mod locator;
pub mod normalizer;

pub use coverage_checker::{CoverageChecker, CoverageIssue, CoverageReport, IssueType};
pub use forecast_processor::ForecastProcessor;
pub use locator::{LocatedList, LocationLocator};
pub use normalizer::RecordNormalizer;
