pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{ForecastError, Result};
pub use models::ForecastRecord;
pub use processors::{ForecastProcessor, LocationLocator, RecordNormalizer};
