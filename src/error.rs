use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForecastError>;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed feed payload from {origin}: {source}")]
    MalformedInput {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("No CWA API key configured (set feed.api_key, CWA_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("No list of records carrying '{marker}' was found anywhere in the document")]
    LocationListNotFound { marker: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ForecastError {
    /// Errors the caller can report and recover from without treating the run as a crash.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ForecastError::LocationListNotFound { .. }
                | ForecastError::MalformedInput { .. }
                | ForecastError::UnexpectedStatus { .. }
                | ForecastError::MissingApiKey
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_list_not_found_is_recoverable() {
        let err = ForecastError::LocationListNotFound {
            marker: "locationName".to_string(),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("locationName"));
    }

    #[test]
    fn test_io_error_is_not_recoverable() {
        let err = ForecastError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(!err.is_recoverable());
    }
}
