use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ForecastError, Result};
use crate::readers::document::decode_document;
use crate::settings::FeedSettings;

/// Downloads one dataset from the CWA file API.
pub struct FeedClient {
    client: Client,
    api_url: String,
    dataset_id: String,
    api_key: String,
}

impl FeedClient {
    pub fn new(settings: &FeedSettings) -> Result<Self> {
        let api_key = settings.require_api_key()?.to_string();

        if settings.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for the feed download");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            dataset_id: settings.dataset_id.clone(),
            api_key,
        })
    }

    /// Dataset URL without the query string, safe to log.
    pub fn dataset_url(&self) -> String {
        format!("{}/{}", self.api_url, self.dataset_id)
    }

    pub async fn fetch_bytes(&self) -> Result<Vec<u8>> {
        let url = self.dataset_url();
        info!(url = %url, "downloading forecast dataset");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("Authorization", self.api_key.as_str()),
                ("downloadType", "WEB"),
                ("format", "JSON"),
            ])
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await.map_err(redact)?;
        debug!(bytes = body.len(), "download complete");
        Ok(body.to_vec())
    }

    pub async fn fetch_document(&self) -> Result<Value> {
        let bytes = self.fetch_bytes().await?;
        decode_document(&bytes, &self.dataset_url())
    }
}

/// The request URL carries the API key in its query string.
fn redact(err: reqwest::Error) -> ForecastError {
    ForecastError::Http(err.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn feed_settings(api_url: &str, api_key: Option<&str>) -> FeedSettings {
        let mut settings = Settings::defaults().unwrap().feed;
        settings.api_url = api_url.to_string();
        settings.api_key = api_key.map(str::to_string);
        settings
    }

    #[test]
    fn test_dataset_url_trims_trailing_slash() {
        let client = FeedClient::new(&feed_settings("https://example.test/api/", Some("key"))).unwrap();
        assert_eq!(client.dataset_url(), "https://example.test/api/F-A0010-001");
    }

    #[test]
    fn test_missing_key_rejected_before_any_request() {
        let result = FeedClient::new(&feed_settings("https://example.test", None));
        assert!(matches!(result, Err(ForecastError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_connection_error_does_not_expose_key() {
        use std::error::Error;

        let client =
            FeedClient::new(&feed_settings("http://127.0.0.1:1", Some("SECRET-KEY-123"))).unwrap();

        let err = client.fetch_bytes().await.unwrap_err();
        assert!(matches!(err, ForecastError::Http(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"));

        // The whole cause chain is printed by the binary's error report.
        let mut source = err.source();
        while let Some(cause) = source {
            assert!(!cause.to_string().contains("SECRET-KEY-123"));
            source = cause.source();
        }
    }
}
