use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ForecastError, Result};
use crate::processors::LocationLocator;
use crate::readers::{FeedCache, FeedClient};

/// Serves the feed from cache when possible, otherwise downloads and caches it.
pub struct FeedReader {
    client: FeedClient,
    cache: FeedCache,
}

impl FeedReader {
    pub fn new(client: FeedClient, cache: FeedCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    pub async fn read(&self, force_refresh: bool) -> Result<Value> {
        if force_refresh {
            info!("refresh requested, dropping cached feed");
            self.cache.invalidate()?;
        } else if let Some(doc) = self.cache.load()? {
            return Ok(doc);
        }

        let doc = self.client.fetch_document().await?;
        self.cache.store(&doc)?;
        Ok(doc)
    }

    /// Read the feed and check it holds a location list. A document without
    /// one is dropped from the cache so the next read downloads again.
    pub async fn read_located(
        &self,
        force_refresh: bool,
        locator: &LocationLocator,
    ) -> Result<Value> {
        let doc = self.read(force_refresh).await?;
        if locator.locate(&doc).is_some() {
            return Ok(doc);
        }

        let top_level_keys: Vec<&str> = doc
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        warn!(
            path = %self.cache.path().display(),
            ?top_level_keys,
            "feed holds no location list, discarding cached copy"
        );
        self.cache.invalidate()?;

        Err(ForecastError::LocationListNotFound {
            marker: locator.marker_key().to_string(),
        })
    }
}
