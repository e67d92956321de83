use serde_json::Value;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{ForecastError, Result};
use crate::readers::document::read_document_file;

/// Last downloaded payload, kept on disk so repeated runs skip the network.
pub struct FeedCache {
    path: PathBuf,
    max_age: Option<Duration>,
}

impl FeedCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: None,
        }
    }

    /// Treat a cache file at least `max_age` old as absent.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Cached document, if any. A cache file that no longer decodes is
    /// removed so the next read goes to the network; an expired one is left
    /// for the next `store` to overwrite.
    pub fn load(&self) -> Result<Option<Value>> {
        if !self.exists() {
            return Ok(None);
        }
        if self.is_expired()? {
            debug!(path = %self.path.display(), "cached feed expired");
            return Ok(None);
        }

        match read_document_file(&self.path) {
            Ok(doc) => {
                debug!(path = %self.path.display(), "using cached feed");
                Ok(Some(doc))
            }
            Err(ForecastError::MalformedInput { source, .. }) => {
                warn!(
                    path = %self.path.display(),
                    error = %source,
                    "discarding unreadable feed cache"
                );
                self.invalidate()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Write the document atomically: temp file in the same directory, then rename.
    pub fn store(&self, doc: &Value) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, doc)?;
            writer.flush()?;
        }
        temp.persist(&self.path).map_err(|e| ForecastError::Io(e.error))?;

        debug!(path = %self.path.display(), "feed cached");
        Ok(())
    }

    fn is_expired(&self) -> Result<bool> {
        let Some(max_age) = self.max_age else {
            return Ok(false);
        };
        let modified = fs::metadata(&self.path)?.modified()?;
        // A timestamp in the future counts as fresh.
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        Ok(age >= max_age)
    }

    pub fn invalidate(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
