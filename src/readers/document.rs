use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{ForecastError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode a feed payload. A leading UTF-8 byte order mark is tolerated.
pub fn decode_document(bytes: &[u8], origin: &str) -> Result<Value> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    serde_json::from_slice(bytes).map_err(|source| ForecastError::MalformedInput {
        origin: origin.to_string(),
        source,
    })
}

/// Read and decode a JSON document from disk.
pub fn read_document_file(path: &Path) -> Result<Value> {
    let bytes = fs::read(path)?;
    decode_document(&bytes, &path.display().to_string())
}
