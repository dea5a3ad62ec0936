//! gites-feed-json
//!
//! Reads the booking feed from a JSON file on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use gites_core::{CoreError, FeedSource};
use serde_json::Value;

/// Filesystem-backed booking feed: one JSON object mapping each property to
/// its rows.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedSource for JsonFileFeed {
    fn fetch(&self) -> Result<Value, CoreError> {
        if !self.path.exists() {
            return Err(CoreError::FeedUnavailable(format!(
                "no feed at `{}`",
                self.path.display()
            )));
        }
        tracing::debug!(path = %self.path.display(), "reading booking feed");
        let data = fs::read_to_string(&self.path)?;
        let raw: Value = serde_json::from_str(&data)?;
        if !raw.is_object() {
            return Err(CoreError::InvalidOperation(format!(
                "feed `{}` is not a JSON object",
                self.path.display()
            )));
        }
        Ok(raw)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
