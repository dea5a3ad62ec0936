//! Feed access. The raw feed is fetched once per session and parsed into an
//! immutable dataset.

use gites_domain::PropertyDataset;
use serde_json::Value;

use crate::{parser::parse_feed_with_diagnostics, CoreError};

/// Abstraction over sources able to deliver the raw booking feed.
pub trait FeedSource: Send + Sync {
    /// Returns the raw feed object (property name to rows).
    fn fetch(&self) -> Result<Value, CoreError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Fetches the feed once and parses it.
pub fn load_dataset(source: &dyn FeedSource) -> Result<PropertyDataset, CoreError> {
    let raw = source.fetch()?;
    let (dataset, diagnostics) = parse_feed_with_diagnostics(&raw);
    tracing::info!(
        source = %source.describe(),
        properties = dataset.len(),
        bookings = diagnostics.total_accepted(),
        dropped_rows = diagnostics.total_dropped(),
        "booking feed loaded"
    );
    Ok(dataset)
}

/// In-memory feed, handy for tests and embedding.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    raw: Value,
}

impl StaticFeed {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }
}

impl FeedSource for StaticFeed {
    fn fetch(&self) -> Result<Value, CoreError> {
        Ok(self.raw.clone())
    }

    fn describe(&self) -> String {
        "in-memory feed".into()
    }
}
