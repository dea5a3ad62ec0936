//! gites-config
//!
//! Persistent dashboard preferences: display locale, feed location, access
//! password and the reporting rules fed to the aggregation services.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{default_base_dir, ConfigManager, FEED_ENV, HOME_ENV};
pub use model::Config;
