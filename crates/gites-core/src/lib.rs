//! gites-core
//!
//! Parsing and aggregation services for the rental dashboard.
//! Depends on gites-domain. No CLI, no terminal I/O; feed access goes through
//! the [`feed::FeedSource`] trait.

pub mod error;
pub mod feed;
pub mod filter;
pub mod labels;
pub mod occupancy_service;
pub mod parser;
pub mod series_service;
pub mod stats_service;
pub mod time;
pub mod urssaf_service;

pub use error::CoreError;
pub use feed::*;
pub use filter::*;
pub use occupancy_service::*;
pub use parser::*;
pub use series_service::*;
pub use stats_service::*;
pub use time::*;
pub use urssaf_service::*;
