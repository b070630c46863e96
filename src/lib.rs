//! OpenSearch-RS: search engine management with OpenSearch support
//!
//! Manages a user-configurable collection of search engines: names, search
//! addresses with a `%s` placeholder, bang shortcuts (`!ddg rust`), and
//! suggestion endpoints. Engines can be created by hand or downloaded and
//! parsed from OpenSearch description documents discovered on web pages.

pub mod config;
pub mod engines;
pub mod locales;
pub mod network;
pub mod opensearch;

pub use config::Settings;
pub use engines::{SearchEngine, SearchEngineManager};
pub use network::Cancellable;
pub use opensearch::{load_from_link, AutodiscoveryLink, OpenSearchError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for description downloads in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;
