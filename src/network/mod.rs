//! HTTP networking module
//!
//! Provides the HTTP client used to download OpenSearch descriptions and a
//! cancellation token for abandoning downloads.

mod cancellable;
mod client;
mod user_agent;

pub use cancellable::Cancellable;
pub use client::HttpClient;
pub use user_agent::user_agent;
