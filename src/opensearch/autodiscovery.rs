//! Autodiscovery links advertised by web pages.

/// A `<link rel="search" type="application/opensearchdescription+xml">`
/// found by the embedder: the advertised short name and the address of the
/// description document. Discovery itself happens outside this crate; this
/// type only carries the result around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutodiscoveryLink {
    name: String,
    url: String,
}

impl AutodiscoveryLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The name advertised by the page, used for display and error context.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the OpenSearch description document lives.
    pub fn url(&self) -> &str {
        &self.url
    }
}
