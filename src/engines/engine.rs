//! The search engine value type and its address building.

use url::form_urlencoded;

use crate::opensearch::AutodiscoveryLink;

/// A single configured search engine.
///
/// `url` holds the search address with a literal `%s` standing in for the
/// query, e.g. `https://duckduckgo.com/?q=%s`. All string fields default to
/// empty rather than absent; only the two discovery-related addresses are
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEngine {
    name: String,
    url: String,
    bang: String,
    suggestions_url: Option<String>,
    opensearch_url: Option<String>,
}

impl SearchEngine {
    /// Create an empty engine. Fields are filled in by the builder methods
    /// or by the setters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name (builder form).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the search address (builder form).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the bang shortcut (builder form).
    pub fn with_bang(mut self, bang: impl Into<String>) -> Self {
        self.bang = bang.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn bang(&self) -> &str {
        &self.bang
    }

    pub fn suggestions_url(&self) -> Option<&str> {
        self.suggestions_url.as_deref()
    }

    pub fn opensearch_url(&self) -> Option<&str> {
        self.opensearch_url.as_deref()
    }

    /// Replace the display name. Returns whether the value actually changed;
    /// assigning the current value is a no-op.
    pub fn set_name(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name.to_owned();
        true
    }

    /// Replace the search address. Same change contract as [`set_name`].
    ///
    /// [`set_name`]: SearchEngine::set_name
    pub fn set_url(&mut self, url: &str) -> bool {
        if self.url == url {
            return false;
        }
        self.url = url.to_owned();
        true
    }

    /// Replace the bang shortcut. An empty bang means "no shortcut".
    pub fn set_bang(&mut self, bang: &str) -> bool {
        if self.bang == bang {
            return false;
        }
        self.bang = bang.to_owned();
        true
    }

    /// Replace the suggestions address. Empty strings are ignored in
    /// addition to the usual equal-value no-op.
    pub fn set_suggestions_url(&mut self, url: &str) -> bool {
        if url.is_empty() || self.suggestions_url.as_deref() == Some(url) {
            return false;
        }
        self.suggestions_url = Some(url.to_owned());
        true
    }

    /// Replace the address of the OpenSearch description this engine came
    /// from. Empty strings are ignored.
    pub fn set_opensearch_url(&mut self, url: &str) -> bool {
        if url.is_empty() || self.opensearch_url.as_deref() == Some(url) {
            return false;
        }
        self.opensearch_url = Some(url.to_owned());
        true
    }

    /// Build the address that searches for `query` with this engine.
    ///
    /// The query is form-encoded (spaces become `+`) and replaces every
    /// occurrence of `%s` in the search address.
    pub fn build_search_address(&self, query: &str) -> String {
        replace_search_placeholder(&self.url, query)
    }

    /// Build the suggestions address for `query`, or `None` when the engine
    /// has no suggestions URL.
    pub fn build_suggestions_address(&self, query: &str) -> Option<String> {
        self.suggestions_url
            .as_deref()
            .map(|url| replace_search_placeholder(url, query))
    }

    /// Whether `link` points at this engine: either the description URL is
    /// the exact one this engine was loaded from, or the advertised name
    /// matches the engine name case-insensitively.
    pub fn matches_by_autodiscovery_link(&self, link: &AutodiscoveryLink) -> bool {
        if self.opensearch_url.as_deref() == Some(link.url()) {
            return true;
        }
        self.name.to_lowercase() == link.name().to_lowercase()
    }
}

fn replace_search_placeholder(address: &str, query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    address.replace("%s", &encoded)
}

/// Derive a bang shortcut from an engine name: the first character of each
/// word plus any uppercase characters inside it, lowercased and prefixed
/// with `!`. `(` counts as a word separator so "Wikipedia (en)" becomes
/// `!we`. Returns the empty string when nothing usable remains.
pub fn build_bang_for_name(name: &str) -> String {
    let mut initials = String::new();
    for word in name.trim().split([' ', '(']) {
        let mut chars = word.chars();
        let Some(first) = chars.next() else { continue };
        initials.push(first);
        initials.extend(chars.filter(|c| c.is_uppercase()));
    }
    if initials.is_empty() {
        return String::new();
    }
    format!("!{}", initials.to_lowercase())
}
