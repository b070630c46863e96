//! Errors surfaced while turning a description document into an engine.

use thiserror::Error;

/// Why a URL template could not be substituted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template grammar itself is broken: an unclosed bracket, a
    /// nameless parameter, or no path/query/fragment to substitute into.
    #[error("malformed URL template {template:?}: {detail}")]
    MalformedTemplate { template: String, detail: String },

    /// A required parameter that is not in the default parameter table.
    #[error("unknown required parameter {{{name}}} in URL template {template:?}")]
    UnknownParameter { template: String, name: String },

    /// The template never references `{searchTerms}`, so it cannot carry a
    /// query.
    #[error("URL template {template:?} does not contain the required {{searchTerms}} parameter")]
    MissingSearchTerms { template: String },
}

/// Why loading an OpenSearch description failed. Every variant names the
/// engine (the autodiscovery link's name) so messages can stand alone.
#[derive(Debug, Error)]
pub enum OpenSearchError {
    /// The tokenizer rejected the document, or it was not valid UTF-8.
    #[error("couldn't parse the search engine description file for {engine}: {message}")]
    MalformedXml { engine: String, message: String },

    /// A `<Url>` carried a template that failed substitution.
    #[error("the search engine description for {engine} has an unusable URL template")]
    Template {
        engine: String,
        #[source]
        source: TemplateError,
    },

    /// The document parsed but provided no name or no search URL.
    #[error("the search engine description for {engine} did not provide sufficient information")]
    IncompleteDescription { engine: String },

    /// Downloading the description failed (transport or HTTP status).
    #[error("couldn't download the search engine description file for {engine}")]
    Network {
        engine: String,
        #[source]
        source: reqwest::Error,
    },

    /// The caller cancelled the load. Not a real failure; callers usually
    /// skip logging this one.
    #[error("loading the search engine description for {engine} was cancelled")]
    Cancelled { engine: String },
}

impl OpenSearchError {
    /// Whether this is a caller-initiated cancellation rather than a
    /// failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, OpenSearchError::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_display_names_the_parameter() {
        let error = TemplateError::UnknownParameter {
            template: "https://example.test/?q={searchTerms}&x={bogus}".to_owned(),
            name: "bogus".to_owned(),
        };
        assert!(error.to_string().contains("{bogus}"));
    }

    #[test]
    fn test_cancelled_is_distinguishable() {
        let cancelled = OpenSearchError::Cancelled {
            engine: "Example".to_owned(),
        };
        assert!(cancelled.is_cancelled());

        let incomplete = OpenSearchError::IncompleteDescription {
            engine: "Example".to_owned(),
        };
        assert!(!incomplete.is_cancelled());
    }
}
