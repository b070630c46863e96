//! User agent and accept headers for description downloads

use crate::VERSION;

/// Browser-like user agent carrying the crate version. Some providers only
/// serve OpenSearch descriptions to recognized browser engines.
pub fn user_agent() -> String {
    format!(
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15 OpenSearchRS/{}",
        VERSION
    )
}

/// Accept header preferring OpenSearch description documents
pub fn accept_opensearch() -> &'static str {
    "application/opensearchdescription+xml,application/xml;q=0.9,text/xml;q=0.8,*/*;q=0.7"
}

/// Standard accept-language header
pub fn accept_language(lang: &str) -> String {
    if lang == "en-US" || lang.is_empty() {
        "en-US,en;q=0.9".to_string()
    } else {
        format!("{},en-US;q=0.9,en;q=0.8", lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();
        assert!(ua.starts_with("Mozilla/5.0"));
        assert!(ua.contains("OpenSearchRS/"));
    }

    #[test]
    fn test_accept_language() {
        assert_eq!(accept_language("en-US"), "en-US,en;q=0.9");
        assert_eq!(accept_language(""), "en-US,en;q=0.9");
        assert_eq!(accept_language("fr-FR"), "fr-FR,en-US;q=0.9,en;q=0.8");
    }
}
