//! Downloading description documents.

use tracing::debug;

use super::autodiscovery::AutodiscoveryLink;
use super::error::OpenSearchError;
use super::parser::DescriptionParser;
use crate::engines::SearchEngine;
use crate::locales;
use crate::network::{Cancellable, HttpClient};

/// Download the description document behind `link` and parse it into an
/// engine.
///
/// The cancellable is honored both before the request goes out and while it
/// is in flight; a cancelled load reports [`OpenSearchError::Cancelled`],
/// which callers treat as silence rather than failure.
pub async fn load_from_link(
    client: &HttpClient,
    link: &AutodiscoveryLink,
    cancellable: &Cancellable,
) -> Result<SearchEngine, OpenSearchError> {
    if cancellable.is_cancelled() {
        return Err(cancelled(link));
    }

    let language = locales::system_language();
    debug!("downloading opensearch description from {}", link.url());

    let bytes = tokio::select! {
        _ = cancellable.cancelled() => return Err(cancelled(link)),
        result = client.get_bytes(link.url(), &language) => {
            result.map_err(|source| OpenSearchError::Network {
                engine: link.name().to_owned(),
                source,
            })?
        }
    };

    DescriptionParser::with_language(link, &language).parse(&bytes)
}

fn cancelled(link: &AutodiscoveryLink) -> OpenSearchError {
    OpenSearchError::Cancelled {
        engine: link.name().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOCUMENT: &[u8] = br#"<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/">
  <ShortName>Mocked Search</ShortName>
  <Url type="text/html" template="https://example.test/search?q={searchTerms}"/>
</OpenSearchDescription>"#;

    async fn serve_description() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/osd.xml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(DOCUMENT)
                    .insert_header("content-type", "application/opensearchdescription+xml"),
            )
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_downloads_and_parses_a_description() {
        let server = serve_description().await;
        let link = AutodiscoveryLink::new("Mocked", format!("{}/osd.xml", server.uri()));
        let client = HttpClient::new(5).unwrap();

        let engine = load_from_link(&client, &link, &Cancellable::new())
            .await
            .unwrap();
        assert_eq!(engine.name(), "Mocked Search");
        assert_eq!(engine.url(), "https://example.test/search?q=%s");
        assert_eq!(engine.opensearch_url(), Some(link.url()));
    }

    #[tokio::test]
    async fn test_http_errors_become_network_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/osd.xml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let link = AutodiscoveryLink::new("Gone", format!("{}/osd.xml", server.uri()));
        let client = HttpClient::new(5).unwrap();

        let result = load_from_link(&client, &link, &Cancellable::new()).await;
        match result {
            Err(OpenSearchError::Network { engine, .. }) => assert_eq!(engine, "Gone"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pre_cancelled_loads_never_hit_the_network() {
        let link = AutodiscoveryLink::new("Never", "http://127.0.0.1:9/osd.xml");
        let client = HttpClient::new(5).unwrap();
        let cancellable = Cancellable::new();
        cancellable.cancel();

        let result = load_from_link(&client, &link, &cancellable).await;
        assert!(matches!(result, Err(OpenSearchError::Cancelled { .. })));
    }
}
