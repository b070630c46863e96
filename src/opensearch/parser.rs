//! Streaming parser for OpenSearch description documents.
//!
//! The document is tokenized with `quick-xml` and the resulting start/end/
//! text events drive a small state machine. Recognized elements are matched
//! by local name (any `prefix:` is stripped); everything else is ignored,
//! which keeps the parser tolerant of the extra elements real descriptions
//! carry (`Description`, `Image`, `InputEncoding`, ...).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use super::autodiscovery::AutodiscoveryLink;
use super::error::OpenSearchError;
use super::template::substitute_url_template;
use crate::engines::SearchEngine;
use crate::locales;

const MIME_HTML: &str = "text/html";
const MIME_JSON: &str = "application/json";
const MIME_SUGGESTIONS: &str = "application/x-suggestions+json";

/// What a pending `<Url>` element will become once it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlCategory {
    /// `text/html`: the engine's search address.
    Html,
    /// `application/json` or `application/x-suggestions+json`: the
    /// suggestions address.
    Suggestions,
}

/// Which engine field the next text content belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Name,
}

#[derive(Debug)]
struct PendingUrl {
    template: String,
    category: UrlCategory,
}

/// State machine that builds a [`SearchEngine`] from tokenizer events.
///
/// The engine's `opensearch_url` is seeded from the autodiscovery link
/// before any event is handled, and the link's name provides context for
/// error messages. `language` fills the `{language}` template parameter.
#[derive(Debug)]
pub struct DescriptionParser {
    link: AutodiscoveryLink,
    language: String,
    engine: SearchEngine,
    current_field: Option<TextField>,
    pending_url: Option<PendingUrl>,
}

impl DescriptionParser {
    /// Parser using the system language for `{language}`.
    pub fn new(link: &AutodiscoveryLink) -> Self {
        Self::with_language(link, &locales::system_language())
    }

    /// Parser with an explicit language tag, e.g. `en-US`.
    pub fn with_language(link: &AutodiscoveryLink, language: &str) -> Self {
        let mut engine = SearchEngine::new();
        engine.set_opensearch_url(link.url());
        Self {
            link: link.clone(),
            language: language.to_owned(),
            engine,
            current_field: None,
            pending_url: None,
        }
    }

    /// Tokenize `bytes` and run the whole document through the state
    /// machine, returning the finished engine.
    pub fn parse(mut self, bytes: &[u8]) -> Result<SearchEngine, OpenSearchError> {
        let text = std::str::from_utf8(bytes).map_err(|error| self.malformed(error.to_string()))?;
        self.feed_document(text)?;
        self.finish()
    }

    fn feed_document(&mut self, text: &str) -> Result<(), OpenSearchError> {
        let mut reader = Reader::from_str(text);
        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let (name, attributes) =
                        decode_start(&start).map_err(|message| self.malformed(message))?;
                    self.on_start_element(&name, &attributes);
                }
                Ok(Event::Empty(start)) => {
                    // A self-closing tag is a start immediately followed by
                    // an end, exactly like `<Url template="..." type="..."/>`.
                    let (name, attributes) =
                        decode_start(&start).map_err(|message| self.malformed(message))?;
                    self.on_start_element(&name, &attributes);
                    self.on_end_element(&name)?;
                }
                Ok(Event::End(end)) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    self.on_end_element(&name)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text
                        .unescape()
                        .map_err(|error| self.malformed(error.to_string()))?;
                    self.on_text(&text);
                }
                Ok(Event::CData(cdata)) => {
                    let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    self.on_text(&text);
                }
                Ok(Event::Eof) => return Ok(()),
                // Declarations, comments and processing instructions.
                Ok(_) => {}
                Err(error) => return Err(self.malformed(error.to_string())),
            }
        }
    }

    fn on_start_element(&mut self, name: &str, attributes: &[(String, String)]) {
        match local_name(name) {
            "ShortName" => self.current_field = Some(TextField::Name),
            "Url" => self.on_url_start(attributes),
            "Param" => self.on_param(attributes),
            // "OpenSearchDescription" and anything unrecognized.
            _ => {}
        }
    }

    fn on_url_start(&mut self, attributes: &[(String, String)]) {
        let mut template = None;
        let mut mime = None;
        for (key, value) in attributes {
            match key.as_str() {
                "template" => template = Some(value.as_str()),
                "type" => mime = Some(value.as_str()),
                _ => {}
            }
        }

        let category = match mime {
            Some(MIME_HTML) => UrlCategory::Html,
            Some(MIME_JSON) | Some(MIME_SUGGESTIONS) => UrlCategory::Suggestions,
            _ => {
                debug!(
                    "ignoring <Url> with unrecognized type {:?} in description for {}",
                    mime,
                    self.link.name()
                );
                return;
            }
        };
        self.pending_url = Some(PendingUrl {
            template: template.unwrap_or_default().to_owned(),
            category,
        });
    }

    fn on_param(&mut self, attributes: &[(String, String)]) {
        // <Param> only means something inside a recognized <Url>.
        let Some(pending) = self.pending_url.as_mut() else {
            return;
        };

        let mut name = None;
        let mut value = None;
        for (key, attr_value) in attributes {
            match key.as_str() {
                "name" => name = Some(attr_value.as_str()),
                "value" => value = Some(attr_value.as_str()),
                _ => {}
            }
        }
        let (Some(name), Some(value)) = (name, value) else {
            warn!(
                "skipping <Param> without both name and value attributes in description for {}",
                self.link.name()
            );
            return;
        };
        inject_query_param(&mut pending.template, name, value);
    }

    /// A substitution failure on a closing `<Url>` rejects the whole
    /// document.
    fn on_end_element(&mut self, name: &str) -> Result<(), OpenSearchError> {
        if local_name(name) == "Url" {
            if let Some(pending) = self.pending_url.take() {
                let url = substitute_url_template(&pending.template, &self.language).map_err(
                    |source| OpenSearchError::Template {
                        engine: self.link.name().to_owned(),
                        source,
                    },
                )?;
                match pending.category {
                    UrlCategory::Html => self.engine.set_url(&url),
                    UrlCategory::Suggestions => self.engine.set_suggestions_url(&url),
                };
            }
        }
        // Any closing tag ends the text field being read.
        self.current_field = None;
        Ok(())
    }

    fn on_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match self.current_field {
            Some(TextField::Name) => {
                self.engine.set_name(text);
            }
            None => {}
        }
    }

    fn finish(self) -> Result<SearchEngine, OpenSearchError> {
        if self.engine.name().is_empty() || self.engine.url().is_empty() {
            return Err(OpenSearchError::IncompleteDescription {
                engine: self.link.name().to_owned(),
            });
        }
        debug!(
            "parsed opensearch description for {} from {}",
            self.engine.name(),
            self.link.url()
        );
        Ok(self.engine)
    }

    fn malformed(&self, message: String) -> OpenSearchError {
        OpenSearchError::MalformedXml {
            engine: self.link.name().to_owned(),
            message,
        }
    }
}

/// Parse a complete description document fetched from `link`.
pub fn load_from_bytes(
    link: &AutodiscoveryLink,
    bytes: &[u8],
) -> Result<SearchEngine, OpenSearchError> {
    DescriptionParser::new(link).parse(bytes)
}

/// Element name with any namespace prefix removed.
fn local_name(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, local)) => local,
        None => name,
    }
}

/// Splice `name=value` into the template's query string: after the last `?`
/// when there is one, otherwise as a new query before the last `#` (or at
/// the end). Values are assumed to be encoded already, as in the document.
fn inject_query_param(url: &mut String, name: &str, value: &str) {
    if let Some(question_mark) = url.rfind('?') {
        url.insert_str(question_mark + 1, &format!("{}={}&", name, value));
    } else if let Some(hash) = url.rfind('#') {
        url.insert_str(hash, &format!("?{}={}", name, value));
    } else {
        url.push_str(&format!("?{}={}", name, value));
    }
}

fn decode_start(start: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>), String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| error.to_string())?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|error| error.to_string())?
            .into_owned();
        attributes.push((key, value));
    }
    Ok((name, attributes))
}
