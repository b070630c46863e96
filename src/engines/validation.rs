//! Field validation for engine editing surfaces.
//!
//! Lives outside the core types on purpose: the manager accepts whatever it
//! is given, and UIs validate before handing values over. Messages are the
//! exact strings shown to users.

use thiserror::Error;
use url::Url;

use super::manager::SearchEngineManager;

/// Which engine field a [`ValidationError`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineField {
    Name,
    Address,
    Bang,
}

/// A rejected field value, with the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: EngineField,
    pub message: &'static str,
}

fn invalid(field: EngineField, message: &'static str) -> ValidationError {
    ValidationError { field, message }
}

/// Validate a (possibly edited) engine name. `current_name` is the name the
/// engine already has, so leaving it unchanged never collides with itself.
pub fn validate_name(
    manager: &SearchEngineManager,
    current_name: &str,
    name: &str,
) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(invalid(EngineField::Name, "A name is required"));
    }
    if name != current_name && manager.find_engine_by_name(name).is_some() {
        return Err(invalid(EngineField::Name, "This search engine already exists"));
    }
    Ok(())
}

/// Validate a search address the user typed.
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.is_empty() {
        return Err(invalid(EngineField::Address, "This field is required"));
    }
    if !address.starts_with("http://") && !address.starts_with("https://") {
        return Err(invalid(
            EngineField::Address,
            "Address must start with either http:// or https://",
        ));
    }

    // %s is not valid percent-encoding, so URL parsing would reject it.
    // Stand in the percent-encoded form and count placeholders on the way.
    match address.matches("%s").count() {
        0 => {
            return Err(invalid(
                EngineField::Address,
                "Address must contain the search term represented by %s",
            ))
        }
        1 => {}
        _ => {
            return Err(invalid(
                EngineField::Address,
                "Address should not contain the search term several times",
            ))
        }
    }

    let Ok(url) = Url::parse(&address.replace("%s", "%25s")) else {
        return Err(invalid(EngineField::Address, "Address is not a valid URL"));
    };
    if url.host_str().map_or(true, |host| host.is_empty()) {
        return Err(invalid(
            EngineField::Address,
            "Address is not a valid URL. The address should look like https://www.example.com/search?q=%s",
        ));
    }
    Ok(())
}

// Punctuation covers a wide range of characters; rule out the ones that
// make no sense at the start of a shortcut.
fn is_bang_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control() && !"(){}[].,".contains(c)
}

/// Validate a bang shortcut. The empty bang is always valid (no shortcut
/// wanted); `current_bang` keeps an unchanged value from colliding with
/// itself.
pub fn validate_bang(
    manager: &SearchEngineManager,
    current_bang: &str,
    bang: &str,
) -> Result<(), ValidationError> {
    if bang != current_bang && manager.has_bang(bang) {
        return Err(invalid(EngineField::Bang, "This shortcut is already used."));
    }
    if bang.contains(' ') {
        return Err(invalid(
            EngineField::Bang,
            "Search shortcuts must not contain any space.",
        ));
    }
    if let Some(first) = bang.chars().next() {
        if !is_bang_symbol(first) {
            return Err(invalid(
                EngineField::Bang,
                "Search shortcuts should start with a symbol such as !, # or @.",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineRecord, Settings};

    fn manager() -> SearchEngineManager {
        SearchEngineManager::from_settings(&Settings {
            engines: vec![
                EngineRecord {
                    name: "Wikipedia".to_owned(),
                    url: "https://wikipedia.org/%s".to_owned(),
                    bang: "!w".to_owned(),
                },
                EngineRecord {
                    name: "Duckduckgo".to_owned(),
                    url: "https://duckduckgo.com/search?q=%s".to_owned(),
                    bang: "!ddg".to_owned(),
                },
            ],
            default_engine: "Duckduckgo".to_owned(),
        })
    }

    fn message(result: Result<(), ValidationError>) -> &'static str {
        result.unwrap_err().message
    }

    #[test]
    fn test_validate_name() {
        let manager = manager();
        assert_eq!(message(validate_name(&manager, "", "")), "A name is required");
        assert_eq!(
            message(validate_name(&manager, "", "Wikipedia")),
            "This search engine already exists"
        );
        // Keeping the current name is not a collision.
        assert!(validate_name(&manager, "Wikipedia", "Wikipedia").is_ok());
        assert!(validate_name(&manager, "Wikipedia", "Wiktionary").is_ok());
    }

    #[test]
    fn test_validate_address_rejections() {
        let cases = [
            ("", "This field is required"),
            (
                "ftp://example.com/?q=%s",
                "Address must start with either http:// or https://",
            ),
            (
                "example.com/?q=%s",
                "Address must start with either http:// or https://",
            ),
            (
                "https://example.com/search",
                "Address must contain the search term represented by %s",
            ),
            (
                "https://example.com/?a=%s&b=%s",
                "Address should not contain the search term several times",
            ),
            ("https://ex ample.com/?q=%s", "Address is not a valid URL"),
        ];
        for (address, expected) in cases {
            assert_eq!(message(validate_address(address)), expected, "address: {:?}", address);
        }
    }

    #[test]
    fn test_validate_address_accepts_real_addresses() {
        assert!(validate_address("https://duckduckgo.com/?q=%s").is_ok());
        assert!(validate_address("http://localhost:8080/search?q=%s").is_ok());
        // The placeholder may sit anywhere, not just in the query.
        assert!(validate_address("https://wikipedia.org/wiki/%s").is_ok());
    }

    #[test]
    fn test_validate_bang() {
        let manager = manager();
        assert_eq!(
            message(validate_bang(&manager, "", "!w")),
            "This shortcut is already used."
        );
        assert_eq!(
            message(validate_bang(&manager, "", "!my bang")),
            "Search shortcuts must not contain any space."
        );
        for bang in ["abc", "1a", "(x", "{x", "[x", ".x", ",x"] {
            assert_eq!(
                message(validate_bang(&manager, "", bang)),
                "Search shortcuts should start with a symbol such as !, # or @.",
                "bang: {:?}",
                bang
            );
        }
        // Keeping the current bang is not a collision.
        assert!(validate_bang(&manager, "!w", "!w").is_ok());
        // No shortcut at all is fine.
        assert!(validate_bang(&manager, "!w", "").is_ok());
        for bang in ["!so", "#so", "@so", "/so", "?so"] {
            assert!(validate_bang(&manager, "", bang).is_ok(), "bang: {:?}", bang);
        }
    }
}
