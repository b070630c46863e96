//! Localization module for opensearch-rs
//!
//! Handles turning the process locale into the RFC 5646-style language tag
//! substituted for `{language}` in URL templates.

/// Language used when the environment provides no usable locale.
pub const FALLBACK_LANGUAGE: &str = "en-US";

/// Detect the language tag from the process environment, checking `LC_ALL`,
/// `LC_MESSAGES` and `LANG` in that order.
pub fn system_language() -> String {
    for variable in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(variable) {
            if let Some(tag) = language_tag_from_posix(&value) {
                return tag;
            }
        }
    }
    FALLBACK_LANGUAGE.to_string()
}

/// Convert a POSIX locale like `en_US.UTF-8` to a language tag like `en-US`.
/// Returns `None` for empty values and the `C`/`POSIX` locales.
fn language_tag_from_posix(locale: &str) -> Option<String> {
    let base = locale
        .split(|c| c == '.' || c == '@')
        .next()
        .unwrap_or(locale);
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}
