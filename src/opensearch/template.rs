//! OpenSearch URL template substitution.
//!
//! Templates look like `https://example.com/search?q={searchTerms}&l={language}`.
//! Every `{param}` is replaced from a fixed table of defaults; `{param?}`
//! marks the parameter optional, which turns an unknown name into the empty
//! string instead of an error. `searchTerms` substitutes to a literal `%s`
//! so the stored address keeps the usual placeholder shape.

use super::error::TemplateError;

/// Default values for the OpenSearch 1.1 template parameters. `language`
/// comes from the caller since it depends on the host environment.
/// `suggestionIndex` and `suggestionPrefix` are deliberately not supported.
fn default_param_value<'a>(name: &str, language: &'a str) -> Option<&'a str> {
    match name {
        "searchTerms" => Some("%s"),
        "language" => Some(language),
        "inputEncoding" | "outputEncoding" => Some("UTF-8"),
        // Suggestion endpoints commonly answer only recognized clients.
        "referrer:source" => Some("firefox"),
        "count" => Some("20"),
        "startIndex" | "startPage" => Some("1"),
        _ => None,
    }
}

/// First position where substitution is allowed: the path, query or
/// fragment start after the scheme's `//`. Placeholders in the scheme or
/// authority are left alone.
fn find_path_start(template: &str) -> Option<usize> {
    let after_scheme = template.find("//")? + 2;
    template[after_scheme..]
        .find(|c| matches!(c, '/' | '?' | '#'))
        .map(|i| after_scheme + i)
}

/// Substitute every `{param}` / `{param?}` in `template`, filling
/// `{language}` with `language`.
///
/// Fails when the template has no substitutable position, a bracket is
/// unclosed, a parameter has no name, a required parameter is unknown, or
/// `{searchTerms}` never appears at a substitutable position.
pub fn substitute_url_template(template: &str, language: &str) -> Result<String, TemplateError> {
    let path_start = find_path_start(template).ok_or_else(|| TemplateError::MalformedTemplate {
        template: template.to_owned(),
        detail: "no path, query or fragment to substitute parameters into".to_owned(),
    })?;

    let mut url = template.to_owned();
    let mut cursor = path_start;
    let mut has_search_terms = false;

    while let Some(open) = url[cursor..].find('{').map(|i| cursor + i) {
        let close = url[open..]
            .find('}')
            .map(|i| open + i)
            .ok_or_else(|| TemplateError::MalformedTemplate {
                template: template.to_owned(),
                detail: format!("unclosed parameter bracket at byte {}", open),
            })?;

        let raw_name = &url[open + 1..close];
        let (name, optional) = match raw_name.strip_suffix('?') {
            Some(stripped) => (stripped, true),
            None => (raw_name, false),
        };
        if name.is_empty() {
            return Err(TemplateError::MalformedTemplate {
                template: template.to_owned(),
                detail: format!("parameter at byte {} has no name", open),
            });
        }
        if name == "searchTerms" {
            has_search_terms = true;
        }

        let replacement = match default_param_value(name, language) {
            Some(value) => value,
            None if optional => "",
            None => {
                return Err(TemplateError::UnknownParameter {
                    template: template.to_owned(),
                    name: name.to_owned(),
                });
            }
        };

        url.replace_range(open..=close, replacement);
        // Replacements never contain '{', so scanning resumes right after.
        cursor = open + replacement.len();
    }

    if !has_search_terms {
        return Err(TemplateError::MissingSearchTerms {
            template: template.to_owned(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANGUAGE: &str = "en-US";

    #[test]
    fn test_substitutes_the_whole_default_table() {
        let template = "https://example.test/?q={searchTerms}&l={language}\
                        &ie={inputEncoding}&oe={outputEncoding}\
                        &client={referrer:source}&n={count}&i={startIndex}&p={startPage}";
        let url = substitute_url_template(template, LANGUAGE).unwrap();
        assert_eq!(
            url,
            "https://example.test/?q=%s&l=en-US&ie=UTF-8&oe=UTF-8&client=firefox&n=20&i=1&p=1"
        );
    }

    #[test]
    fn test_search_terms_becomes_literal_percent_s() {
        let url =
            substitute_url_template("https://example.test/search?q={searchTerms}", LANGUAGE)
                .unwrap();
        assert_eq!(url, "https://example.test/search?q=%s");
    }

    #[test]
    fn test_optional_search_terms_counts_as_present() {
        let url =
            substitute_url_template("https://example.test/search?q={searchTerms?}", LANGUAGE)
                .unwrap();
        assert_eq!(url, "https://example.test/search?q=%s");
    }

    #[test]
    fn test_query_only_and_fragment_only_templates() {
        // No slash after the authority; the '?' is the substitution start.
        let url = substitute_url_template("https://example.test?q={searchTerms}", LANGUAGE)
            .unwrap();
        assert_eq!(url, "https://example.test?q=%s");

        let url = substitute_url_template("https://example.test#q-{searchTerms}", LANGUAGE)
            .unwrap();
        assert_eq!(url, "https://example.test#q-%s");
    }

    #[test]
    fn test_placeholder_in_host_is_not_substituted() {
        let url = substitute_url_template(
            "https://{language}.wikipedia.test/wiki/{searchTerms}",
            LANGUAGE,
        )
        .unwrap();
        assert_eq!(url, "https://{language}.wikipedia.test/wiki/%s");
    }

    #[test]
    fn test_search_terms_in_host_does_not_satisfy_the_requirement() {
        let result =
            substitute_url_template("https://{searchTerms}.example.test/search", LANGUAGE);
        assert_eq!(
            result,
            Err(TemplateError::MissingSearchTerms {
                template: "https://{searchTerms}.example.test/search".to_owned(),
            })
        );
    }

    #[test]
    fn test_unknown_parameter_is_fatal_when_required() {
        let result = substitute_url_template(
            "https://example.test/?q={searchTerms}&x={suggestionPrefix}",
            LANGUAGE,
        );
        assert_eq!(
            result,
            Err(TemplateError::UnknownParameter {
                template: "https://example.test/?q={searchTerms}&x={suggestionPrefix}".to_owned(),
                name: "suggestionPrefix".to_owned(),
            })
        );
    }

    #[test]
    fn test_unknown_optional_parameter_becomes_empty() {
        let url = substitute_url_template(
            "https://example.test/?q={searchTerms}&x={suggestionPrefix?}&y=1",
            LANGUAGE,
        )
        .unwrap();
        assert_eq!(url, "https://example.test/?q=%s&x=&y=1");
    }

    #[test]
    fn test_missing_search_terms_is_fatal() {
        let result = substitute_url_template("https://example.test/?l={language}", LANGUAGE);
        assert!(matches!(
            result,
            Err(TemplateError::MissingSearchTerms { .. })
        ));
    }

    #[test]
    fn test_unclosed_bracket_is_fatal() {
        let result = substitute_url_template("https://example.test/?q={searchTerms", LANGUAGE);
        assert!(matches!(
            result,
            Err(TemplateError::MalformedTemplate { ref detail, .. })
                if detail.contains("unclosed")
        ));
    }

    #[test]
    fn test_nameless_parameters_are_fatal() {
        for template in [
            "https://example.test/?q={}",
            "https://example.test/?q={?}",
        ] {
            let result = substitute_url_template(template, LANGUAGE);
            assert!(
                matches!(
                    result,
                    Err(TemplateError::MalformedTemplate { ref detail, .. })
                        if detail.contains("no name")
                ),
                "template: {:?}",
                template
            );
        }
    }

    #[test]
    fn test_template_without_substitutable_position_is_fatal() {
        for template in ["https://example.test", "mailto:nobody@example.test"] {
            let result = substitute_url_template(template, LANGUAGE);
            assert!(
                matches!(result, Err(TemplateError::MalformedTemplate { .. })),
                "template: {:?}",
                template
            );
        }
    }
}
