//! `${Name}` placeholder substitution for rule skeletons.
//!
//! Values are copied verbatim: no escaping is applied, and substituted text is
//! never scanned for further placeholders.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::Configuration;
use crate::error::TemplateError;

const OPEN: &str = "${";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]*)\}").expect("placeholder pattern is valid"))
}

/// Replace every `${Name}` in `template` with the matching configuration field.
///
/// Templates without placeholders are returned borrowed.
pub fn substitute<'a>(
    template: &'a str,
    config: &Configuration,
) -> Result<Cow<'a, str>, TemplateError> {
    if !template.contains(OPEN) {
        return Ok(Cow::Borrowed(template));
    }

    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for captures in placeholder_pattern().captures_iter(template) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let literal = &template[last..whole.start()];
        if literal.contains(OPEN) {
            return Err(TemplateError::UnterminatedPlaceholder(template.to_string()));
        }
        let value = config
            .field(name.as_str())
            .ok_or_else(|| TemplateError::UnknownPlaceholder(name.as_str().to_string()))?;
        log::trace!("substituting ${{{}}} with {:?}", name.as_str(), value);
        rendered.push_str(literal);
        rendered.push_str(value);
        last = whole.end();
    }

    let tail = &template[last..];
    if tail.contains(OPEN) {
        return Err(TemplateError::UnterminatedPlaceholder(template.to_string()));
    }
    rendered.push_str(tail);

    Ok(Cow::Owned(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Configuration {
        Configuration::default()
            .with_sync_namespace("sync-namespace")
            .with_mirroring_prefix("k8s-")
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        let text = r#"node_prefix "" {"#;
        let out = substitute(text, &config()).expect("should render");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, text);
    }

    #[test]
    fn test_substitutes_known_fields() {
        let out = substitute(r#"namespace "${SyncNamespace}" / "${MirroringPrefix}""#, &config())
            .expect("should render");
        assert_eq!(out, r#"namespace "sync-namespace" / "k8s-""#);
    }

    #[test]
    fn test_empty_value_substitutes_empty_string() {
        let out = substitute(r#""${MirroringPrefix}""#, &Configuration::default())
            .expect("should render");
        assert_eq!(out, r#""""#);
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let config = Configuration::default().with_mirroring_prefix("${SyncNamespace}");
        let out = substitute("${MirroringPrefix}", &config).expect("should render");
        assert_eq!(out, "${SyncNamespace}");
    }

    #[test]
    fn test_unknown_placeholder_fails() {
        let err =
            substitute("namespace \"${Namespace}\"", &config()).expect_err("should fail");
        assert_eq!(err, TemplateError::UnknownPlaceholder("Namespace".to_string()));
    }

    #[test]
    fn test_unterminated_placeholder_fails() {
        let err =
            substitute("namespace \"${SyncNamespace\"", &config()).expect_err("should fail");
        assert!(matches!(err, TemplateError::UnterminatedPlaceholder(_)));
    }

    #[test]
    fn test_opening_inside_placeholder_is_rejected() {
        let err = substitute("${Sync ${MirroringPrefix}", &config()).expect_err("should fail");
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholder("Sync ${MirroringPrefix".to_string())
        );
        let err = substitute("\"${\" \"${SyncNamespace}\"", &config()).expect_err("should fail");
        assert!(matches!(err, TemplateError::UnknownPlaceholder(_)));
    }

    #[test]
    fn test_multiple_placeholders_and_surrounding_text() {
        let out = substitute("a${SyncNamespace}b${MirroringPrefix}c${SyncNamespace}", &config())
            .expect("should render");
        assert_eq!(out, "async-namespacebk8s-csync-namespace");
    }
}
