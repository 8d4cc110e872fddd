// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment errors into miette diagnostics.
//!
//! Unknown keys get a source span when the offending file is known and a
//! "did you mean" hint from Jaro-Winkler similarity.

#![allow(unused_assignments)] // emitted by miette's Diagnostic derive

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity a candidate key needs before it is offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, ready for graphical rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(prism::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Comma separated keys accepted by the enclosing table.
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid value for `{key}`: {detail}")]
    #[diagnostic(code(prism::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(prism::config::missing_key),
        help("add `{key} = <value>` to the entry in prism.toml")
    )]
    MissingKey { key: String },

    /// A value that deserialized but breaks a cross-field rule.
    #[error("validation error: {message}")]
    #[diagnostic(code(prism::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(prism::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Split a (possibly multi-error) `figment::Error` into diagnostics.
///
/// `toml_sources` pairs file paths with their contents and is only used to
/// attach spans to unknown-key errors.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate_key(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: dotted(&error.path, field),
            },
            Kind::InvalidType(actual, expected) | Kind::InvalidValue(actual, expected) => {
                ConfigError::InvalidType {
                    key: error.path.join("."),
                    detail: format!("found {actual}"),
                    expected: expected.clone(),
                }
            }
            Kind::UnknownVariant(variant, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("unknown variant `{variant}`"),
                expected: format!("one of: {}", expected.join(", ")),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn dotted(path: &[String], field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", path.join("."))
    }
}

fn locate_key(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings carry no file source; fall back to a single known source.
    let source = match file {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    let Some((path, content)) = source else {
        return (None, None);
    };
    let table = match error.path.split_last() {
        Some((last, parent)) if last == field => parent,
        _ => error.path.as_slice(),
    };
    match find_key_offset(content, table, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` as a key inside the table named by `path`.
///
/// `["routing", "roles"]` looks after `[routing.roles]`; array elements such as
/// `["models", "0"]` look after the first `[[models]]`. An empty path searches
/// the top of the file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let table: Vec<&str> = path
        .iter()
        .map(String::as_str)
        .filter(|segment| segment.parse::<usize>().is_err())
        .collect();

    let start = if table.is_empty() {
        0
    } else {
        let name = table.join(".");
        [format!("[{name}]"), format!("[[{name}]]")]
            .iter()
            .find_map(|header| content.find(header.as_str()).map(|pos| pos + header.len()))?
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if table.is_empty() && trimmed.starts_with('[') {
            return None;
        }
        if let Some(rest) = trimmed.strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Closest valid key to `unknown`, if any is similar enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (key, strsim::jaro_winkler(unknown, key)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Print diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_key() {
        let valid = &["enabled", "force_specialist", "fallback_model", "roles"];
        assert_eq!(
            suggest_key("force_specialst", valid),
            Some("force_specialist".to_string())
        );
        assert_eq!(suggest_key("enabeld", valid), Some("enabled".to_string()));
    }

    #[test]
    fn no_suggestion_for_unrelated_key() {
        let valid = &["name", "log_level"];
        assert_eq!(suggest_key("qqqqqq", valid), None);
    }

    #[test]
    fn finds_key_in_nested_table() {
        let content = "[routing]\nenabled = true\n\n[routing.roles]\n  codr = \"x\"\n";
        let path = vec!["routing".to_string(), "roles".to_string()];
        let offset = find_key_offset(content, &path, "codr").unwrap();
        assert_eq!(&content[offset..offset + 4], "codr");
    }

    #[test]
    fn finds_key_in_array_table() {
        let content = "[[models]]\nid = \"a\"\nprovdier = \"b\"\n";
        let path = vec!["models".to_string(), "0".to_string()];
        let offset = find_key_offset(content, &path, "provdier").unwrap();
        assert_eq!(&content[offset..offset + 8], "provdier");
    }

    #[test]
    fn key_prefix_is_not_a_match() {
        let content = "[agent]\nnames = 1\nname = \"p\"\n";
        let path = vec!["agent".to_string()];
        let offset = find_key_offset(content, &path, "name").unwrap();
        assert_eq!(&content[offset..offset + 6], "name =");
    }

    #[test]
    fn top_level_search_stops_at_first_table() {
        let content = "[agent]\nfoo = 1\n";
        assert_eq!(find_key_offset(content, &[], "foo"), None);
    }
}
