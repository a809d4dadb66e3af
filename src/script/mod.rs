//! Batch script emission.
//!
//! Turns a [`RenderConfig`] into the source of a standalone Python 3 script
//! that repeats load, filter, clean, project and render over a file or a
//! directory of `.json` element files. No element data flows through here,
//! only configuration.
//!
//! Selections are embedded as JSON text wrapped in a JSON string literal,
//! `json.loads("...")`, both produced by `serde_json`. Non-ASCII characters
//! are escaped inside the JSON text, so the emitted script is pure ASCII and
//! every selection survives the round trip unchanged, whatever quotes,
//! backslashes or newlines it contains.

mod python;

use crate::error::{Error, Result};
use crate::model::{CategorySelection, MetadataSelection};
use crate::render::{RenderConfig, QUOTE_REPLACEMENTS};
use serde::Serialize;
use std::fmt::Write;

/// Suggested file name for an emitted script.
pub const DEFAULT_SCRIPT_NAME: &str = "generated_script.py";

const CATEGORIES_VAR: &str = "categories_to_include";
const METADATA_VAR: &str = "metadata_to_include";
const CLEANING_VAR: &str = "apply_cleaning";
const TEXT_ONLY_VAR: &str = "only_text";
const QUOTES_VAR: &str = "quote_replacements";

/// Configuration read back from an emitted script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedConfig {
    pub categories: Vec<String>,
    pub metadata: Vec<String>,
    pub clean: bool,
    pub text_only: bool,
}

impl EmbeddedConfig {
    /// Convert back into a render config, validating category labels.
    pub fn to_render_config(&self) -> Result<RenderConfig> {
        Ok(RenderConfig::new()
            .with_categories(CategorySelection::parse(&self.categories)?)
            .with_metadata(MetadataSelection::new(self.metadata.iter().cloned()))
            .with_cleaning(self.clean)
            .with_text_only(self.text_only))
    }
}

/// Emit the batch script for `config`.
///
/// # Example
/// ```
/// use unelements::script::{decode_embedded, emit};
/// use unelements::RenderConfig;
///
/// let script = emit(&RenderConfig::default()).unwrap();
/// let embedded = decode_embedded(&script).unwrap();
/// assert!(embedded.clean);
/// ```
pub fn emit(config: &RenderConfig) -> Result<String> {
    let mut script = String::from(python::HEADER);

    let assignments = [
        (CATEGORIES_VAR, json_literal(&config.categories)?),
        (METADATA_VAR, json_literal(&config.metadata)?),
        (CLEANING_VAR, python_bool(config.clean).to_string()),
        (TEXT_ONLY_VAR, python_bool(config.text_only).to_string()),
        (QUOTES_VAR, json_literal(&QUOTE_REPLACEMENTS)?),
    ];
    for (name, value) in assignments {
        // Writing to a String cannot fail
        let _ = writeln!(script, "{} = {}", name, value);
    }

    script.push_str(python::BODY);
    log::debug!(
        "Emitted batch script ({} categories, {} metadata fields, {} bytes)",
        config.categories.len(),
        config.metadata.len(),
        script.len()
    );
    Ok(script)
}

/// Read the embedded configuration back from an emitted script.
pub fn decode_embedded(script: &str) -> Result<EmbeddedConfig> {
    Ok(EmbeddedConfig {
        categories: decode_list(script, CATEGORIES_VAR)?,
        metadata: decode_list(script, METADATA_VAR)?,
        clean: decode_bool(script, CLEANING_VAR)?,
        text_only: decode_bool(script, TEXT_ONLY_VAR)?,
    })
}

/// Serialize `value` as `json.loads("<json>")` with ASCII-only JSON text.
fn json_literal<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).map_err(|e| Error::Script(e.to_string()))?;
    let quoted =
        serde_json::to_string(&escape_non_ascii(&json)).map_err(|e| Error::Script(e.to_string()))?;
    Ok(format!("json.loads({})", quoted))
}

/// Replace every non-ASCII character with JSON `\uXXXX` escapes (surrogate pairs above the BMP).
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
    }
    out
}

fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn assignment<'a>(script: &'a str, name: &str) -> Result<&'a str> {
    script
        .lines()
        .find_map(|line| {
            line.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix(" = "))
        })
        .ok_or_else(|| Error::Script(format!("missing assignment to {}", name)))
}

fn decode_list(script: &str, name: &str) -> Result<Vec<String>> {
    let literal = assignment(script, name)?
        .strip_prefix("json.loads(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| Error::Script(format!("{} is not a json.loads literal", name)))?;
    let json: String =
        serde_json::from_str(literal).map_err(|e| Error::Script(format!("{}: {}", name, e)))?;
    serde_json::from_str(&json).map_err(|e| Error::Script(format!("{}: {}", name, e)))
}

fn decode_bool(script: &str, name: &str) -> Result<bool> {
    match assignment(script, name)? {
        "True" => Ok(true),
        "False" => Ok(false),
        other => Err(Error::Script(format!("{} is not a boolean: {}", name, other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn test_emit_round_trips_selections() {
        let config = RenderConfig::new()
            .with_categories(vec![Category::NarrativeText])
            .with_metadata(MetadataSelection::new(["page_number"]));
        let script = emit(&config).unwrap();
        let embedded = decode_embedded(&script).unwrap();

        assert_eq!(embedded.categories, vec!["NarrativeText"]);
        assert_eq!(embedded.metadata, vec!["page_number"]);
        assert!(embedded.clean);
        assert!(!embedded.text_only);
        assert_eq!(embedded.to_render_config().unwrap(), config);
    }

    #[test]
    fn test_emit_embeds_literals() {
        let config = RenderConfig::new()
            .with_categories(vec![Category::NarrativeText])
            .with_metadata(MetadataSelection::new(["page_number"]))
            .with_cleaning(false)
            .with_text_only(true);
        let script = emit(&config).unwrap();

        assert!(script.contains(
            "categories_to_include = json.loads(\"[\\\"NarrativeText\\\"]\")\n"
        ));
        assert!(script.contains("metadata_to_include = json.loads(\"[\\\"page_number\\\"]\")\n"));
        assert!(script.contains("apply_cleaning = False\n"));
        assert!(script.contains("only_text = True\n"));
        assert!(script.starts_with("#!/usr/bin/env python3\n"));
    }

    #[test]
    fn test_emit_special_characters() {
        let fields = vec![
            "it's".to_string(),
            "say \"hi\"".to_string(),
            "back\\slash".to_string(),
            "new\nline".to_string(),
            "caf\u{e9}".to_string(),
            "\u{1f600}".to_string(),
            "')); import os #".to_string(),
        ];
        let config = RenderConfig::new().with_metadata(MetadataSelection::new(fields.clone()));
        let script = emit(&config).unwrap();

        assert!(script.is_ascii());
        let embedded = decode_embedded(&script).unwrap();
        assert_eq!(embedded.metadata, fields);
        assert_eq!(embedded.categories.len(), 12);
    }

    #[test]
    fn test_emit_empty_selections() {
        let config = RenderConfig::new().with_categories(CategorySelection::none());
        let embedded = decode_embedded(&emit(&config).unwrap()).unwrap();
        assert!(embedded.categories.is_empty());
        assert!(embedded.metadata.is_empty());
    }

    #[test]
    fn test_emit_is_deterministic() {
        let config = RenderConfig::default();
        assert_eq!(emit(&config).unwrap(), emit(&config).unwrap());
    }

    #[test]
    fn test_quote_table_embedded() {
        let script = emit(&RenderConfig::default()).unwrap();
        let literal = assignment(&script, QUOTES_VAR).unwrap();
        let literal = &literal["json.loads(".len()..literal.len() - 1];
        let json: String = serde_json::from_str(literal).unwrap();
        let table: Vec<(String, String)> = serde_json::from_str(&json).unwrap();
        assert_eq!(table.len(), QUOTE_REPLACEMENTS.len());
        assert_eq!(table[0].0, QUOTE_REPLACEMENTS[0].0);
    }

    #[test]
    fn test_decode_rejects_foreign_text() {
        assert!(matches!(
            decode_embedded("print('hello')"),
            Err(Error::Script(_))
        ));
        let broken = "categories_to_include = ['Title']\n";
        assert!(matches!(decode_embedded(broken), Err(Error::Script(_))));
    }

    #[test]
    fn test_escape_non_ascii() {
        assert_eq!(escape_non_ascii("\"\u{e9}\""), "\"\\u00e9\"");
        assert_eq!(escape_non_ascii("\u{1f600}"), "\\ud83d\\ude00");
    }
}
