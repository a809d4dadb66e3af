//! Annotated per-element rendering.
//!
//! Each element becomes a block:
//!
//! ```text
//! ##### Title #####
//!
//! Metadata (Selected):
//! page_number: 1
//! filename: N/A
//!
//! Element text
//! --------------------------------------------------------------------------------
//! ```
//!
//! Blocks are separated by a blank line. When no metadata fields are
//! selected the metadata section is the single line `Selected Metadata: None`,
//! even though projection with an empty selection keeps every field.

use super::cleanup::clean_text;
use super::text::element_text;
use super::RenderConfig;
use crate::model::{Element, Metadata, MetadataSelection};
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

/// Header text for elements without a category.
pub const NO_CATEGORY_PLACEHOLDER: &str = "No category";

/// Value shown for a selected field the element does not carry.
pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";

/// Line opening the selected-metadata section.
pub const METADATA_HEADER: &str = "Metadata (Selected):";

/// Line shown instead of the metadata section when no fields are selected.
pub const NO_METADATA_LINE: &str = "Selected Metadata: None";

/// Width of the rule closing each block.
pub const RULE_WIDTH: usize = 80;

/// Render elements with their projected metadata as annotated blocks.
///
/// Elements and projections are paired in order; extra entries on either
/// side are ignored.
pub fn to_annotated(elements: &[Element], projected: &[Metadata], config: &RenderConfig) -> String {
    elements
        .iter()
        .zip(projected)
        .map(|(element, metadata)| render_block(element, metadata, config))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(element: &Element, metadata: &Metadata, config: &RenderConfig) -> String {
    let category = element
        .category
        .map(|c| c.as_str())
        .unwrap_or(NO_CATEGORY_PLACEHOLDER);

    let mut block = format!("##### {} #####\n\n", category);
    block.push_str(&metadata_section(metadata, &config.metadata));

    match (&element.text, config.clean) {
        (Some(text), true) => block.push_str(&clean_text(text)),
        _ => block.push_str(element_text(element)),
    }

    block.push('\n');
    block.push_str(&"-".repeat(RULE_WIDTH));
    block
}

fn metadata_section(metadata: &Metadata, fields: &MetadataSelection) -> String {
    if fields.is_empty() {
        return format!("{}\n\n", NO_METADATA_LINE);
    }

    let lines = fields
        .iter()
        .map(|key| {
            let value = metadata
                .get(key)
                .map(format_value)
                .unwrap_or_else(|| MISSING_FIELD_PLACEHOLDER.to_string());
            format!("{}: {}", key, value)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}\n\n", METADATA_HEADER, lines)
}

/// Format a metadata value for display: strings raw, everything else as compact JSON.
///
/// Floats use the shortest round-trip digits with a two-digit signed
/// exponent outside `1e-4..1e16` (`1e-07`, `2.5e+16`) and a trailing `.0`
/// when whole, matching the emitted script.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => {
            let mut buf = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, FloatReprFormatter);
            if other.serialize(&mut serializer).is_err() {
                return other.to_string();
            }
            String::from_utf8(buf).unwrap_or_else(|_| other.to_string())
        }
    }
}

struct FloatReprFormatter;

impl Formatter for FloatReprFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_repr(value).as_bytes())
    }
}

fn float_repr(value: f64) -> String {
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let fixed = value.to_string();
        if fixed.contains('.') {
            fixed
        } else {
            format!("{}.0", fixed)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
