//! Rendering module for turning filtered elements into readable text.

mod annotated;
mod cleanup;
mod options;
mod text;

pub use annotated::{
    format_value, to_annotated, METADATA_HEADER, MISSING_FIELD_PLACEHOLDER,
    NO_CATEGORY_PLACEHOLDER, NO_METADATA_LINE, RULE_WIDTH,
};
pub use cleanup::{
    clean, clean_text, normalize_quotes, strip_non_ascii, TextCleaner, QUOTE_REPLACEMENTS,
};
pub use options::{RenderConfig, TerminalAction};
pub use text::{to_text_only, NO_TEXT_PLACEHOLDER};

use crate::model::{Element, Metadata};

/// Render elements according to `config`.
///
/// Text-only mode ignores `projected` entirely; annotated mode pairs each
/// element with its projected metadata.
pub fn render(elements: &[Element], projected: &[Metadata], config: &RenderConfig) -> String {
    if config.text_only {
        to_text_only(elements)
    } else {
        to_annotated(elements, projected, config)
    }
}
