//! Plain text rendering.

use crate::model::Element;

/// Placeholder for elements without text.
pub const NO_TEXT_PLACEHOLDER: &str = "No text available";

/// Join element texts with blank lines. Metadata is ignored.
pub fn to_text_only(elements: &[Element]) -> String {
    elements
        .iter()
        .map(element_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub(crate) fn element_text(element: &Element) -> &str {
    element.text.as_deref().unwrap_or(NO_TEXT_PLACEHOLDER)
}
