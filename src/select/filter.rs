//! Category filtering.

use crate::model::{CategorySelection, ElementCollection};

/// Keep only elements whose category is in `allowed`.
///
/// Order is preserved and kept elements are not modified. Elements without
/// a category are dropped, and an empty selection keeps nothing.
pub fn filter(elements: ElementCollection, allowed: &CategorySelection) -> ElementCollection {
    let before = elements.len();
    let kept: ElementCollection = elements
        .into_iter()
        .filter(|e| allowed.matches(e.category))
        .collect();
    log::debug!(
        "Category filter kept {} of {} elements ({} categories selected)",
        kept.len(),
        before,
        allowed.len()
    );
    kept
}
