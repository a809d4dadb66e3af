//! Metadata projection.

use crate::model::{Element, Metadata, MetadataSelection};

/// Derive one metadata mapping per element, in element order.
///
/// An empty `fields` selection passes each element's metadata through
/// unchanged. Otherwise only the requested keys present on the element
/// are kept; absent keys are omitted, not filled in.
pub fn project(elements: &[Element], fields: &MetadataSelection) -> Vec<Metadata> {
    elements
        .iter()
        .map(|e| project_one(&e.metadata, fields))
        .collect()
}

fn project_one(metadata: &Metadata, fields: &MetadataSelection) -> Metadata {
    if fields.is_empty() {
        return metadata.clone();
    }
    fields
        .iter()
        .filter_map(|field| {
            metadata
                .get(field)
                .map(|value| (field.to_string(), value.clone()))
        })
        .collect()
}
