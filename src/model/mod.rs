//! Element model types.
//!
//! This module defines the in-memory representation of a collection of
//! previously extracted document elements, and the caller-supplied
//! selections that drive filtering and projection.

mod collection;
mod element;
mod selection;

pub use collection::{ElementCollection, UNCATEGORIZED_LABEL};
pub use element::{Category, Element, Metadata};
pub use selection::{CategorySelection, MetadataSelection, COMMON_METADATA_FIELDS};
