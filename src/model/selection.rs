//! Caller-supplied selections of categories and metadata fields.

use super::Category;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The categories to keep.
///
/// Ordered and duplicate-free. The empty selection is legal and keeps
/// nothing. The default selects every category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategorySelection(Vec<Category>);

impl CategorySelection {
    /// Select the given categories, dropping repeats.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut selected = Vec::new();
        for category in categories {
            if !selected.contains(&category) {
                selected.push(category);
            }
        }
        Self(selected)
    }

    /// Select every category.
    pub fn all() -> Self {
        Self(Category::ALL.to_vec())
    }

    /// Select nothing.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Parse category labels, failing on the first unknown one.
    pub fn parse<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let categories = labels
            .into_iter()
            .map(|label| label.as_ref().parse::<Category>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(categories))
    }

    /// Check whether an element category matches.
    ///
    /// An element without a category never matches.
    pub fn matches(&self, category: Option<Category>) -> bool {
        category.is_some_and(|c| self.0.contains(&c))
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }

    /// The selected labels, in selection order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(Category::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Vec<Category>> for CategorySelection {
    fn from(categories: Vec<Category>) -> Self {
        Self::new(categories)
    }
}

impl From<CategorySelection> for Vec<Category> {
    fn from(selection: CategorySelection) -> Self {
        selection.0
    }
}

/// The metadata fields to project and display.
///
/// Ordered and duplicate-free. Empty means "project every field" to the
/// projector but "display none" to the annotated renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct MetadataSelection(Vec<String>);

impl MetadataSelection {
    /// Select the given fields, dropping repeats.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !selected.contains(&field) {
                selected.push(field);
            }
        }
        Self(selected)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for MetadataSelection {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl From<MetadataSelection> for Vec<String> {
    fn from(selection: MetadataSelection) -> Self {
        selection.0
    }
}

/// Metadata fields commonly found in Unstructured output, offered as suggestions.
pub const COMMON_METADATA_FIELDS: [&str; 8] = [
    "filename",
    "filetype",
    "page_number",
    "coordinates",
    "parent_id",
    "category_depth",
    "languages",
    "emphasized_text_contents",
];
