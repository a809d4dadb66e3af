//! Element-level types.

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Free-form per-element metadata, in the order the keys were read.
pub type Metadata = serde_json::Map<String, Value>;

/// Structural role of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Header,
    Title,
    NarrativeText,
    Table,
    Image,
    FigureCaption,
    ListItem,
    Address,
    Formula,
    UncategorizedText,
    Footer,
    PageBreak,
}

impl Category {
    /// Every category, in enumeration order.
    pub const ALL: [Category; 12] = [
        Category::Header,
        Category::Title,
        Category::NarrativeText,
        Category::Table,
        Category::Image,
        Category::FigureCaption,
        Category::ListItem,
        Category::Address,
        Category::Formula,
        Category::UncategorizedText,
        Category::Footer,
        Category::PageBreak,
    ];

    /// The label used in serialized element collections.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Header => "Header",
            Category::Title => "Title",
            Category::NarrativeText => "NarrativeText",
            Category::Table => "Table",
            Category::Image => "Image",
            Category::FigureCaption => "FigureCaption",
            Category::ListItem => "ListItem",
            Category::Address => "Address",
            Category::Formula => "Formula",
            Category::UncategorizedText => "UncategorizedText",
            Category::Footer => "Footer",
            Category::PageBreak => "PageBreak",
        }
    }

    /// Look up a category by its exact, case-sensitive label.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_label(s.trim()).ok_or_else(|| Error::InvalidCategory(s.to_string()))
    }
}

/// One extracted fragment of a document.
///
/// Absence is a first-class state: an element may have no recognised
/// category and no text. Elements have no identity beyond their position
/// in the collection they were loaded into.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct Element {
    /// Structural role (`type` in Unstructured output, `category` accepted too)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Arbitrary metadata fields
    pub metadata: Metadata,
}

/// Element record as written on disk, before the category key is resolved.
#[derive(Deserialize)]
struct RawElement {
    #[serde(rename = "type", default, deserialize_with = "deserialize_present")]
    kind: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_metadata")]
    metadata: Metadata,
}

impl TryFrom<RawElement> for Element {
    type Error = String;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        // A present `type` key wins over `category`, even when null
        let category = match raw.kind.or(raw.category) {
            None | Some(Value::Null) => None,
            Some(Value::String(label)) => {
                let category = Category::from_label(&label);
                if category.is_none() {
                    log::debug!("Unrecognised element category {:?}, treating as none", label);
                }
                category
            }
            Some(other) => {
                return Err(format!(
                    "expected element category to be a string, found {}",
                    other
                ))
            }
        };
        Ok(Self {
            category,
            text: raw.text,
            metadata: raw.metadata,
        })
    }
}

impl Element {
    /// Create an element of the given category with no text or metadata.
    pub fn new(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    /// Create an element with text.
    pub fn with_text(category: Category, text: impl Into<String>) -> Self {
        Self {
            category: Some(category),
            text: Some(text.into()),
            metadata: Metadata::new(),
        }
    }

    /// Add a metadata field, returning the element.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if the element carries text.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }
}

/// Keep an explicit `null` distinguishable from a missing key.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn deserialize_metadata<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Metadata>::deserialize(deserializer)?.unwrap_or_default())
}
