//! Ordered element collections.

use super::{Category, Element};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Label used when counting elements that have no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// An ordered sequence of elements in original document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementCollection {
    elements: Vec<Element>,
}

impl ElementCollection {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get an element by position.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn as_mut_slice(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Count elements per category, in first-seen order.
    ///
    /// Elements without a category are counted under `None`.
    pub fn category_counts(&self) -> Vec<(Option<Category>, usize)> {
        let mut counts: Vec<(Option<Category>, usize)> = Vec::new();
        for element in &self.elements {
            match counts.iter_mut().find(|(c, _)| *c == element.category) {
                Some((_, count)) => *count += 1,
                None => counts.push((element.category, 1)),
            }
        }
        counts
    }

    /// Unique metadata keys across all elements, sorted.
    pub fn metadata_keys(&self) -> Vec<String> {
        self.elements
            .iter()
            .flat_map(|e| e.metadata.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<Vec<Element>> for ElementCollection {
    fn from(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

impl FromIterator<Element> for ElementCollection {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ElementCollection {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElementCollection {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl AsRef<[Element]> for ElementCollection {
    fn as_ref(&self) -> &[Element] {
        &self.elements
    }
}
