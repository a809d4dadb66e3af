//! Rendering configuration.

use crate::model::{CategorySelection, MetadataSelection};
use serde::{Deserialize, Serialize};

/// The full set of choices driving one pipeline run.
///
/// Determines both the rendered output and the emitted batch script. Built
/// once per interaction and then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Categories to keep
    pub categories: CategorySelection,

    /// Metadata fields to project and display
    pub metadata: MetadataSelection,

    /// Apply text cleaning
    pub clean: bool,

    /// Render text only, without category headers or metadata
    pub text_only: bool,
}

impl RenderConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category selection.
    pub fn with_categories(mut self, categories: impl Into<CategorySelection>) -> Self {
        self.categories = categories.into();
        self
    }

    /// Set the metadata selection.
    pub fn with_metadata(mut self, metadata: impl Into<MetadataSelection>) -> Self {
        self.metadata = metadata.into();
        self
    }

    /// Enable or disable text cleaning.
    pub fn with_cleaning(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Enable or disable text-only rendering.
    pub fn with_text_only(mut self, text_only: bool) -> Self {
        self.text_only = text_only;
        self
    }

    /// Parse a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::Error::MalformedInput(e.to_string()))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            categories: CategorySelection::all(),
            metadata: MetadataSelection::default(),
            clean: true,
            text_only: false,
        }
    }
}

/// What a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalAction {
    /// Render the filtered elements
    #[default]
    Render,
    /// Emit the batch script reproducing the configuration
    EmitScript,
}
