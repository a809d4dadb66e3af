//! # unelements
//!
//! Filter, clean, and re-render extracted document elements.
//!
//! Document partitioners such as Unstructured produce a JSON array of
//! elements (titles, paragraphs, tables, captions, ...), each with a
//! category, optional text, and free-form metadata. This library runs a
//! deterministic single-pass pipeline over such a collection:
//!
//! 1. **Load** the serialized collection
//! 2. **Filter** by category, preserving order
//! 3. **Clean** text (quote normalization, ASCII transliteration, whitespace)
//! 4. **Project** selected metadata fields
//! 5. **Render** plain text or annotated per-element blocks
//!
//! Alternatively it **emits** a standalone batch script that reproduces the
//! same configuration over a directory of element files.
//!
//! ## Quick Start
//!
//! ```
//! use unelements::{Category, RenderConfig, Unelements};
//!
//! fn main() -> unelements::Result<()> {
//!     let json = br#"[
//!         {"type": "Title", "text": "Hello   World", "metadata": {}},
//!         {"type": "Table", "text": "a | b"}
//!     ]"#;
//!
//!     let session = Unelements::new()
//!         .with_categories(vec![Category::Title])
//!         .load_bytes(json)?;
//!
//!     let output = session.render();
//!     assert!(output.contains("##### Title #####"));
//!     assert!(output.contains("Hello World"));
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod error;
pub mod loader;
pub mod model;
pub mod render;
pub mod script;
pub mod select;

// Re-export commonly used types
pub use batch::{process_path, BatchReport};
pub use error::{Error, Result};
pub use loader::{load_bytes, load_file, load_reader};
pub use model::{
    Category, CategorySelection, Element, ElementCollection, Metadata, MetadataSelection,
};
pub use render::{clean, render, RenderConfig, TerminalAction, TextCleaner};
pub use script::{decode_embedded, emit, EmbeddedConfig};
pub use select::{filter, project};

use std::path::Path;

/// Filter, clean, project, and render an already-loaded collection.
pub fn render_elements(elements: ElementCollection, config: &RenderConfig) -> String {
    let mut filtered = filter(elements, &config.categories);
    if config.clean {
        clean(&mut filtered);
    }
    let projected = project(filtered.as_slice(), &config.metadata);
    render(filtered.as_slice(), &projected, config)
}

/// Run one interaction over serialized elements.
///
/// With [`TerminalAction::Render`] the elements are loaded and rendered;
/// with [`TerminalAction::EmitScript`] they are still loaded (so malformed
/// input is reported) but the batch script for `config` is returned.
///
/// # Example
///
/// ```
/// use unelements::{run, RenderConfig, TerminalAction};
///
/// let json = br#"[{"type": "Title", "text": "A"}, {"type": "Footer", "text": "B"}]"#;
/// let config = RenderConfig::new().with_text_only(true);
/// let text = run(json, &config, TerminalAction::Render).unwrap();
/// assert_eq!(text, "A\n\nB");
/// ```
pub fn run(data: &[u8], config: &RenderConfig, action: TerminalAction) -> Result<String> {
    let elements = load_bytes(data)?;
    match action {
        TerminalAction::Render => Ok(render_elements(elements, config)),
        TerminalAction::EmitScript => emit(config),
    }
}

/// Render an element file with the given config.
///
/// # Example
///
/// ```no_run
/// use unelements::{render_file, RenderConfig};
///
/// let text = render_file("elements.json", &RenderConfig::default()).unwrap();
/// println!("{}", text);
/// ```
pub fn render_file<P: AsRef<Path>>(path: P, config: &RenderConfig) -> Result<String> {
    let elements = load_file(path)?;
    Ok(render_elements(elements, config))
}

/// Builder for loading elements under one render configuration.
///
/// # Example
///
/// ```no_run
/// use unelements::{Category, Unelements};
///
/// let script = Unelements::new()
///     .with_categories(vec![Category::NarrativeText])
///     .with_metadata(["page_number"])
///     .with_cleaning(false)
///     .load_file("elements.json")?
///     .script()?;
/// # Ok::<(), unelements::Error>(())
/// ```
pub struct Unelements {
    config: RenderConfig,
}

impl Unelements {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Set the categories to keep.
    pub fn with_categories(mut self, categories: impl Into<CategorySelection>) -> Self {
        self.config = self.config.with_categories(categories);
        self
    }

    /// Set the metadata fields to project and display.
    pub fn with_metadata<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_metadata(MetadataSelection::new(fields));
        self
    }

    /// Enable or disable text cleaning.
    pub fn with_cleaning(mut self, clean: bool) -> Self {
        self.config = self.config.with_cleaning(clean);
        self
    }

    /// Render text only.
    pub fn text_only(mut self, text_only: bool) -> Self {
        self.config = self.config.with_text_only(text_only);
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Load elements from bytes and run filter and cleaning.
    pub fn load_bytes(self, data: &[u8]) -> Result<Session> {
        Ok(Session::new(load_bytes(data)?, self.config))
    }

    /// Load elements from a file and run filter and cleaning.
    pub fn load_file<P: AsRef<Path>>(self, path: P) -> Result<Session> {
        Ok(Session::new(load_file(path)?, self.config))
    }
}

impl Default for Unelements {
    fn default() -> Self {
        Self::new()
    }
}

/// Filtered, cleaned elements together with the config that produced them.
pub struct Session {
    elements: ElementCollection,
    projected: Vec<Metadata>,
    config: RenderConfig,
}

impl Session {
    fn new(elements: ElementCollection, config: RenderConfig) -> Self {
        let mut elements = filter(elements, &config.categories);
        if config.clean {
            clean(&mut elements);
        }
        let projected = project(elements.as_slice(), &config.metadata);
        Self {
            elements,
            projected,
            config,
        }
    }

    /// The filtered (and, if enabled, cleaned) elements.
    pub fn elements(&self) -> &ElementCollection {
        &self.elements
    }

    /// Projected metadata, one mapping per element.
    pub fn projected_metadata(&self) -> &[Metadata] {
        &self.projected
    }

    /// Unique metadata keys across the filtered elements.
    pub fn metadata_keys(&self) -> Vec<String> {
        self.elements.metadata_keys()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the elements.
    pub fn render(&self) -> String {
        render(self.elements.as_slice(), &self.projected, &self.config)
    }

    /// Emit the batch script for this session's configuration.
    pub fn script(&self) -> Result<String> {
        emit(&self.config)
    }

    /// Produce the output selected by `action`.
    pub fn output(&self, action: TerminalAction) -> Result<String> {
        match action {
            TerminalAction::Render => Ok(self.render()),
            TerminalAction::EmitScript => self.script(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = br#"[
        {"type": "Title", "text": "Hello   World", "metadata": {}},
        {"type": "Table", "text": "Cell  one", "metadata": {"page_number": 2}}
    ]"#;

    #[test]
    fn test_builder_defaults() {
        let builder = Unelements::default();
        assert_eq!(builder.config(), &RenderConfig::default());
    }

    #[test]
    fn test_builder_chained() {
        let builder = Unelements::new()
            .with_categories(vec![Category::Table])
            .with_metadata(["page_number"])
            .with_cleaning(false)
            .text_only(true);

        let config = builder.config();
        assert_eq!(config.categories.labels(), vec!["Table"]);
        assert_eq!(config.metadata.fields(), &["page_number"]);
        assert!(!config.clean);
        assert!(config.text_only);
    }

    #[test]
    fn test_session_title_scenario() {
        let session = Unelements::new()
            .with_categories(vec![Category::Title])
            .load_bytes(SAMPLE)
            .unwrap();

        assert_eq!(session.elements().len(), 1);
        let output = session.render();
        assert!(output.contains("##### Title #####"));
        assert!(output.contains("\nSelected Metadata: None\n"));
        assert!(output.contains("\nHello World\n"));
        assert!(output.ends_with(&"-".repeat(80)));
        assert!(!output.contains("Cell"));
    }

    #[test]
    fn test_session_text_only_scenario() {
        let session = Unelements::new()
            .with_categories(vec![Category::Title, Category::Table])
            .text_only(true)
            .load_bytes(SAMPLE)
            .unwrap();
        assert_eq!(session.render(), "Hello World\n\nCell one");
    }

    #[test]
    fn test_session_projection_and_keys() {
        let session = Unelements::new().load_bytes(SAMPLE).unwrap();
        assert_eq!(session.projected_metadata().len(), 2);
        assert!(session.projected_metadata()[0].is_empty());
        assert_eq!(session.metadata_keys(), vec!["page_number"]);
    }

    #[test]
    fn test_run_emit_script() {
        let config = RenderConfig::new().with_categories(vec![Category::NarrativeText]);
        let script = run(SAMPLE, &config, TerminalAction::EmitScript).unwrap();
        let embedded = decode_embedded(&script).unwrap();
        assert_eq!(embedded.categories, vec!["NarrativeText"]);
    }

    #[test]
    fn test_run_malformed_input() {
        let result = run(b"not json", &RenderConfig::default(), TerminalAction::Render);
        assert!(matches!(result, Err(Error::MalformedInput(_))));

        let result = Unelements::new().load_bytes(br#"{"elements": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_elements_empty_selection() {
        let elements = load_bytes(SAMPLE).unwrap();
        let config = RenderConfig::new().with_categories(CategorySelection::none());
        assert_eq!(render_elements(elements, &config), "");
    }
}
