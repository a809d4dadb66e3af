//! Error types for unelements library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unelements operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, rendering, or batch processing elements.
///
/// Missing text, a missing metadata field, or a missing category on an
/// element are not errors; they are rendered with placeholders.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input cannot be decoded as an element collection.
    #[error("Malformed element collection: {0}")]
    MalformedInput(String),

    /// Batch input is neither a `.json` file nor a directory.
    #[error("Unsupported input: {} (expected a .json file or a directory)", .0.display())]
    UnsupportedInput(PathBuf),

    /// A caller-supplied category label is not part of the enumeration.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// The configuration embedded in a batch script cannot be read back.
    #[error("Script error: {0}")]
    Script(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::MalformedInput(err.to_string())
        }
    }
}
