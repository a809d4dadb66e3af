//! Loading serialized element collections.
//!
//! The input is a JSON array of element records as produced by document
//! partitioners (Unstructured's `elements_to_json` format). Decoding happens
//! directly from memory or from a buffered file handle; no temporary files
//! are created, and the file handle is released on every return path.

use crate::error::{Error, Result};
use crate::model::ElementCollection;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load an element collection from raw bytes.
///
/// # Returns
/// * `Ok(ElementCollection)` in original document order
/// * `Err(Error::MalformedInput)` if the bytes are not a JSON array of element records
///
/// # Example
/// ```
/// use unelements::loader::load_bytes;
///
/// let elements = load_bytes(br#"[{"type": "Title", "text": "Hello"}]"#).unwrap();
/// assert_eq!(elements.len(), 1);
/// ```
pub fn load_bytes(data: &[u8]) -> Result<ElementCollection> {
    let elements: ElementCollection = serde_json::from_slice(data)?;
    log::debug!("Loaded {} elements from {} bytes", elements.len(), data.len());
    Ok(elements)
}

/// Load an element collection from a reader.
pub fn load_reader<R: Read>(reader: R) -> Result<ElementCollection> {
    let elements: ElementCollection = serde_json::from_reader(reader)?;
    log::debug!("Loaded {} elements", elements.len());
    Ok(elements)
}

/// Load an element collection from a file path.
///
/// # Example
/// ```no_run
/// use unelements::loader::load_file;
///
/// let elements = load_file("document.json").unwrap();
/// println!("Elements: {}", elements.len());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<ElementCollection> {
    let path = path.as_ref();
    let file = File::open(path)?;
    load_reader(BufReader::new(file)).map_err(|e| match e {
        Error::MalformedInput(msg) => {
            Error::MalformedInput(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}
