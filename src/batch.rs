//! Native batch processing.
//!
//! Applies one [`RenderConfig`] to a `.json` element file or to every
//! `.json` file in a directory, writing `<stem>_output.txt` per input. Files
//! are processed one at a time in file-name order. A failure on one file is
//! reported and does not stop the others; no output is written for it.

use crate::error::{Error, Result};
use crate::loader::load_file;
use crate::render::RenderConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix replacing the input extension in output file names.
pub const OUTPUT_SUFFIX: &str = "_output.txt";

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, in processing order
    pub written: Vec<PathBuf>,

    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Number of inputs attempted.
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    /// Check if every input succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Output file name for an input path (`doc.json` → `doc_output.txt`).
pub fn output_file_name(input: &Path) -> Option<String> {
    input
        .file_stem()
        .map(|stem| format!("{}{}", stem.to_string_lossy(), OUTPUT_SUFFIX))
}

fn is_json_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

/// List the inputs for `path`: the file itself, or the directory's `.json` files sorted by name.
pub fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry_path = entry?.path();
            if is_json_file(&entry_path) {
                files.push(entry_path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    } else if is_json_file(path) {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(Error::UnsupportedInput(path.to_path_buf()))
    }
}

/// Run the pipeline on one file and write its output.
///
/// The output is rendered completely before the file is created, so a
/// failed input leaves nothing behind.
pub fn process_file(input: &Path, output_dir: &Path, config: &RenderConfig) -> Result<PathBuf> {
    let name = output_file_name(input).ok_or_else(|| Error::UnsupportedInput(input.to_path_buf()))?;
    let elements = load_file(input)?;
    let rendered = crate::render_elements(elements, config);

    let output = output_dir.join(name);
    fs::write(&output, rendered)?;
    Ok(output)
}

/// Process a file or directory of element files into `output_dir`.
///
/// Fails only if `input` is unusable or `output_dir` cannot be created;
/// per-file failures are collected in the report.
///
/// # Example
/// ```no_run
/// use unelements::batch::process_path;
/// use unelements::RenderConfig;
/// use std::path::Path;
///
/// let report = process_path(Path::new("elements/"), Path::new("out/"), &RenderConfig::default())?;
/// println!("{} written, {} failed", report.written.len(), report.failed.len());
/// # Ok::<(), unelements::Error>(())
/// ```
pub fn process_path(input: &Path, output_dir: &Path, config: &RenderConfig) -> Result<BatchReport> {
    process_path_with(input, output_dir, config, |_, _| {})
}

/// Like [`process_path`], calling `on_file` after each input with its outcome.
pub fn process_path_with<F>(
    input: &Path,
    output_dir: &Path,
    config: &RenderConfig,
    mut on_file: F,
) -> Result<BatchReport>
where
    F: FnMut(&Path, &Result<PathBuf>),
{
    let inputs = collect_inputs(input)?;
    fs::create_dir_all(output_dir)?;
    log::debug!("Batch processing {} files into {}", inputs.len(), output_dir.display());

    let mut report = BatchReport::default();
    for file in inputs {
        let outcome = process_file(&file, output_dir, config);
        on_file(&file, &outcome);
        match outcome {
            Ok(output) => report.written.push(output),
            Err(e) => {
                log::warn!("Failed to process {}: {}", file.display(), e);
                report.failed.push((file, e.to_string()));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name(Path::new("dir/doc.json")).as_deref(),
            Some("doc_output.txt")
        );
        assert_eq!(
            output_file_name(Path::new("report.v2.json")).as_deref(),
            Some("report.v2_output.txt")
        );
        assert_eq!(output_file_name(Path::new("")), None);
    }

    #[test]
    fn test_batch_report_counts() {
        let report = BatchReport {
            written: vec![PathBuf::from("a_output.txt")],
            failed: vec![(PathBuf::from("b.json"), "bad".to_string())],
        };
        assert_eq!(report.total(), 2);
        assert!(!report.is_success());
        assert!(BatchReport::default().is_success());
    }

    #[test]
    fn test_collect_inputs_rejects_missing_path() {
        let result = collect_inputs(Path::new("/nonexistent/input.json"));
        assert!(matches!(result, Err(Error::UnsupportedInput(_))));
    }
}
