//! Directory-level outline extraction.
//!
//! Every `.pdf` file of an input directory gets one JSON outline in the
//! output directory, named after the document with its extension replaced
//! by `.json`. Documents are independent: in lenient mode a failing
//! document is logged and skipped while the rest proceed.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::is_pdf_filename;
use crate::error::{Error, Result};
use crate::options::{BatchOptions, ErrorMode};
use crate::outline::OutlineExtractor;
use crate::render::write_json;
use crate::source::PdfSource;

/// A document whose outline was written.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Source document
    pub input: PathBuf,
    /// Written JSON file
    pub output: PathBuf,
    /// Number of headings in the outline
    pub headings: usize,
    /// Number of sections in the outline
    pub sections: usize,
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// Source document
    pub input: PathBuf,
    /// Error description
    pub error: String,
}

/// Outcome of a directory run, in file-name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Documents processed successfully
    pub processed: Vec<BatchEntry>,
    /// Documents that failed
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    /// Total number of documents attempted.
    pub fn total(&self) -> usize {
        self.processed.len() + self.failures.len()
    }

    /// Check if every document succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// List the PDF files of a directory, sorted by file name.
pub fn collect_documents<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::MissingInput(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_pdf_filename);
        if is_pdf && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Output path for a document: its file stem plus `.json`.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}.json", stem))
}

/// Extract outlines for every PDF in `input_dir` into `output_dir`.
pub fn process_directory<P, Q>(input_dir: P, output_dir: Q, options: &BatchOptions) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    process_directory_with_progress(input_dir, output_dir, options, |_| {})
}

/// Like [`process_directory`], calling `on_done` after each document.
///
/// With `parallel` set, `on_done` may be called from several threads.
pub fn process_directory_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&Path) + Sync,
{
    let inputs = collect_documents(input_dir.as_ref())?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    log::info!(
        "Processing {} documents from {}",
        inputs.len(),
        input_dir.as_ref().display()
    );

    let extractor = OutlineExtractor::new(options.outline.clone());
    let run = |input: &PathBuf| {
        let result = process_one(&extractor, input, output_dir, options);
        on_done(input);
        result
    };

    let results: Vec<Result<BatchEntry>> = match (options.parallel, options.error_mode) {
        (true, _) => inputs.par_iter().map(run).collect(),
        // sequential strict runs stop at the first failure
        (false, ErrorMode::Strict) => {
            let mut results = Vec::with_capacity(inputs.len());
            for input in &inputs {
                let result = run(input);
                let failed = result.is_err();
                results.push(result);
                if failed {
                    break;
                }
            }
            results
        }
        (false, ErrorMode::Lenient) => inputs.iter().map(run).collect(),
    };

    let mut summary = BatchSummary::default();
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(entry) => summary.processed.push(entry),
            Err(e) if options.error_mode == ErrorMode::Strict => {
                log::error!("Failed to process {}: {}", input.display(), e);
                return Err(e);
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", input.display(), e);
                summary.failures.push(BatchFailure {
                    input: input.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Processed {} of {} documents",
        summary.processed.len(),
        summary.total()
    );
    Ok(summary)
}

fn process_one(
    extractor: &OutlineExtractor,
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchEntry> {
    let source = PdfSource::open(input)?;
    let outline = extractor.extract(&source)?;
    let output = output_path(output_dir, input);
    write_json(&outline, &output, options.json_format)?;

    log::info!(
        "{}: {} headings in {} sections",
        input.display(),
        outline.heading_count(),
        outline.sections.len()
    );

    Ok(BatchEntry {
        input: input.to_path_buf(),
        output,
        headings: outline.heading_count(),
        sections: outline.sections.len(),
    })
}
