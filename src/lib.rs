//! # docoutline
//!
//! Heading detection, outline structuring and persona-driven section
//! ranking for PDF documents.
//!
//! The library reads page layouts (positioned, styled text spans) and runs
//! two independent engines over them:
//!
//! - **Outline extraction**: scores every visual line as a heading
//!   candidate, assigns H1/H2/H3 levels and groups headings into sections
//!   under `Chapter`/`Part`/`Section` markers.
//! - **Relevance analysis**: given a reader persona and a job description,
//!   ranks keyword-bearing headings across a document collection and
//!   extracts the body text beneath each one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docoutline::{extract_outline, render};
//!
//! fn main() -> docoutline::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Multi-signal heading scoring**: size, numbering, shape and citation cues
//! - **Wrapped heading repair**: two-line headings are fused before scoring
//! - **Pluggable layout input**: anything implementing [`LayoutSource`]
//! - **Parallel batches**: Uses Rayon for directory runs

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod options;
pub mod outline;
pub mod relevance;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{process_directory, BatchEntry, BatchFailure, BatchSummary};
pub use detect::{check_pdf_file, check_pdf_header, is_pdf_filename};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, CollectionMetadata, CollectionReport, Diagnostic, DocumentInfo, Heading,
    HeadingLevel, JobDescription, LayoutBlock, LayoutLine, Outline, PageLayout, Persona,
    RankedSection, Section, StyleFlags, SubsectionAnalysis, TextSpan,
};
pub use options::{BatchOptions, ErrorMode, OutlineOptions, RelevanceOptions};
pub use outline::OutlineExtractor;
pub use relevance::analyze_collection;
pub use render::JsonFormat;
pub use source::{LayoutSource, MemorySource, PdfSource};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
///
/// # Returns
///
/// A `Result` containing the document's `Outline` or an error.
///
/// # Example
///
/// ```no_run
/// use docoutline::extract_outline;
///
/// let outline = extract_outline("document.pdf").unwrap();
/// println!("Title: {}", outline.document_title);
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    extract_outline_with_options(path, OutlineOptions::default())
}

/// Extract the outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use docoutline::{extract_outline_with_options, OutlineOptions};
///
/// let options = OutlineOptions::new().with_accept_threshold(5);
/// let outline = extract_outline_with_options("document.pdf", options).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: OutlineOptions,
) -> Result<Outline> {
    let source = PdfSource::open(path)?;
    OutlineExtractor::new(options).extract(&source)
}

/// Extract the outline of a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use docoutline::extract_outline_from_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let outline = extract_outline_from_bytes(&data).unwrap();
/// ```
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<Outline> {
    let source = PdfSource::from_bytes(data)?;
    OutlineExtractor::default().extract(&source)
}

/// Read filename, title and page count of a PDF file.
///
/// The title comes from the document metadata when present, otherwise it
/// is inferred from the first page's typography.
///
/// # Example
///
/// ```no_run
/// use docoutline::document_info;
///
/// let info = document_info("document.pdf").unwrap();
/// println!("{} ({} pages)", info.title, info.page_count);
/// ```
pub fn document_info<P: AsRef<Path>>(path: P) -> Result<DocumentInfo> {
    let path = path.as_ref();
    let source = PdfSource::open(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    relevance::document_info(&filename, &source)
}

/// Serialize an outline to JSON.
///
/// # Example
///
/// ```no_run
/// use docoutline::{extract_outline, outline_to_json, JsonFormat};
///
/// let outline = extract_outline("document.pdf").unwrap();
/// let json = outline_to_json(&outline, JsonFormat::Compact).unwrap();
/// ```
pub fn outline_to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    render::to_json(outline, format)
}
