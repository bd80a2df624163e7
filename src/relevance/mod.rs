//! Persona-driven relevance ranking over a document collection.
//!
//! A job description is reduced to a [`KeywordProfile`]. Every document is
//! scanned span by span for heading-like text that mentions a keyword
//! ([`RelevanceRanker`]), and each hit is refined into the body text that
//! follows it on its page ([`SubsectionRefiner`]). Ranks are assigned once
//! the whole collection has been scanned, in discovery order.
//!
//! # Example
//!
//! ```no_run
//! use docoutline::relevance::{analyze_collection, load_job, load_persona};
//! use docoutline::RelevanceOptions;
//!
//! let persona = load_persona("persona.json")?;
//! let job = load_job("job.txt")?;
//! let report = analyze_collection("docs/", &persona, &job, &RelevanceOptions::default())?;
//! println!("{} relevant sections", report.extracted_sections.len());
//! # Ok::<(), docoutline::Error>(())
//! ```

mod keywords;
mod metadata;
mod ranker;
mod refiner;

pub use keywords::KeywordProfile;
pub use metadata::{document_info, infer_title, UNKNOWN_TITLE};
pub use ranker::{assign_ranks, HeadingShape, RelevanceRanker};
pub use refiner::{Refinement, SubsectionRefiner};

use std::fs;
use std::path::Path;

use crate::batch::collect_documents;
use crate::error::{Error, Result};
use crate::model::{
    CollectionMetadata, CollectionReport, Diagnostic, JobDescription, PageLayout, Persona,
};
use crate::options::RelevanceOptions;
use crate::source::{LayoutSource, PdfSource};

/// Read a persona from a JSON file.
///
/// Missing fields take their defaults; malformed JSON is rejected.
pub fn load_persona<P: AsRef<Path>>(path: P) -> Result<Persona> {
    let content = read_input(path.as_ref())?;
    let persona = serde_json::from_str(&content)?;
    Ok(persona)
}

/// Read a job description from a text file.
pub fn load_job<P: AsRef<Path>>(path: P) -> Result<JobDescription> {
    let content = read_input(path.as_ref())?;
    Ok(JobDescription::from_text(&content))
}

fn read_input(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Rank and refine every PDF in a directory.
///
/// Documents that cannot be opened are skipped with a diagnostic; a
/// missing directory is an error.
pub fn analyze_collection<P: AsRef<Path>>(
    dir: P,
    persona: &Persona,
    job: &JobDescription,
    options: &RelevanceOptions,
) -> Result<CollectionReport> {
    let dir = dir.as_ref();
    let paths = collect_documents(dir)?;
    log::info!("Analyzing {} documents in {}", paths.len(), dir.display());

    let mut diagnostics = Vec::new();
    let mut sources: Vec<(String, PdfSource)> = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = file_name(path);
        match PdfSource::open(path) {
            Ok(source) => sources.push((name, source)),
            Err(e) => {
                log::warn!("Skipping {}: {}", name, e);
                diagnostics.push(Diagnostic {
                    document: name,
                    page: None,
                    message: e.to_string(),
                });
            }
        }
    }

    let documents = sources
        .iter()
        .map(|(name, source)| (name.as_str(), source as &dyn LayoutSource));
    let mut report = analyze_sources(documents, persona, job, options);
    diagnostics.append(&mut report.diagnostics);
    report.diagnostics = diagnostics;
    Ok(report)
}

/// Rank and refine already opened documents, in the given order.
pub fn analyze_sources<'a, I>(
    documents: I,
    persona: &Persona,
    job: &JobDescription,
    options: &RelevanceOptions,
) -> CollectionReport
where
    I: IntoIterator<Item = (&'a str, &'a dyn LayoutSource)>,
{
    let ranker = RelevanceRanker::new(job.profile(), options);
    let refiner = SubsectionRefiner::new();

    let mut input_documents = Vec::new();
    let mut extracted_sections = Vec::new();
    let mut sub_section_analysis = Vec::new();
    let mut diagnostics = Vec::new();

    for (name, source) in documents {
        let loaded = document_info(name, source).and_then(|info| Ok((info, source.pages()?)));
        let (info, pages) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!("Skipping {}: {}", name, e);
                diagnostics.push(Diagnostic {
                    document: name.to_string(),
                    page: None,
                    message: e.to_string(),
                });
                continue;
            }
        };
        input_documents.push(info);

        let sections = ranker.rank_document(name, &pages);
        for section in &sections {
            let refinement = match find_page(&pages, section.page) {
                Some(page) => refiner.refine(section, page),
                None => refiner.refine(section, &PageLayout::letter(section.page)),
            };
            sub_section_analysis.push(refinement.analysis);
            diagnostics.extend(refinement.diagnostic);
        }
        log::info!("{}: {} relevant sections", name, sections.len());
        extracted_sections.extend(sections);
    }

    assign_ranks(&mut extracted_sections);

    CollectionReport {
        metadata: CollectionMetadata {
            input_documents,
            persona: persona.clone(),
            job_to_be_done: job.clone(),
            processing_timestamp: chrono::Local::now().to_rfc3339(),
        },
        extracted_sections,
        sub_section_analysis,
        diagnostics,
    }
}

fn find_page(pages: &[PageLayout], number: u32) -> Option<&PageLayout> {
    pages.iter().find(|p| p.number == number)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
