//! Heading detection and outline structuring.
//!
//! The pipeline runs per document:
//!
//! 1. [`normalize`] collapses layout lines into [`Line`] records
//! 2. [`LineMerger`] fuses headings wrapped across two lines
//! 3. [`FontStatistics`] profiles the document's font sizes
//! 4. [`HeadingScorer`] accepts lines scoring at or above the threshold
//! 5. [`LevelAssigner`] maps accepted headings to H1/H2/H3
//! 6. [`SectionGrouper`] folds headings into titled sections

mod group;
mod level;
mod merge;
mod normalize;
mod scorer;
mod typography;

pub use group::SectionGrouper;
pub use level::{LevelAssigner, SizeRanks};
pub use merge::LineMerger;
pub use normalize::{normalize_document, normalize_page, round_size, size_key, Line};
pub use scorer::{is_upper_shape, HeadingCandidate, HeadingScorer};
pub use typography::FontStatistics;

use std::cmp::Ordering;

use crate::error::Result;
use crate::model::{Heading, Outline, PageLayout};
use crate::options::OutlineOptions;
use crate::source::LayoutSource;

/// Builds an [`Outline`] from a document's page layouts.
pub struct OutlineExtractor {
    merger: LineMerger,
    scorer: HeadingScorer,
    grouper: SectionGrouper,
}

impl OutlineExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self {
            merger: LineMerger::new(&options),
            scorer: HeadingScorer::new(&options),
            grouper: SectionGrouper::new(),
        }
    }

    /// Read every page of `source` and build its outline.
    pub fn extract(&self, source: &dyn LayoutSource) -> Result<Outline> {
        let pages = source.pages()?;
        Ok(self.extract_pages(&pages))
    }

    /// Build an outline from page layouts.
    pub fn extract_pages(&self, pages: &[PageLayout]) -> Outline {
        let lines = normalize_document(pages);
        if lines.is_empty() {
            log::debug!("No text lines found, returning empty outline");
            return Outline::empty();
        }

        let normalized = lines.len();
        let lines = self.merger.merge(lines);
        log::debug!("Normalized {} lines, {} after merging", normalized, lines.len());

        let stats = FontStatistics::from_lines(&lines);
        log::debug!(
            "Average font size {:.2} over {} lines, {} distinct sizes",
            stats.average_size,
            stats.line_count(),
            stats.size_histogram.len()
        );

        let mut candidates: Vec<HeadingCandidate> = lines
            .iter()
            .filter_map(|line| self.scorer.evaluate(line, &stats))
            .collect();
        candidates.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then(a.bbox.y0.partial_cmp(&b.bbox.y0).unwrap_or(Ordering::Equal))
        });
        log::debug!("Accepted {} heading candidates", candidates.len());

        // Rank table over the full accepted set before any level is assigned
        let levels = LevelAssigner::new(&candidates);
        let headings = candidates.into_iter().map(|c| {
            let level = levels.level(&c.text, c.font_size);
            Heading::new(level, c.text, c.page)
        });

        let outline = self.grouper.group(headings);
        log::debug!(
            "Grouped {} headings into {} sections",
            outline.heading_count(),
            outline.sections.len()
        );
        outline
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new(OutlineOptions::default())
    }
}
