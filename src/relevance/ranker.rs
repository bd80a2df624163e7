//! Keyword-driven selection of heading-like spans.

use std::collections::HashSet;

use regex::Regex;

use crate::model::{PageLayout, RankedSection, TextSpan};
use crate::options::RelevanceOptions;
use crate::outline::is_upper_shape;

use super::keywords::KeywordProfile;

/// Span-level heading tests shared by the ranker and the refiner.
pub struct HeadingShape {
    numbered: Regex,
}

impl HeadingShape {
    /// Create the matcher.
    pub fn new() -> Self {
        Self {
            numbered: Regex::new(r"^\d+(\.\d+)*\s").unwrap(),
        }
    }

    /// Uppercase text or a numbered prefix such as "1. " or "2.3 ".
    pub fn is_structural(&self, text: &str) -> bool {
        is_upper_shape(text) || self.numbered.is_match(text)
    }
}

impl Default for HeadingShape {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects spans that look like headings and mention a keyword.
pub struct RelevanceRanker {
    profile: KeywordProfile,
    shape: HeadingShape,
    heading_size: f32,
    max_words: usize,
}

impl RelevanceRanker {
    /// Create a ranker for a keyword profile.
    pub fn new(profile: KeywordProfile, options: &RelevanceOptions) -> Self {
        Self {
            profile,
            shape: HeadingShape::new(),
            heading_size: options.heading_size,
            max_words: options.max_heading_words,
        }
    }

    /// Whether a span's trimmed text looks like a heading.
    pub fn is_heading_like(&self, text: &str, span: &TextSpan) -> bool {
        span.font_size > self.heading_size || self.shape.is_structural(text)
    }

    /// Scan one document's pages in order.
    ///
    /// Returned sections carry `importance_rank == 0`; ranks are assigned
    /// across the whole collection by [`assign_ranks`].
    pub fn rank_document(&self, document: &str, pages: &[PageLayout]) -> Vec<RankedSection> {
        let mut seen = HashSet::new();
        let mut sections = Vec::new();

        for page in pages {
            for span in page.spans() {
                let text = span.text.trim();
                if text.is_empty() || text.split_whitespace().count() > self.max_words {
                    continue;
                }
                if !self.is_heading_like(text, span) {
                    continue;
                }

                let lower = text.to_lowercase();
                if seen.contains(&lower) || !self.profile.matches(&lower) {
                    continue;
                }

                sections.push(RankedSection {
                    document: document.to_string(),
                    page: page.number,
                    section_title: text.to_string(),
                    importance_rank: 0,
                });
                seen.insert(lower);
            }
        }

        log::debug!("{}: {} relevant sections", document, sections.len());
        sections
    }
}

/// Number sections 1..N in their current order.
pub fn assign_ranks(sections: &mut [RankedSection]) {
    for (i, section) in sections.iter_mut().enumerate() {
        section.importance_rank = i as u32 + 1;
    }
}
