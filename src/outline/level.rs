//! Heading level assignment.
//!
//! Levels come from numbering patterns first and from the heading's font
//! size rank among all accepted headings otherwise. The rank table is built
//! once per document before any level is assigned.

use regex::Regex;

use crate::model::HeadingLevel;

use super::normalize::size_key;
use super::scorer::HeadingCandidate;

/// Distinct accepted heading sizes, largest first (0.1pt keys).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeRanks {
    keys: Vec<i32>,
}

impl SizeRanks {
    /// Build the rank table from every accepted heading of a document.
    pub fn from_candidates(candidates: &[HeadingCandidate]) -> Self {
        let mut keys: Vec<i32> = candidates.iter().map(|c| size_key(c.font_size)).collect();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys.dedup();
        Self { keys }
    }

    /// Rank of a font size (0 = largest), if it is among the accepted sizes.
    pub fn rank(&self, font_size: f32) -> Option<usize> {
        let key = size_key(font_size);
        self.keys.iter().position(|k| *k == key)
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no sizes were recorded.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Maps accepted headings to H1/H2/H3.
pub struct LevelAssigner {
    ranks: SizeRanks,
    numbered_3: Regex,
    numbered_2: Regex,
    numbered_1: Regex,
    chapter: Regex,
    roman: Regex,
}

impl LevelAssigner {
    /// Create an assigner over the document's accepted headings.
    pub fn new(candidates: &[HeadingCandidate]) -> Self {
        Self {
            ranks: SizeRanks::from_candidates(candidates),
            numbered_3: Regex::new(r"^\d+\.\d+\.\d+").unwrap(),
            numbered_2: Regex::new(r"^\d+\.\d+").unwrap(),
            numbered_1: Regex::new(r"^\d+\.").unwrap(),
            chapter: Regex::new(r"(?i)^chapter\s+\d+").unwrap(),
            roman: Regex::new(r"^[IVXLCDM]+\.").unwrap(),
        }
    }

    /// The size rank table in use.
    pub fn ranks(&self) -> &SizeRanks {
        &self.ranks
    }

    /// Level of one heading.
    pub fn level(&self, text: &str, font_size: f32) -> HeadingLevel {
        if self.numbered_3.is_match(text) {
            return HeadingLevel::H3;
        }
        if self.numbered_2.is_match(text) {
            return HeadingLevel::H2;
        }
        if self.numbered_1.is_match(text) || self.chapter.is_match(text) || self.roman.is_match(text)
        {
            return HeadingLevel::H1;
        }

        match self.ranks.rank(font_size) {
            Some(0) => HeadingLevel::H1,
            Some(1) => HeadingLevel::H2,
            Some(2) => HeadingLevel::H3,
            // deeper size ranks fold back to H2
            _ => HeadingLevel::H2,
        }
    }
}
