//! Heading scoring.
//!
//! Each line earns an additive integer score from independent signals: size
//! relative to the document average, numbering patterns, shape, and
//! boilerplate/citation penalties. Lines scoring at or above the acceptance
//! threshold become heading candidates. Numbering and citation signals are
//! weighted so they can override size.

use regex::Regex;

use crate::model::BoundingBox;
use crate::options::OutlineOptions;

use super::typography::FontStatistics;
use super::Line;

/// Lowercase fragments marking captions, references and page furniture.
const BOILERPLATE_WORDS: &[&str] = &[
    "figure",
    "table",
    "chart",
    "image",
    "appendix",
    "references",
    "index",
    "www.",
    "http",
    "copyright",
    "licensed to",
    "<null>",
    "all rights reserved",
];

/// Signatures of bibliography entries and inline citations.
const CITATION_PATTERNS: &[&str] = &[
    r"\(\d{4}\)",                           // (1995)
    r"\d{4}[:\-]\s*\d+(-\d+)?",             // 1995: 273 or 1995-273
    r"\bvol\.?\s*\d+\b",                    // vol. 20
    r"\bno\.?\s*\d+\b",                     // no. 3
    r"\bpp?\.?\s*\d+(-\d+)?\b",             // p. 23 or pp. 273-297
    r"\b[A-Z]\.\s*[A-Z]\.",                 // A. M.
    r"\b\d+\s*\(\d{4}\)",                   // 59 (1950)
    r#"“[^”]{5,}”|"[^"]{5,}""#,             // "Quoted title"
    r"\b[A-Z][a-z]+,\s*[A-Z]\.([A-Z]\.)?",  // Last, F. or Last, F.M.
    r"\b[A-Z][a-z]+\s+[A-Z]\.",             // Alexey C.
    r"\bIn\s+Proceedings\b.*?\d{4}",        // In Proceedings ... 2020
    r"\(\d{4}\):\s*\d+(-\d+)?",             // (1995): 273-297
    r"\[\d+\]",                             // [1], [23]
    r"(?:^|\D)\d{4}(?:\D|$)",               // standalone four-digit number
];

/// A line accepted as a heading, before level assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Heading text
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Page number (1-indexed)
    pub page: u32,
    /// Bounding box in top-down coordinates
    pub bbox: BoundingBox,
    /// Score the line earned
    pub score: i32,
}

/// Multi-signal heading scorer.
pub struct HeadingScorer {
    threshold: i32,
    deep_numbered: Regex,
    chapter: Regex,
    roman: Regex,
    numeric_label: Regex,
    citations: Vec<Regex>,
}

impl HeadingScorer {
    /// Create a scorer from outline options.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            threshold: options.accept_threshold,
            deep_numbered: Regex::new(r"^\d+(\.\d+)+\s+\w+").unwrap(),
            chapter: Regex::new(r"(?i)^chapter\s+\d+").unwrap(),
            roman: Regex::new(r"^[IVXLCDM]+\.\s+").unwrap(),
            numeric_label: Regex::new(r"^\d+(\.\d+)*\.?$").unwrap(),
            citations: CITATION_PATTERNS
                .iter()
                .map(|p| Regex::new(p).unwrap())
                .collect(),
        }
    }

    /// Score a line against the document's average font size.
    ///
    /// Returns `None` for lines rejected outright (two or more tokens, all
    /// of them digits).
    pub fn score(&self, text: &str, font_size: f32, average_size: f32) -> Option<i32> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let digit_tokens = tokens
            .iter()
            .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
            .count();
        if digit_tokens >= 2 && digit_tokens == tokens.len() {
            return None;
        }

        let len = text.chars().count();
        let mut score = 0;

        if font_size > average_size * 1.2 {
            score += 3;
        } else if font_size > average_size * 1.1 {
            score += 2;
        } else if font_size > average_size {
            score += 1;
        }

        if self.deep_numbered.is_match(text) {
            score -= 5;
        } else if self.chapter.is_match(text) {
            score += 4;
        } else if self.roman.is_match(text) {
            score += 3;
        }

        if is_upper_shape(text) && (3..=50).contains(&len) {
            score += 2;
        }
        if tokens.len() <= 8 && !text.ends_with('.') {
            score += 1;
        }
        if len <= 100 {
            score += 1;
        }

        let lower = text.to_lowercase();
        if BOILERPLATE_WORDS.iter().any(|w| lower.contains(w)) {
            score -= 3;
        }
        if self.numeric_label.is_match(text) {
            score -= 5;
        }
        if len > 200 {
            score -= 3;
        }

        let hits = self.citation_hits(text);
        if hits >= 2 {
            score -= 6;
        } else if hits == 1 && len > 50 {
            score -= 4;
        }

        Some(score)
    }

    /// Number of citation patterns matching `text`.
    pub fn citation_hits(&self, text: &str) -> usize {
        self.citations.iter().filter(|re| re.is_match(text)).count()
    }

    /// Score a line and keep it if it reaches the acceptance threshold.
    pub fn evaluate(&self, line: &Line, stats: &FontStatistics) -> Option<HeadingCandidate> {
        let score = self.score(&line.text, line.font_size, stats.average_size)?;
        if score < self.threshold {
            return None;
        }
        Some(HeadingCandidate {
            text: line.text.clone(),
            font_size: line.font_size,
            page: line.page,
            bbox: line.bbox,
            score,
        })
    }
}

impl Default for HeadingScorer {
    fn default() -> Self {
        Self::new(&OutlineOptions::default())
    }
}

/// Whether text has at least one cased letter and no lowercase letters.
pub fn is_upper_shape(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}
