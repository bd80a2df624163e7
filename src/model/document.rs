//! Document-level outline types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used for headings seen before any section marker.
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// Document title used when an outline has no sections.
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// Heading level in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        };
        f.write_str(s)
    }
}

/// A leveled heading in a section's outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Headings grouped under one section marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section title (the marker heading's text)
    pub title: String,
    /// Headings in reading order
    pub outline: Vec<Heading>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }
}

/// Outline derived for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    /// Document title
    pub document_title: String,
    /// Sections in first-seen order
    pub sections: Vec<Section>,
}

impl Outline {
    /// Build an outline, taking the document title from the first section.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let document_title = sections
            .first()
            .map(|s| s.title.clone())
            .unwrap_or_else(|| UNTITLED_DOCUMENT.to_string());
        Self {
            document_title,
            sections,
        }
    }

    /// An outline with no sections.
    pub fn empty() -> Self {
        Self::from_sections(Vec::new())
    }

    /// Total number of headings across all sections.
    pub fn heading_count(&self) -> usize {
        self.sections.iter().map(|s| s.outline.len()).sum()
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.heading_count() == 0
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_title_from_first_section() {
        let mut first = Section::new("Chapter 1 Basics");
        first.outline.push(Heading::new(HeadingLevel::H1, "Overview", 1));
        let outline = Outline::from_sections(vec![first, Section::new("Chapter 2")]);

        assert_eq!(outline.document_title, "Chapter 1 Basics");
        assert_eq!(outline.heading_count(), 1);
    }

    #[test]
    fn test_empty_outline() {
        let outline = Outline::empty();
        assert_eq!(outline.document_title, UNTITLED_DOCUMENT);
        assert!(outline.is_empty());
    }

    #[test]
    fn test_outline_json_shape() {
        let mut section = Section::new(UNTITLED_SECTION);
        section.outline.push(Heading::new(HeadingLevel::H2, "Scope", 3));
        let outline = Outline::from_sections(vec![section]);

        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json["documentTitle"], "Untitled Section");
        assert_eq!(json["sections"][0]["title"], "Untitled Section");
        assert_eq!(json["sections"][0]["outline"][0]["level"], "H2");
        assert_eq!(json["sections"][0]["outline"][0]["text"], "Scope");
        assert_eq!(json["sections"][0]["outline"][0]["page"], 3);
    }
}
