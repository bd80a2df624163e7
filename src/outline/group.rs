//! Grouping leveled headings into titled sections.

use std::collections::HashMap;

use regex::Regex;

use crate::model::{Heading, Outline, Section, UNTITLED_SECTION};

/// Folds an ordered heading stream into sections.
///
/// A heading that opens with `Chapter`, `Part` or `Section` followed by a
/// word is a marker: it names the section for every heading after it and
/// is not itself part of any outline. Sections with the same title share
/// one bucket, in order of first appearance.
pub struct SectionGrouper {
    marker: Regex,
}

/// Fold state: the current section title and the sections built so far.
#[derive(Debug, Default)]
struct Accumulator {
    sections: Vec<Section>,
    index: HashMap<String, usize>,
}

impl Accumulator {
    fn push(mut self, title: &str, heading: Heading) -> Self {
        let idx = match self.index.get(title) {
            Some(idx) => *idx,
            None => {
                self.sections.push(Section::new(title));
                self.index.insert(title.to_string(), self.sections.len() - 1);
                self.sections.len() - 1
            }
        };
        self.sections[idx].outline.push(heading);
        self
    }
}

impl SectionGrouper {
    /// Create a grouper.
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"^(?i:chapter|part|section)\s+\w+").unwrap(),
        }
    }

    /// Whether a heading text is a section marker.
    pub fn is_marker(&self, text: &str) -> bool {
        self.marker.is_match(text)
    }

    /// Group headings, already in reading order, into an outline.
    pub fn group<I>(&self, headings: I) -> Outline
    where
        I: IntoIterator<Item = Heading>,
    {
        let (_, acc) = headings.into_iter().fold(
            (UNTITLED_SECTION.to_string(), Accumulator::default()),
            |(title, acc), heading| {
                if self.is_marker(&heading.text) {
                    (heading.text, acc)
                } else {
                    let acc = acc.push(&title, heading);
                    (title, acc)
                }
            },
        );

        Outline::from_sections(acc.sections)
    }
}

impl Default for SectionGrouper {
    fn default() -> Self {
        Self::new()
    }
}
