//! Keyword extraction from a job description.

use std::collections::BTreeSet;

use regex::Regex;

use crate::model::JobDescription;

/// Words too common to carry meaning for matching.
const STOPWORDS: &[&str] = &["and", "the", "on", "for", "with", "to", "a", "of", "in"];

/// The set of lowercase tokens a heading must mention to be relevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordProfile {
    keywords: BTreeSet<String>,
}

impl KeywordProfile {
    /// Tokenize free text into a profile.
    ///
    /// Tokens are word-boundary matches, lowercased, longer than three
    /// characters and not stopwords.
    pub fn from_text(text: &str) -> Self {
        let word = Regex::new(r"\b\w+\b").unwrap();
        let lower = text.to_lowercase();
        let keywords = word
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| w.chars().count() > 3 && !STOPWORDS.contains(w))
            .map(str::to_string)
            .collect();
        Self { keywords }
    }

    /// Build a profile from already extracted keywords.
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Whether `text` contains any keyword as a substring.
    ///
    /// `text` must already be lowercase. Matching is not word-bounded, so
    /// "learn" matches inside "learning".
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// Keywords in sorted order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Check if the profile has no keywords.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl JobDescription {
    /// Parse a job description from free text.
    pub fn from_text(text: &str) -> Self {
        let description = text.trim().to_string();
        let keywords = KeywordProfile::from_text(&description)
            .keywords()
            .map(str::to_string)
            .collect();
        Self {
            description,
            keywords,
        }
    }

    /// The keyword profile derived from this job.
    pub fn profile(&self) -> KeywordProfile {
        KeywordProfile::from_keywords(&self.keywords)
    }
}
