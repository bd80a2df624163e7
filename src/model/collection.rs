//! Types for persona-driven analysis of a document collection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The reader on whose behalf sections are ranked.
///
/// Missing fields fall back to defaults when parsed, so a persona file only
/// needs the fields it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    /// Reader role
    #[serde(default = "default_role")]
    pub role: String,

    /// Reader specialization
    #[serde(default)]
    pub specialization: String,

    /// Areas the reader focuses on
    #[serde(default, alias = "focus_areas")]
    pub focus_areas: Vec<String>,
}

fn default_role() -> String {
    "Unknown Role".to_string()
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            role: default_role(),
            specialization: String::new(),
            focus_areas: Vec::new(),
        }
    }
}

/// The task the reader wants to accomplish, with its derived keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    /// Job text, trimmed
    pub description: String,
    /// Keyword tokens, sorted
    pub keywords: Vec<String>,
}

/// Basic facts about one input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// File name within the input directory
    pub filename: String,
    /// Embedded or inferred title
    pub title: String,
    /// Number of pages
    pub page_count: u32,
}

/// Run-level metadata of a collection report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMetadata {
    /// Documents that were read successfully
    pub input_documents: Vec<DocumentInfo>,
    /// Reader persona
    pub persona: Persona,
    /// Job to be done
    pub job_to_be_done: JobDescription,
    /// RFC 3339 processing timestamp
    pub processing_timestamp: String,
}

/// A heading-like line that matched the keyword profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSection {
    /// Source document file name
    pub document: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Heading text as it appears on the page
    pub section_title: String,
    /// 1-based position in discovery order
    pub importance_rank: u32,
}

/// Body text collected beneath a ranked section's heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsectionAnalysis {
    /// Source document file name
    pub document: String,
    /// Heading text the body belongs to
    pub section_title: String,
    /// Collected body text
    pub refined_text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

/// A non-fatal problem noticed while analyzing a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source document file name
    pub document: String,
    /// Page the problem relates to, if any
    pub page: Option<u32>,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "{} (page {}): {}", self.document, page, self.message),
            None => write!(f, "{}: {}", self.document, self.message),
        }
    }
}

/// Combined result of ranking and refining a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionReport {
    /// Run-level metadata
    pub metadata: CollectionMetadata,
    /// Ranked sections in discovery order
    pub extracted_sections: Vec<RankedSection>,
    /// Refined bodies, one per ranked section
    pub sub_section_analysis: Vec<SubsectionAnalysis>,
    /// Non-fatal problems encountered during the run
    #[serde(skip_serializing, default)]
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_defaults() {
        let persona: Persona = serde_json::from_str("{}").unwrap();
        assert_eq!(persona, Persona::default());
        assert_eq!(persona.role, "Unknown Role");
    }

    #[test]
    fn test_persona_snake_case_input() {
        let persona: Persona = serde_json::from_str(
            r#"{"role": "PhD Researcher", "focus_areas": ["graph neural networks"]}"#,
        )
        .unwrap();
        assert_eq!(persona.role, "PhD Researcher");
        assert_eq!(persona.specialization, "");
        assert_eq!(persona.focus_areas, vec!["graph neural networks"]);
    }

    #[test]
    fn test_ranked_section_json_shape() {
        let section = RankedSection {
            document: "ml.pdf".to_string(),
            page: 2,
            section_title: "Machine Learning Basics".to_string(),
            importance_rank: 1,
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["document"], "ml.pdf");
        assert_eq!(json["sectionTitle"], "Machine Learning Basics");
        assert_eq!(json["importanceRank"], 1);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic {
            document: "a.pdf".to_string(),
            page: Some(4),
            message: "heading not found".to_string(),
        };
        assert_eq!(diag.to_string(), "a.pdf (page 4): heading not found");
    }
}
