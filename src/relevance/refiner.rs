//! Collecting the body text beneath a ranked heading.

use crate::model::{Diagnostic, PageLayout, RankedSection, SubsectionAnalysis};

use super::ranker::HeadingShape;

/// Outcome of refining one section.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    /// The refined section (empty body if the heading was not found)
    pub analysis: SubsectionAnalysis,
    /// Set when the heading text could not be located on its page
    pub diagnostic: Option<Diagnostic>,
}

/// Extracts the text following a heading up to the next heading of equal
/// or larger size.
pub struct SubsectionRefiner {
    shape: HeadingShape,
}

impl SubsectionRefiner {
    /// Create a refiner.
    pub fn new() -> Self {
        Self {
            shape: HeadingShape::new(),
        }
    }

    /// Refine a section against the layout of its recorded page.
    pub fn refine(&self, section: &RankedSection, page: &PageLayout) -> Refinement {
        let heading = section.section_title.trim();
        match self.collect_body(heading, page) {
            Some(body) => Refinement {
                analysis: analysis(section, heading, body),
                diagnostic: None,
            },
            None => {
                let diagnostic = Diagnostic {
                    document: section.document.clone(),
                    page: Some(section.page),
                    message: format!("heading not found: '{}'", heading),
                };
                log::warn!("{}", diagnostic);
                Refinement {
                    analysis: analysis(section, heading, String::new()),
                    diagnostic: Some(diagnostic),
                }
            }
        }
    }

    /// Body text after the first span containing `heading`, or `None` if no
    /// span contains it.
    fn collect_body(&self, heading: &str, page: &PageLayout) -> Option<String> {
        let needle = heading.to_lowercase();
        let mut spans = page
            .spans()
            .map(|span| (span.text.trim(), span.font_size))
            .filter(|(text, _)| !text.is_empty());

        let (_, boundary_size) = spans
            .by_ref()
            .find(|(text, _)| text.to_lowercase().contains(&needle))?;

        let body: Vec<&str> = spans
            .take_while(|(text, size)| !(*size >= boundary_size && self.shape.is_structural(text)))
            .map(|(text, _)| text)
            .collect();

        Some(body.join(" "))
    }
}

impl Default for SubsectionRefiner {
    fn default() -> Self {
        Self::new()
    }
}

fn analysis(section: &RankedSection, heading: &str, refined_text: String) -> SubsectionAnalysis {
    SubsectionAnalysis {
        document: section.document.clone(),
        section_title: heading.to_string(),
        refined_text,
        page: section.page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, LayoutBlock, LayoutLine, TextSpan};

    fn page(spans: &[(&str, f32)]) -> PageLayout {
        let lines = spans
            .iter()
            .enumerate()
            .map(|(i, (text, size))| {
                let top = 72.0 + i as f32 * 20.0;
                let bbox = BoundingBox::new(72.0, top, 300.0, top + size);
                LayoutLine::new(vec![TextSpan::new(*text, *size, 3, bbox)])
            })
            .collect();
        let mut page = PageLayout::letter(3);
        page.add_block(LayoutBlock::new(lines));
        page
    }

    fn section(title: &str) -> RankedSection {
        RankedSection {
            document: "guide.pdf".to_string(),
            page: 3,
            section_title: title.to_string(),
            importance_rank: 1,
        }
    }

    #[test]
    fn test_collects_until_next_heading() {
        let layout = page(&[
            ("Intro text", 10.0),
            ("2. PACKING LIST", 14.0),
            ("Bring layers.", 10.0),
            ("   ", 10.0),
            ("NOTE", 10.0),
            ("Check the forecast.", 10.0),
            ("3. GETTING AROUND", 14.0),
            ("Buses run hourly.", 10.0),
        ]);
        let result = SubsectionRefiner::new().refine(&section("Packing List"), &layout);

        assert!(result.diagnostic.is_none());
        assert_eq!(result.analysis.section_title, "Packing List");
        assert_eq!(result.analysis.page, 3);
        // "NOTE" is smaller than the heading, so it does not end the body
        assert_eq!(
            result.analysis.refined_text,
            "Bring layers. NOTE Check the forecast."
        );
    }

    #[test]
    fn test_body_runs_to_page_end() {
        let layout = page(&[("Overview", 16.0), ("first", 10.0), ("second", 10.0)]);
        let result = SubsectionRefiner::new().refine(&section("overview"), &layout);
        assert_eq!(result.analysis.refined_text, "first second");
    }

    #[test]
    fn test_larger_non_structural_span_does_not_stop() {
        let layout = page(&[("Overview", 12.0), ("Big Quote", 18.0), ("tail", 10.0)]);
        let result = SubsectionRefiner::new().refine(&section("Overview"), &layout);
        assert_eq!(result.analysis.refined_text, "Big Quote tail");
    }

    #[test]
    fn test_heading_not_found() {
        let layout = page(&[("Something else", 14.0)]);
        let result = SubsectionRefiner::new().refine(&section("Missing Heading"), &layout);

        assert_eq!(result.analysis.refined_text, "");
        assert_eq!(result.analysis.section_title, "Missing Heading");
        let diagnostic = result.diagnostic.unwrap();
        assert_eq!(diagnostic.document, "guide.pdf");
        assert_eq!(diagnostic.page, Some(3));
        assert!(diagnostic.message.contains("Missing Heading"));
    }
}
