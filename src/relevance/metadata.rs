//! Per-document facts for the collection report.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::Result;
use crate::model::{DocumentInfo, PageLayout};
use crate::outline::size_key;
use crate::source::LayoutSource;

/// Title used when neither metadata nor the first page yields one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Collect filename, title and page count for a document.
pub fn document_info(filename: &str, source: &dyn LayoutSource) -> Result<DocumentInfo> {
    let title = match source.title().map(|t| t.trim().to_string()) {
        Some(title) if !title.is_empty() => title,
        _ if source.page_count() == 0 => UNKNOWN_TITLE.to_string(),
        _ => infer_title(&source.page(1)?),
    };

    Ok(DocumentInfo {
        filename: filename.to_string(),
        title,
        page_count: source.page_count(),
    })
}

/// Infer a title from the first page's typography.
///
/// Spans are read top to bottom. The most common size among non-empty
/// spans wins (earliest on ties), and the first run of spans within 0.5pt
/// of it is joined into the title.
pub fn infer_title(page: &PageLayout) -> String {
    let mut spans: Vec<(&str, f32, f32)> = page
        .spans()
        .map(|s| (s.text.trim(), s.font_size, s.bbox.y0))
        .collect();
    spans.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));

    let Some(common) = most_common_size(&spans) else {
        return UNKNOWN_TITLE.to_string();
    };

    let mut parts = Vec::new();
    for (text, size, _) in &spans {
        if (size - common).abs() < 0.5 && !text.is_empty() {
            parts.push(*text);
        } else if !parts.is_empty() {
            break;
        }
    }

    if parts.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        parts.join(" ").trim().to_string()
    }
}

fn most_common_size(spans: &[(&str, f32, f32)]) -> Option<f32> {
    let mut counts: HashMap<i32, (usize, usize, f32)> = HashMap::new();
    for (order, (_, size, _)) in spans.iter().filter(|s| !s.0.is_empty()).enumerate() {
        counts
            .entry(size_key(*size))
            .or_insert((0, order, *size))
            .0 += 1;
    }

    counts
        .into_values()
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(_, _, size)| size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, LayoutBlock, LayoutLine, TextSpan};
    use crate::source::MemorySource;

    fn page(spans: &[(&str, f32, f32)]) -> PageLayout {
        let lines = spans
            .iter()
            .map(|(text, size, top)| {
                let bbox = BoundingBox::new(72.0, *top, 300.0, top + size);
                LayoutLine::new(vec![TextSpan::new(*text, *size, 1, bbox)])
            })
            .collect();
        let mut page = PageLayout::letter(1);
        page.add_block(LayoutBlock::new(lines));
        page
    }

    #[test]
    fn test_embedded_title_wins() {
        let source = MemorySource::new(vec![page(&[("Body", 10.0, 100.0)])]).with_title("  Real Title ");
        let info = document_info("a.pdf", &source).unwrap();
        assert_eq!(info.title, "Real Title");
        assert_eq!(info.page_count, 1);
        assert_eq!(info.filename, "a.pdf");
    }

    #[test]
    fn test_blank_title_falls_back() {
        let source = MemorySource::new(vec![page(&[("Only Line", 10.0, 100.0)])]).with_title("  ");
        assert_eq!(document_info("a.pdf", &source).unwrap().title, "Only Line");
    }

    #[test]
    fn test_infer_title_takes_first_common_run() {
        // listed out of vertical order; sorted by top before scanning
        let layout = page(&[
            ("second body", 10.0, 140.0),
            ("Big Heading", 20.0, 60.0),
            ("first body", 10.2, 120.0),
            ("Footer", 8.0, 700.0),
            ("third body", 10.0, 160.0),
        ]);
        assert_eq!(infer_title(&layout), "first body second body third body");
    }

    #[test]
    fn test_tie_prefers_first_seen() {
        let layout = page(&[("Top", 18.0, 50.0), ("Bottom", 10.0, 90.0)]);
        assert_eq!(infer_title(&layout), "Top");
    }

    #[test]
    fn test_unknown_title() {
        assert_eq!(infer_title(&PageLayout::letter(1)), UNKNOWN_TITLE);
        let info = document_info("empty.pdf", &MemorySource::default()).unwrap();
        assert_eq!(info.title, UNKNOWN_TITLE);
        assert_eq!(info.page_count, 0);
    }
}
