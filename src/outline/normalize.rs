//! Span normalization: one record per visual line.

use crate::model::{BoundingBox, PageLayout, StyleFlags};

/// A visual line, possibly fused with the line below it.
///
/// Produced by [`normalize_page`] with `merged == false`; the line merger
/// sets `merged` on the records it fuses.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Trimmed line text
    pub text: String,
    /// Mean span font size, rounded to 0.1pt
    pub font_size: f32,
    /// Page number (1-indexed)
    pub page: u32,
    /// Union of span style flags
    pub flags: StyleFlags,
    /// Union of span bounding boxes
    pub bbox: BoundingBox,
    /// Whether this record is the product of a merge
    pub merged: bool,
}

impl Line {
    /// Create an unmerged line.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            font_size,
            page,
            flags: StyleFlags::NONE,
            bbox,
            merged: false,
        }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Collapse each layout line of a page into a [`Line`].
///
/// Span texts are concatenated without a separator; lines whose text is
/// blank after trimming are dropped.
pub fn normalize_page(page: &PageLayout) -> Vec<Line> {
    page.lines()
        .filter_map(|layout_line| {
            let spans = &layout_line.spans;
            let first = spans.first()?;

            let mut text = String::new();
            let mut size_sum = 0.0f32;
            let mut flags = StyleFlags::NONE;
            let mut bbox = first.bbox;
            for span in spans {
                text.push_str(&span.text);
                size_sum += span.font_size;
                flags |= span.flags;
                bbox = bbox.union(&span.bbox);
            }

            let text = text.trim();
            if text.is_empty() {
                return None;
            }

            Some(Line {
                text: text.to_string(),
                font_size: round_size(size_sum / spans.len() as f32),
                page: page.number,
                flags,
                bbox,
                merged: false,
            })
        })
        .collect()
}

/// Normalize every page of a document, in page order.
pub fn normalize_document(pages: &[PageLayout]) -> Vec<Line> {
    pages.iter().flat_map(normalize_page).collect()
}

/// Round a font size to 0.1pt.
pub fn round_size(size: f32) -> f32 {
    (size * 10.0).round() / 10.0
}

/// Integer key of a font size at 0.1pt precision, for exact comparisons.
pub fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LayoutBlock, LayoutLine, TextSpan};

    fn span(text: &str, size: f32, bbox: BoundingBox, flags: StyleFlags) -> TextSpan {
        TextSpan::new(text, size, 2, bbox).with_flags(flags)
    }

    #[test]
    fn test_normalize_line() {
        let mut page = PageLayout::letter(2);
        page.add_block(LayoutBlock::new(vec![LayoutLine::new(vec![
            span(
                "  Intro",
                12.0,
                BoundingBox::new(72.0, 100.0, 110.0, 112.0),
                StyleFlags::BOLD,
            ),
            span(
                "duction ",
                13.0,
                BoundingBox::new(110.0, 99.0, 160.0, 113.0),
                StyleFlags::ITALIC,
            ),
        ])]));

        let lines = normalize_page(&page);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.text, "Introduction");
        assert_eq!(line.font_size, 12.5);
        assert_eq!(line.page, 2);
        assert_eq!(line.flags, StyleFlags::BOLD | StyleFlags::ITALIC);
        assert_eq!(line.bbox, BoundingBox::new(72.0, 99.0, 160.0, 113.0));
        assert!(!line.merged);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let mut page = PageLayout::letter(1);
        page.add_block(LayoutBlock::new(vec![
            LayoutLine::new(vec![span("   ", 12.0, BoundingBox::default(), StyleFlags::NONE)]),
            LayoutLine::new(vec![]),
            LayoutLine::new(vec![span("Body", 12.0, BoundingBox::default(), StyleFlags::NONE)]),
        ]));

        let lines = normalize_page(&page);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Body");
    }

    #[test]
    fn test_size_rounding() {
        assert_eq!(round_size(11.96), 12.0);
        assert_eq!(round_size(10.04), 10.0);
        assert_eq!(size_key(14.0), 140);
        assert_eq!(size_key(13.99999), 140);
    }
}
