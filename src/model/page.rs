//! Page layout tree: blocks → lines → spans.

use super::TextSpan;
use serde::{Deserialize, Serialize};

/// A visual text line: spans sharing a baseline, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    /// Spans on this line
    pub spans: Vec<TextSpan>,
}

impl LayoutLine {
    /// Create a line from spans.
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }
}

/// A group of lines the layout engine considers one block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    /// Lines in this block, top to bottom
    pub lines: Vec<LayoutLine>,
}

impl LayoutBlock {
    /// Create a block from lines.
    pub fn new(lines: Vec<LayoutLine>) -> Self {
        Self { lines }
    }
}

/// A single page's layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Text blocks in reading order
    pub blocks: Vec<LayoutBlock>,
}

impl PageLayout {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: LayoutBlock) {
        self.blocks.push(block);
    }

    /// Iterate over all lines in block order.
    pub fn lines(&self) -> impl Iterator<Item = &LayoutLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// Iterate over all spans in document order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.lines().flat_map(|l| l.spans.iter())
    }

    /// Check if the page carries no spans.
    pub fn is_empty(&self) -> bool {
        self.spans().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn span(text: &str) -> TextSpan {
        TextSpan::new(text, 12.0, 1, BoundingBox::default())
    }

    #[test]
    fn test_span_order() {
        let mut page = PageLayout::letter(1);
        page.add_block(LayoutBlock::new(vec![
            LayoutLine::new(vec![span("a"), span("b")]),
            LayoutLine::new(vec![span("c")]),
        ]));
        page.add_block(LayoutBlock::new(vec![LayoutLine::new(vec![span("d")])]));

        let texts: Vec<&str> = page.spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
        assert_eq!(page.lines().count(), 3);
        assert!(!page.is_empty());
    }

    #[test]
    fn test_empty_page() {
        let page = PageLayout::letter(3);
        assert!(page.is_empty());
        assert_eq!(page.height, 792.0);
    }
}
