//! Fusing wrapped headings that span two visual lines.

use crate::options::OutlineOptions;

use super::Line;

/// Greedy single-pass line merger.
#[derive(Debug, Clone)]
pub struct LineMerger {
    size_tolerance: f32,
    left_tolerance: f32,
    max_gap: f32,
    max_chars: usize,
}

impl LineMerger {
    /// Create a merger from outline options.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            size_tolerance: options.merge_size_tolerance,
            left_tolerance: options.merge_left_tolerance,
            max_gap: options.merge_max_gap,
            max_chars: options.merge_max_chars,
        }
    }

    /// Whether `b` continues `a` as the second line of a wrapped heading.
    ///
    /// Merge products are never merged again, which keeps the pass
    /// idempotent and rules out three-line cascades.
    pub fn can_merge(&self, a: &Line, b: &Line) -> bool {
        if a.merged || b.merged || a.page != b.page {
            return false;
        }
        let gap = b.bbox.y0 - a.bbox.y1;
        (a.font_size - b.font_size).abs() < self.size_tolerance
            && (a.bbox.x0 - b.bbox.x0).abs() < self.left_tolerance
            && gap > 0.0
            && gap < self.max_gap
            && a.char_len() + 1 + b.char_len() < self.max_chars
    }

    /// Scan left to right, fusing each mergeable adjacent pair and skipping
    /// past both members.
    pub fn merge(&self, lines: Vec<Line>) -> Vec<Line> {
        let mut merged = Vec::with_capacity(lines.len());
        let mut iter = lines.into_iter().peekable();

        while let Some(a) = iter.next() {
            match iter.next_if(|b| self.can_merge(&a, b)) {
                Some(b) => merged.push(fuse(a, b)),
                None => merged.push(a),
            }
        }

        merged
    }
}

fn fuse(a: Line, b: Line) -> Line {
    Line {
        text: format!("{} {}", a.text, b.text),
        font_size: a.font_size,
        page: a.page,
        flags: a.flags | b.flags,
        bbox: a.bbox.union(&b.bbox),
        merged: true,
    }
}
