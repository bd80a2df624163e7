//! Positioned text spans as delivered by a layout source.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Axis-aligned bounding box in top-down page coordinates.
///
/// `y0` is the top edge and `y1` the bottom edge, so `y0 <= y1` for any
/// well-formed box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// Font style bitmask.
///
/// Bit assignments follow the common layout-engine convention
/// (superscript = 1, italic = 2, serif = 4, monospaced = 8, bold = 16).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleFlags(pub u32);

impl StyleFlags {
    /// No style bits set.
    pub const NONE: StyleFlags = StyleFlags(0);
    /// Superscript text
    pub const SUPERSCRIPT: StyleFlags = StyleFlags(1);
    /// Italic or oblique face
    pub const ITALIC: StyleFlags = StyleFlags(2);
    /// Serif face
    pub const SERIF: StyleFlags = StyleFlags(4);
    /// Monospaced face
    pub const MONOSPACED: StyleFlags = StyleFlags(8);
    /// Bold, black or heavy face
    pub const BOLD: StyleFlags = StyleFlags(16);

    /// Whether every bit of `other` is set in `self`.
    pub fn contains(self, other: StyleFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Derive style flags from a font's base name (e.g., "Helvetica-BoldOblique").
    pub fn from_font_name(name: &str) -> StyleFlags {
        let lower = name.to_lowercase();
        let mut flags = StyleFlags::NONE;
        if lower.contains("bold") || lower.contains("black") || lower.contains("heavy") {
            flags |= StyleFlags::BOLD;
        }
        if lower.contains("italic") || lower.contains("oblique") {
            flags |= StyleFlags::ITALIC;
        }
        if lower.contains("mono") || lower.contains("courier") {
            flags |= StyleFlags::MONOSPACED;
        }
        if !lower.contains("sans") && (lower.contains("serif") || lower.contains("times")) {
            flags |= StyleFlags::SERIF;
        }
        flags
    }
}

impl BitOr for StyleFlags {
    type Output = StyleFlags;

    fn bitor(self, rhs: StyleFlags) -> StyleFlags {
        StyleFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for StyleFlags {
    fn bitor_assign(&mut self, rhs: StyleFlags) {
        self.0 |= rhs.0;
    }
}

/// A single styled text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content, untrimmed
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Page number (1-indexed)
    pub page: u32,
    /// Style bitmask
    #[serde(default)]
    pub flags: StyleFlags,
    /// Bounding box in top-down coordinates
    pub bbox: BoundingBox,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            font_size,
            page,
            flags: StyleFlags::NONE,
            bbox,
        }
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }
}
