//! Tunable thresholds and run options.

use crate::render::JsonFormat;

/// Options for the heading detection and outline pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Maximum font size difference for two lines to merge
    pub merge_size_tolerance: f32,

    /// Maximum left-edge offset for two lines to merge
    pub merge_left_tolerance: f32,

    /// Exclusive upper bound of the vertical gap between merged lines
    pub merge_max_gap: f32,

    /// Exclusive upper bound of merged text length, in characters
    pub merge_max_chars: usize,

    /// Minimum score for a line to be accepted as a heading
    pub accept_threshold: i32,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading acceptance threshold.
    pub fn with_accept_threshold(mut self, threshold: i32) -> Self {
        self.accept_threshold = threshold;
        self
    }

    /// Set the maximum vertical gap for line merging.
    pub fn with_merge_gap(mut self, gap: f32) -> Self {
        self.merge_max_gap = gap;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            merge_size_tolerance: 0.5,
            merge_left_tolerance: 5.0,
            merge_max_gap: 12.0,
            merge_max_chars: 150,
            accept_threshold: 4,
        }
    }
}

/// Options for the relevance ranker and subsection refiner.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceOptions {
    /// Spans strictly larger than this size are heading-like
    pub heading_size: f32,

    /// Spans with more words than this are never headings
    pub max_heading_words: usize,
}

impl RelevanceOptions {
    /// Create new relevance options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute heading size threshold.
    pub fn with_heading_size(mut self, size: f32) -> Self {
        self.heading_size = size;
        self
    }
}

impl Default for RelevanceOptions {
    fn default() -> Self {
        Self {
            heading_size: 12.0,
            max_heading_words: 15,
        }
    }
}

/// Options for processing a directory of documents.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to process documents in parallel
    pub parallel: bool,

    /// Output JSON layout
    pub json_format: JsonFormat,

    /// Outline pipeline options
    pub outline: OutlineOptions,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Abort the batch on the first failing document.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the output JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Set outline pipeline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline = options;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            parallel: true,
            json_format: JsonFormat::Pretty,
            outline: OutlineOptions::default(),
        }
    }
}

/// Error handling mode for multi-document runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first document error
    #[default]
    Strict,
    /// Log the failing document and continue
    Lenient,
}
