//! Document-wide font size statistics.

use std::collections::BTreeMap;

use super::normalize::size_key;
use super::Line;

/// Font size statistics for heading scoring.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Observed font sizes (0.1pt keys) with frequency
    pub size_histogram: BTreeMap<i32, usize>,
    /// Count-weighted mean of all observed sizes
    pub average_size: f32,
}

impl FontStatistics {
    /// Build statistics over every line of a document.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut stats = Self::default();
        for line in lines {
            stats.add_size(line.font_size);
        }
        stats.analyze();
        stats
    }

    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        *self.size_histogram.entry(size_key(size)).or_insert(0) += 1;
    }

    /// Recompute the average size from the histogram.
    pub fn analyze(&mut self) {
        let count: usize = self.size_histogram.values().sum();
        if count == 0 {
            self.average_size = 0.0;
            return;
        }

        let weighted: f64 = self
            .size_histogram
            .iter()
            .map(|(key, n)| *key as f64 / 10.0 * *n as f64)
            .sum();
        self.average_size = (weighted / count as f64) as f32;
    }

    /// Number of observations.
    pub fn line_count(&self) -> usize {
        self.size_histogram.values().sum()
    }
}
