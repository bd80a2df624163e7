//! Layout sources: the boundary between document parsing and the heuristics.
//!
//! The outline and relevance pipelines never touch a PDF library directly.
//! They read pages through [`LayoutSource`], which yields per page a tree of
//! blocks, lines and positioned spans. [`PdfSource`] implements it on top of
//! lopdf; [`MemorySource`] serves pre-built layouts.

mod pdf;

pub use pdf::PdfSource;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::PageLayout;

/// Abstract access to a document's page layouts.
pub trait LayoutSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Title embedded in the document metadata, if any.
    fn title(&self) -> Option<String>;

    /// Layout of a page (1-indexed).
    fn page(&self, number: u32) -> Result<PageLayout>;

    /// Layouts of all pages, in page order.
    fn pages(&self) -> Result<Vec<PageLayout>> {
        (1..=self.page_count()).map(|n| self.page(n)).collect()
    }
}

/// A layout source backed by already-extracted pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySource {
    /// Embedded title
    #[serde(default)]
    pub title: Option<String>,
    /// Pages in order; page `n` lives at index `n - 1`
    pub pages: Vec<PageLayout>,
}

impl MemorySource {
    /// Create a source from page layouts.
    pub fn new(pages: Vec<PageLayout>) -> Self {
        Self { title: None, pages }
    }

    /// Set the embedded title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl LayoutSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn page(&self, number: u32) -> Result<PageLayout> {
        if number == 0 {
            return Err(Error::PageOutOfRange(number, self.page_count()));
        }
        self.pages
            .get((number - 1) as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_pages() {
        let source = MemorySource::new(vec![PageLayout::letter(1), PageLayout::letter(2)])
            .with_title("Field Guide");

        assert_eq!(source.page_count(), 2);
        assert_eq!(source.title().as_deref(), Some("Field Guide"));
        assert_eq!(source.page(2).unwrap().number, 2);
        assert_eq!(source.pages().unwrap().len(), 2);
    }

    #[test]
    fn test_memory_source_out_of_range() {
        let source = MemorySource::new(vec![PageLayout::letter(1)]);
        assert!(matches!(source.page(0), Err(Error::PageOutOfRange(0, 1))));
        assert!(matches!(source.page(5), Err(Error::PageOutOfRange(5, 1))));
    }
}
