//! Data model shared by the outline and relevance pipelines.
//!
//! Layout types ([`TextSpan`], [`PageLayout`]) describe what a layout source
//! delivers; outline types ([`Outline`], [`Section`], [`Heading`]) and
//! collection types ([`CollectionReport`] and friends) describe results.

mod collection;
mod document;
mod page;
mod span;

pub use collection::{
    CollectionMetadata, CollectionReport, Diagnostic, DocumentInfo, JobDescription, Persona,
    RankedSection, SubsectionAnalysis,
};
pub use document::{Heading, HeadingLevel, Outline, Section, UNTITLED_DOCUMENT, UNTITLED_SECTION};
pub use page::{LayoutBlock, LayoutLine, PageLayout};
pub use span::{BoundingBox, StyleFlags, TextSpan};
