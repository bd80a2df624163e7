//! JSON rendering for outlines and collection reports.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a result (an [`Outline`](crate::Outline), a
/// [`CollectionReport`](crate::CollectionReport), ...) to JSON.
///
/// Non-ASCII text is written as-is rather than escaped.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize a result and write it to `path`.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(value, format)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heading, HeadingLevel, Outline, Section};

    fn sample_outline() -> Outline {
        let mut section = Section::new("Chapter 1 Größen");
        section
            .outline
            .push(Heading::new(HeadingLevel::H1, "Einführung", 1));
        Outline::from_sections(vec![section])
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample_outline(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"documentTitle\""));
        assert!(json.contains("Einführung"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample_outline(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outline.json");
        write_json(&sample_outline(), &path, JsonFormat::Pretty).unwrap();

        let back: Outline = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, sample_outline());
    }
}
