//! Input validation: PDF header sniffing and file-name filtering.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_LEN: usize = 8; // e.g., "%PDF-1.7"

/// Verify that `path` exists and starts with a PDF header.
///
/// Returns [`Error::MissingInput`] when the file is absent and
/// [`Error::UnknownFormat`] when the header is not `%PDF-x.y`.
pub fn check_pdf_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }

    let mut header = [0u8; HEADER_LEN];
    let mut file = File::open(path)?;
    let read = file.read(&mut header)?;
    check_pdf_header(&header[..read])
}

/// Verify that a byte buffer starts with a `%PDF-x.y` header.
pub fn check_pdf_header(data: &[u8]) -> Result<()> {
    if data.len() < HEADER_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = &data[PDF_MAGIC.len()..HEADER_LEN];
    if version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit() {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Whether a file name carries a `.pdf` extension (case-insensitive).
pub fn is_pdf_filename(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_header() {
        assert!(check_pdf_header(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").is_ok());
        assert!(check_pdf_header(b"%PDF-2.0\n").is_ok());
    }

    #[test]
    fn test_invalid_header() {
        assert!(matches!(
            check_pdf_header(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(check_pdf_header(b"%PDF"), Err(Error::UnknownFormat)));
        assert!(matches!(
            check_pdf_header(b"%PDF-x.y "),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = check_pdf_file("definitely/not/here.pdf");
        assert!(matches!(result, Err(Error::MissingInput(_))));
    }

    #[test]
    fn test_pdf_filename() {
        assert!(is_pdf_filename("report.pdf"));
        assert!(is_pdf_filename("REPORT.PDF"));
        assert!(!is_pdf_filename("notes.txt"));
        assert!(!is_pdf_filename("pdf"));
    }
}
