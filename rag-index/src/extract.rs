//! Text extraction with per-format dispatch.
//!
//! Every supported format implements the same contract: bytes on disk in,
//! UTF-8 text out. A document that cannot contribute text (unknown suffix,
//! image-only PDF, missing `pdftotext` binary) yields an empty string and is
//! silently excluded from the index; absence of text is the only failure
//! signal this stage produces.

use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::errors::RagIndexError;

/// Closed set of input formats, detected from the file suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Plain text (`.txt`), decoded as UTF-8 with replacement.
    PlainText,
    /// Markdown (`.md`), treated as plain text.
    Markdown,
    /// PDF (`.pdf`), text-layer extraction only.
    Pdf,
    /// Anything else; contributes no text.
    Unsupported,
}

impl DocumentFormat {
    /// Detect the format from the path suffix (case-insensitive).
    pub fn detect(path: &Path) -> Self {
        let suffix = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match suffix.as_deref() {
            Some("txt") => Self::PlainText,
            Some("md") => Self::Markdown,
            Some("pdf") => Self::Pdf,
            _ => Self::Unsupported,
        }
    }
}

/// Extract UTF-8 text from a document on disk.
///
/// # Errors
/// Returns `RagIndexError::Io` only when a recognized text file cannot be
/// read at all. Undecodable bytes, unsupported suffixes and unreadable PDFs
/// all degrade to an empty string instead of failing the document.
pub fn extract(path: &Path) -> Result<String, RagIndexError> {
    match DocumentFormat::detect(path) {
        DocumentFormat::PlainText | DocumentFormat::Markdown => read_text_lossy(path),
        DocumentFormat::Pdf => Ok(extract_pdf_text(path)),
        DocumentFormat::Unsupported => {
            debug!("extract: unsupported suffix, skipping {:?}", path);
            Ok(String::new())
        }
    }
}

/// Read a text file, replacing undecodable bytes rather than failing.
fn read_text_lossy(path: &Path) -> Result<String, RagIndexError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extract the text layer of a PDF via the `pdftotext` binary (poppler).
///
/// Pages are separated by form feeds in the tool's output; each one becomes
/// a newline-joined segment, so a page without a text layer contributes an
/// empty string. Any failure (missing binary, corrupt file) yields `""` and
/// the document is skipped.
fn extract_pdf_text(path: &Path) -> String {
    let output = Command::new("pdftotext")
        .arg("-enc")
        .arg("UTF-8")
        .arg(path)
        .arg("-")
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let text = String::from_utf8_lossy(&out.stdout);
            let pages: Vec<&str> = text.split('\u{c}').collect();
            debug!("extract: pdftotext produced {} page(s)", pages.len());
            pages.join("\n")
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            warn!("extract: pdftotext failed for {:?}: {}", path, stderr.trim());
            String::new()
        }
        Err(e) => {
            warn!("extract: pdftotext unavailable ({e}); skipping {:?}", path);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn detect_by_suffix() {
        assert_eq!(
            DocumentFormat::detect(Path::new("a.txt")),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::detect(Path::new("notes.MD")),
            DocumentFormat::Markdown
        );
        assert_eq!(
            DocumentFormat::detect(Path::new("paper.pdf")),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect(Path::new("image.png")),
            DocumentFormat::Unsupported
        );
        assert_eq!(
            DocumentFormat::detect(Path::new("no_suffix")),
            DocumentFormat::Unsupported
        );
    }

    #[test]
    fn plain_text_reads_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "hello world").unwrap();
        assert_eq!(extract(&path).unwrap(), "hello world");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"ok \xff\xfe bytes").unwrap();
        let text = extract(&path).unwrap();
        assert!(text.starts_with("ok "));
        assert!(text.ends_with(" bytes"));
    }

    #[test]
    fn unsupported_suffix_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.bin");
        std::fs::write(&path, b"\x00\x01\x02").unwrap();
        assert_eq!(extract(&path).unwrap(), "");
    }

    #[test]
    fn broken_pdf_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, "not a pdf at all").unwrap();
        // Whether pdftotext is installed or not, a garbage PDF must degrade
        // to empty text instead of an error.
        assert_eq!(extract(&path).unwrap(), "");
    }
}
