//! PDF page text extraction
//!
//! Yields one text record per page in page order. Every failure mode
//! (missing file, unparsable PDF, zero pages, zero extractable characters)
//! surfaces as `RagError::DocumentRead` so a load call is all-or-nothing.

use std::path::Path;

use lopdf::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{RagError, Result};

/// Raw text extracted from a single PDF page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number
    pub number: u32,
    /// Extracted text content (may be empty for image-only pages)
    pub text: String,
}

/// Extract page-ordered text from a PDF file
pub fn extract_pages(path: &Path) -> Result<Vec<PageText>> {
    if !path.exists() {
        return Err(RagError::DocumentRead(format!(
            "file not found: {}",
            path.display()
        )));
    }

    info!(path = %path.display(), "loading document");

    let doc = Document::load(path)
        .map_err(|e| RagError::DocumentRead(format!("{}: {}", path.display(), e)))?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Err(RagError::DocumentRead(format!(
            "no pages in document: {}",
            path.display()
        )));
    }

    let mut pages = Vec::with_capacity(page_numbers.len());
    for number in page_numbers {
        // Image-only pages extract to empty text; keep them so page
        // numbering stays aligned with the source document.
        let text = doc.extract_text(&[number]).unwrap_or_default();
        debug!(page = number, chars = text.len(), "extracted page");
        pages.push(PageText { number, text });
    }

    if pages.iter().all(|p| p.text.trim().is_empty()) {
        return Err(RagError::DocumentRead(format!(
            "no extractable text in document: {}",
            path.display()
        )));
    }

    info!(pages = pages.len(), "document loaded");
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_document_read_error() {
        let err = extract_pages(Path::new("/nonexistent/file.pdf")).unwrap_err();
        assert!(matches!(err, RagError::DocumentRead(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_unparsable_file_is_document_read_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let err = extract_pages(file.path()).unwrap_err();
        assert!(matches!(err, RagError::DocumentRead(_)));
    }
}
