//! Format dispatch for text extraction

use crate::docx::extract_docx;
use crate::error::ExtractorError;
use crate::pdf::extract_pdf;
use std::path::Path;
use synopsis_domain::traits::TextExtractor;
use synopsis_domain::DocumentKind;

/// Extracts text from any supported document, choosing the reader by extension
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExtractor;

impl DocumentExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for DocumentExtractor {
    type Error = ExtractorError;

    fn extract_text(&self, path: &Path) -> Result<String, Self::Error> {
        match DocumentKind::from_path(path) {
            Some(DocumentKind::Pdf) => extract_pdf(path),
            Some(DocumentKind::Docx) => extract_docx(path),
            None => Err(ExtractorError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
