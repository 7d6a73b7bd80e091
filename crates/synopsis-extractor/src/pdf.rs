//! PDF text extraction

use crate::error::ExtractorError;
use std::path::Path;
use tracing::debug;

/// Extract the text of every page, in page order
///
/// Pages without a text layer contribute nothing, so an image-only PDF
/// yields an empty string.
pub fn extract_pdf(path: &Path) -> Result<String, ExtractorError> {
    let doc = lopdf::Document::load(path)?;
    if doc.is_encrypted() {
        return Err(ExtractorError::Encrypted);
    }

    let pages = doc.get_pages();
    let mut text = String::new();
    // get_pages is keyed by 1-based page number, so iteration is page order
    for page_number in pages.keys() {
        let page_text = doc.extract_text(&[*page_number])?;
        text.push_str(&page_text);
    }

    debug!(
        "Extracted {} chars from {} page(s) of {}",
        text.chars().count(),
        pages.len(),
        path.display()
    );
    Ok(text)
}
