//! Document module - supported document formats

use std::path::Path;

/// File extensions Synopsis can extract text from (lowercase, without dot)
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

/// Format of a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,

    /// Office Open XML word-processing document
    Docx,
}

impl DocumentKind {
    /// Detect the format from a path's extension, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Self::from_extension(extension)
    }

    /// Detect the format from a bare extension, ignoring case
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Canonical extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}
