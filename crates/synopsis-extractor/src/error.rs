//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during text extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File extension is not a supported document format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// PDF could not be parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// PDF requires a password
    #[error("PDF is password protected")]
    Encrypted,

    /// DOCX container could not be opened
    #[error("DOCX archive error: {0}")]
    Archive(String),

    /// DOCX body is not well-formed XML
    #[error("XML parse error: {0}")]
    Xml(String),

    /// Container is readable but lacks required parts
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl From<lopdf::Error> for ExtractorError {
    fn from(e: lopdf::Error) -> Self {
        ExtractorError::Pdf(e.to_string())
    }
}

impl From<zip::result::ZipError> for ExtractorError {
    fn from(e: zip::result::ZipError) -> Self {
        ExtractorError::Archive(e.to_string())
    }
}

impl From<quick_xml::Error> for ExtractorError {
    fn from(e: quick_xml::Error) -> Self {
        ExtractorError::Xml(e.to_string())
    }
}
