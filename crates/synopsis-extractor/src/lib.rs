//! Synopsis Extractor
//!
//! Turns documents on disk into plain text for summarization.
//!
//! # Overview
//!
//! Two formats are supported:
//!
//! - **PDF**: text of every page, concatenated in page order
//! - **DOCX**: text of every paragraph in document order, one paragraph per line
//!
//! Documents without extractable text (for example scanned images) yield an
//! empty string rather than an error. Any other extension is rejected with
//! [`ExtractorError::UnsupportedFormat`].
//!
//! # Example Usage
//!
//! ```no_run
//! use synopsis_extractor::DocumentExtractor;
//! use synopsis_domain::traits::TextExtractor;
//! use std::path::Path;
//!
//! let extractor = DocumentExtractor::new();
//! let text = extractor.extract_text(Path::new("directives/policy.pdf")).unwrap();
//! println!("{} chars", text.chars().count());
//! ```

#![warn(missing_docs)]

mod docx;
mod error;
mod extractor;
mod pdf;


pub use docx::{extract_docx, parse_document_xml};
pub use error::ExtractorError;
pub use extractor::DocumentExtractor;
pub use pdf::extract_pdf;
