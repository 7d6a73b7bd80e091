//! DOCX text extraction
//!
//! A DOCX file is a zip container; the body lives in `word/document.xml`.
//! Paragraph text is the concatenation of its `w:t` runs, with `w:tab` read
//! as a tab and `w:br` / `w:cr` as a line break.

use crate::error::ExtractorError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text in document order, newline-separated
pub fn extract_docx(path: &Path) -> Result<String, ExtractorError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExtractorError::InvalidDocument(format!(
                "{} has no {}",
                path.display(),
                DOCUMENT_PART
            )));
        }
        Err(e) => return Err(e.into()),
    }

    let text = parse_document_xml(&xml)?;
    debug!("Extracted {} chars from {}", text.chars().count(), path.display());
    Ok(text)
}

/// Collect paragraph text from a `word/document.xml` body
///
/// Paragraphs nested in text boxes come out as paragraphs of their own,
/// after the paragraph that anchors them. `mc:Fallback` bodies are skipped
/// since they repeat the matching `mc:Choice`.
pub fn parse_document_xml(xml: &str) -> Result<String, ExtractorError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    // Indices into `paragraphs` of the open paragraphs, innermost last
    let mut open: Vec<usize> = Vec::new();
    let mut run_depth = 0usize;
    let mut in_text = false;
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event()?;
        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Fallback" => skip_depth = 1,
                b"p" => {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                }
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                // Tab stops in paragraph properties are also `w:tab`; only runs count
                b"tab" if run_depth > 0 => append(&mut paragraphs, &open, "\t"),
                b"br" | b"cr" if run_depth > 0 => append(&mut paragraphs, &open, "\n"),
                b"p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(e) if in_text => {
                append(&mut paragraphs, &open, &e.unescape()?);
            }
            Event::CData(e) if in_text => {
                append(&mut paragraphs, &open, &String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    open.pop();
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

// Text outside any paragraph is dropped
fn append(paragraphs: &mut [String], open: &[usize], text: &str) {
    if let Some(paragraph) = open.last().and_then(|&i| paragraphs.get_mut(i)) {
        paragraph.push_str(text);
    }
}
