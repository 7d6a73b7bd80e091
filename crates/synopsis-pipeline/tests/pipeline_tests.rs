//! End-to-end tests of the pipeline against a CSV ledger on disk

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use synopsis_domain::traits::{LedgerStore, TextExtractor};
use synopsis_domain::{Ledger, Row, PLACEHOLDER_SUMMARY};
use synopsis_extractor::DocumentExtractor;
use synopsis_ledger::CsvLedgerStore;
use synopsis_llm::MockProvider;
use synopsis_pipeline::{
    InitOutcome, LedgerInitializer, Pipeline, PipelineConfig, PipelineError,
};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Serves text by file name so tests need no real documents
struct FakeExtractor {
    texts: HashMap<String, String>,
}

impl FakeExtractor {
    fn new(texts: &[(&str, String)]) -> Self {
        Self {
            texts: texts
                .iter()
                .map(|(name, text)| (name.to_string(), text.clone()))
                .collect(),
        }
    }
}

impl TextExtractor for FakeExtractor {
    type Error = String;

    fn extract_text(&self, path: &Path) -> Result<String, Self::Error> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        self.texts
            .get(name)
            .cloned()
            .ok_or_else(|| format!("no text for {}", name))
    }
}

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"stub").unwrap();
    }
}

fn store_in(dir: &TempDir) -> CsvLedgerStore {
    CsvLedgerStore::new(dir.path().join("summaries.csv"))
}

fn file_names(store: &CsvLedgerStore) -> Vec<String> {
    store
        .load()
        .unwrap()
        .iter()
        .map(|row| row.file.clone())
        .collect()
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut zip = ZipWriter::new(File::create(path).unwrap());
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

#[test]
fn test_initializer_lists_only_supported_files() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf", "b.docx", "c.txt"]);
    fs::create_dir(dir.path().join("nested.pdf")).unwrap();
    let store = store_in(&dir);

    let outcome = LedgerInitializer::new(dir.path())
        .create_if_missing(&store)
        .unwrap();

    assert_eq!(outcome, InitOutcome::Created { rows: 2 });
    assert_eq!(file_names(&store), vec!["a.pdf", "b.docx"]);
    assert!(store.load().unwrap().iter().all(Row::is_pending));
}

#[test]
fn test_initializer_matches_extensions_case_insensitively() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["REPORT.PDF", "notes.Docx", "image.png"]);

    let files = LedgerInitializer::new(dir.path()).scan().unwrap();

    assert_eq!(files, vec!["REPORT.PDF", "notes.Docx"]);
}

#[test]
fn test_initializer_empty_directory_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let outcome = LedgerInitializer::new(dir.path())
        .create_if_missing(&store)
        .unwrap();

    assert_eq!(outcome, InitOutcome::Created { rows: 0 });
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "file,summary\n");
}

#[test]
fn test_initializer_keeps_existing_ledger() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf", "b.pdf"]);
    let store = store_in(&dir);
    store
        .save(&Ledger::from_rows(vec![Row::with_summary("a.pdf", "Done")]).unwrap())
        .unwrap();
    let before = fs::read(store.path()).unwrap();

    let outcome = LedgerInitializer::new(dir.path())
        .create_if_missing(&store)
        .unwrap();

    assert_eq!(outcome, InitOutcome::Existing);
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_initializer_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nowhere");
    let store = CsvLedgerStore::new(dir.path().join("summaries.csv"));

    let result = LedgerInitializer::new(&missing).create_if_missing(&store);

    assert!(matches!(result, Err(PipelineError::Scan { ref path, .. }) if path == &missing));
    assert!(!store.exists());
}

#[test]
fn test_end_to_end_two_documents() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["doc1.pdf", "doc2.docx"]);
    let short = "s".repeat(50);
    let long = "l".repeat(2000);
    let extractor = FakeExtractor::new(&[("doc1.pdf", short.clone()), ("doc2.docx", long)]);

    let mut provider = MockProvider::new("unused");
    provider.add_response("sss", "Short summary");
    provider.add_response("lll", "Long summary");
    let store = store_in(&dir);

    let pipeline = Pipeline::new(
        provider.clone(),
        extractor,
        dir.path(),
        PipelineConfig::default(),
    );
    let outcome = pipeline.run(&store).unwrap();

    assert_eq!(outcome.init, InitOutcome::Created { rows: 2 });
    assert_eq!(outcome.report.summarized, 2);

    let prompts = provider.user_prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], format!("Please summarize this document: \n\n{}", short));
    assert_eq!(
        prompts[1],
        format!("Please summarize this document: \n\n{}...", "l".repeat(1000))
    );

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "file,summary\ndoc1.pdf,Short summary\ndoc2.docx,Long summary\n"
    );
}

#[test]
fn test_second_run_is_idempotent() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf", "b.pdf"]);
    let extractor = FakeExtractor::new(&[("a.pdf", "a".into()), ("b.pdf", "b".into())]);
    let provider = MockProvider::new("Summary, with a comma");
    let store = store_in(&dir);
    let pipeline = Pipeline::new(
        provider.clone(),
        extractor,
        dir.path(),
        PipelineConfig::default(),
    );

    pipeline.run(&store).unwrap();
    let before = fs::read(store.path()).unwrap();
    provider.reset_call_count();

    let outcome = pipeline.run(&store).unwrap();

    assert_eq!(provider.call_count(), 0);
    assert_eq!(outcome.report.saves, 0);
    assert!(outcome.added.is_empty());
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_missing_file_stays_pending_without_call() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["kept.pdf"]);
    let store = store_in(&dir);
    store
        .save(&Ledger::from_files(["vanished.pdf", "kept.pdf"]).unwrap())
        .unwrap();
    let provider = MockProvider::new("Summary");
    let pipeline = Pipeline::new(
        provider.clone(),
        FakeExtractor::new(&[("kept.pdf", "text".into())]),
        dir.path(),
        PipelineConfig::default(),
    );

    let outcome = pipeline.run(&store).unwrap();

    assert_eq!(outcome.report.missing, vec![dir.path().join("vanished.pdf")]);
    assert_eq!(provider.call_count(), 1);
    let ledger = store.load().unwrap();
    assert!(ledger.rows()[0].is_pending());
    assert_eq!(ledger.rows()[1].summary.as_deref(), Some("Summary"));
}

#[test]
fn test_empty_reply_stores_placeholder() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["blank.pdf"]);
    let store = store_in(&dir);
    let pipeline = Pipeline::new(
        MockProvider::empty(),
        FakeExtractor::new(&[("blank.pdf", String::new())]),
        dir.path(),
        PipelineConfig::default(),
    );

    let outcome = pipeline.run(&store).unwrap();

    assert_eq!(outcome.report.placeholders, 1);
    let ledger = store.load().unwrap();
    assert_eq!(ledger.rows()[0].summary.as_deref(), Some(PLACEHOLDER_SUMMARY));
    assert_eq!(ledger.stats().placeholders, 1);
}

#[test]
fn test_failed_rows_are_retried_next_run() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf", "b.pdf"]);
    let store = store_in(&dir);
    let extractor = FakeExtractor::new(&[("a.pdf", "alpha".into()), ("b.pdf", "beta".into())]);

    let mut flaky = MockProvider::new("Summary");
    flaky.add_error("alpha");
    Pipeline::new(flaky, extractor, dir.path(), PipelineConfig::default())
        .run(&store)
        .unwrap();
    assert!(store.load().unwrap().rows()[0].is_pending());

    let healthy = MockProvider::new("Recovered");
    let extractor = FakeExtractor::new(&[("a.pdf", "alpha".into()), ("b.pdf", "beta".into())]);
    let outcome = Pipeline::new(healthy.clone(), extractor, dir.path(), PipelineConfig::default())
        .run(&store)
        .unwrap();

    assert_eq!(healthy.call_count(), 1);
    assert!(outcome.report.is_clean());
    let ledger = store.load().unwrap();
    assert_eq!(ledger.rows()[0].summary.as_deref(), Some("Recovered"));
    assert_eq!(ledger.rows()[1].summary.as_deref(), Some("Summary"));
}

#[test]
fn test_rescan_appends_new_files() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf"]);
    let store = store_in(&dir);
    store
        .save(&Ledger::from_rows(vec![Row::with_summary("a.pdf", "Done")]).unwrap())
        .unwrap();
    touch(dir.path(), &["c.docx", "b.pdf"]);

    let pipeline = Pipeline::new(
        MockProvider::new("Fresh"),
        FakeExtractor::new(&[("b.pdf", "b".into()), ("c.docx", "c".into())]),
        dir.path(),
        PipelineConfig::default(),
    );
    let outcome = pipeline.run(&store).unwrap();

    assert_eq!(outcome.init, InitOutcome::Existing);
    assert_eq!(outcome.added, vec!["b.pdf", "c.docx"]);
    assert_eq!(file_names(&store), vec!["a.pdf", "b.pdf", "c.docx"]);
    assert_eq!(store.load().unwrap().rows()[0].summary.as_deref(), Some("Done"));
    assert_eq!(outcome.report.summarized, 2);
}

#[test]
fn test_rescan_disabled_ignores_new_files() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf"]);
    let store = store_in(&dir);
    store.save(&Ledger::from_files(["a.pdf"]).unwrap()).unwrap();
    touch(dir.path(), &["b.pdf"]);

    let provider = MockProvider::new("Summary");
    let pipeline = Pipeline::new(
        provider.clone(),
        FakeExtractor::new(&[("a.pdf", "a".into()), ("b.pdf", "b".into())]),
        dir.path(),
        PipelineConfig::legacy(),
    );
    let outcome = pipeline.run(&store).unwrap();

    assert!(outcome.added.is_empty());
    assert_eq!(file_names(&store), vec!["a.pdf"]);
    assert_eq!(provider.call_count(), 1);
    assert_eq!(outcome.report.saves, 1);
}

#[test]
fn test_preview_writes_nothing() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf", "b.docx"]);
    let store = store_in(&dir);
    let provider = MockProvider::new("Summary");
    let pipeline = Pipeline::new(
        provider.clone(),
        FakeExtractor::new(&[]),
        dir.path(),
        PipelineConfig::default(),
    );

    assert_eq!(pipeline.preview(&store).unwrap(), vec!["a.pdf", "b.docx"]);
    assert!(!store.exists());

    store
        .save(&Ledger::from_rows(vec![Row::with_summary("a.pdf", "Done")]).unwrap())
        .unwrap();
    let before = fs::read(store.path()).unwrap();
    assert_eq!(pipeline.preview(&store).unwrap(), vec!["b.docx"]);
    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_invalid_config_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf"]);
    let store = store_in(&dir);
    let config = PipelineConfig {
        char_budget: 0,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(MockProvider::default(), FakeExtractor::new(&[]), dir.path(), config);

    assert!(matches!(pipeline.run(&store), Err(PipelineError::Config(_))));
    assert!(!store.exists());
}

#[test]
fn test_malformed_ledger_is_fatal() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf"]);
    let store = store_in(&dir);
    fs::write(store.path(), "name,text\na.pdf,\n").unwrap();
    let provider = MockProvider::default();
    let pipeline = Pipeline::new(
        provider.clone(),
        FakeExtractor::new(&[("a.pdf", "a".into())]),
        dir.path(),
        PipelineConfig::default(),
    );

    assert!(matches!(pipeline.run(&store), Err(PipelineError::Store(_))));
    assert_eq!(provider.call_count(), 0);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "name,text\na.pdf,\n");
}

#[test]
fn test_real_docx_through_document_extractor() {
    let dir = TempDir::new().unwrap();
    write_docx(
        &dir.path().join("memo.docx"),
        &["Budget approved.", "Hiring paused."],
    );
    touch(dir.path(), &["notes.txt"]);
    let store = store_in(&dir);
    let provider = MockProvider::new("A memo about budget and hiring.");

    let outcome = Pipeline::new(
        provider.clone(),
        DocumentExtractor::new(),
        dir.path(),
        PipelineConfig::default(),
    )
    .run(&store)
    .unwrap();

    assert!(outcome.report.is_clean());
    assert_eq!(
        provider.user_prompts(),
        vec!["Please summarize this document: \n\nBudget approved.\nHiring paused.".to_string()]
    );
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "file,summary\nmemo.docx,A memo about budget and hiring.\n"
    );
}

#[test]
fn test_checkpoint_persists_each_completed_row() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["a.pdf", "b.pdf"]);
    let store = store_in(&dir);
    store.save(&Ledger::from_files(["a.pdf", "b.pdf"]).unwrap()).unwrap();

    // b.pdf fails extraction, so a.pdf must already be on disk afterwards
    let pipeline = Pipeline::new(
        MockProvider::new("Saved"),
        FakeExtractor::new(&[("a.pdf", "a".into())]),
        dir.path(),
        PipelineConfig::default(),
    );
    let outcome = pipeline.run(&store).unwrap();

    assert_eq!(outcome.report.saves, 1);
    assert_eq!(outcome.report.failures.len(), 1);
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "file,summary\na.pdf,Saved\nb.pdf,\n"
    );
    let mut entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["a.pdf", "b.pdf", "summaries.csv"]);
}
