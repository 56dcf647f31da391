//! Integration tests for `run_batches`: checkpoint contents, crash
//! recovery, and per-record error handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use bizdir_core::{NullSink, Record};
use bizdir_enrich::{run_batches, BatchOptions, EnrichError, SearchBackend, SearchResult};
use bizdir_store::{load_records, stats_path_for};
use tempfile::TempDir;

/// Answers with a fixed phone for known company names.
struct DirectoryBackend {
    phones: Vec<(&'static str, &'static str)>,
    panic_on: Option<&'static str>,
    calls: AtomicUsize,
}

impl DirectoryBackend {
    fn new(phones: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            phones,
            panic_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn panicking_on(mut self, company: &'static str) -> Self {
        self.panic_on = Some(company);
        self
    }
}

impl SearchBackend for DirectoryBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, EnrichError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(company) = self.panic_on {
            assert!(!query.contains(company), "simulated crash on {company}");
        }
        Ok(self
            .phones
            .iter()
            .filter(|(name, _)| query.contains(name))
            .map(|(_, phone)| SearchResult {
                snippet: format!("Tel. {phone}"),
                phone_found: Some((*phone).to_string()),
            })
            .collect())
    }
}

fn company(name: &str) -> Record {
    let mut record = Record::new(name, format!("https://example.es/{}", name.to_lowercase()));
    record.municipality = "Madrid".to_string();
    record
}

fn options(dir: &TempDir, batch_size: usize) -> BatchOptions {
    BatchOptions {
        batch_size,
        batch_pause: Duration::ZERO,
        search_delay: Duration::ZERO,
        output: dir.path().join("enriched.json"),
    }
}

fn stats_json(options: &BatchOptions) -> serde_json::Value {
    let raw = std::fs::read_to_string(stats_path_for(&options.output)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn run_batches_persists_results_and_stats() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, 2);
    let backend = DirectoryBackend::new(vec![("ACME", "+34912345678"), ("GAMMA", "+34600111222")]);
    let records = vec![company("ACME"), company("BETA"), company("GAMMA")];

    let outcome = run_batches(&backend, records, Vec::new(), &options, &mut NullSink)
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.stats.phones_found, 2);
    assert_eq!(outcome.stats.last_processed_batch, "2-3");

    let saved = load_records(&options.output).unwrap();
    assert_eq!(saved, outcome.results);
    assert_eq!(saved[0].phone.as_deref(), Some("+34912345678"));
    assert_eq!(
        saved[0].phone_search_info.as_deref(),
        Some("found via strategy 1")
    );
    assert!(saved[0].search_timestamp.is_some());
    assert_eq!(saved[1].phone, None);
    assert_eq!(
        saved[1].phone_search_info.as_deref(),
        Some("no phone found after all strategies")
    );

    let stats = stats_json(&options);
    assert_eq!(stats["total_processed"], 3);
    assert_eq!(stats["phones_found"], 2);
    assert_eq!(stats["last_processed_batch"], "2-3");
}

#[tokio::test]
async fn crash_in_second_batch_leaves_first_batch_checkpoint() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, 2);
    let records = vec![
        company("ACME"),
        company("BETA"),
        company("BOOM"),
        company("DELTA"),
    ];

    let crashing = DirectoryBackend::new(vec![("ACME", "+34912345678")]).panicking_on("BOOM");
    let first_run = {
        let options = options.clone();
        let records = records.clone();
        tokio::task::LocalSet::new()
            .run_until(async move {
                tokio::task::spawn_local(async move {
                    let mut sink = NullSink;
                    run_batches(&crashing, records, Vec::new(), &options, &mut sink).await
                })
                .await
            })
            .await
    };
    assert!(first_run.unwrap_err().is_panic());

    let saved = load_records(&options.output).unwrap();
    let names: Vec<&str> = saved.iter().map(|r| r.company_name.as_str()).collect();
    assert_eq!(names, vec!["ACME", "BETA"]);
    let stats = stats_json(&options);
    assert_eq!(stats["total_processed"], 2);
    assert_eq!(stats["phones_found"], 1);
    assert_eq!(stats["last_processed_batch"], "0-2");

    // Resume from the checkpoint: only the second batch is searched.
    let backend = DirectoryBackend::new(vec![("DELTA", "+34600111222")]);
    let outcome = run_batches(&backend, records, saved, &options, &mut NullSink)
        .await
        .unwrap();

    assert_eq!(outcome.skipped, 2);
    assert_eq!(outcome.results.len(), 4);
    assert_eq!(outcome.stats.phones_found, 2);
    assert_eq!(outcome.stats.last_processed_batch, "2-4");
    // BOOM: five misses; DELTA: hit on the first strategy.
    assert_eq!(backend.calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn invalid_record_is_annotated_not_fatal() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, 20);
    let backend = DirectoryBackend::new(vec![("ACME", "+34912345678")]);
    let records = vec![Record::new("  ", "https://example.es/blank"), company("ACME")];

    let outcome = run_batches(&backend, records, Vec::new(), &options, &mut NullSink)
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    let failed = &outcome.results[0];
    assert_eq!(failed.phone, None);
    assert!(failed
        .phone_search_info
        .as_deref()
        .is_some_and(|info| info.starts_with("error: ")));
    assert_eq!(outcome.results[1].phone.as_deref(), Some("+34912345678"));
}

#[tokio::test]
async fn empty_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, 20);
    let backend = DirectoryBackend::new(vec![]);

    let outcome = run_batches(&backend, Vec::new(), Vec::new(), &options, &mut NullSink)
        .await
        .unwrap();

    assert!(outcome.results.is_empty());
    assert!(!options.output.exists());
}

/// Always answers with a phone and records when each query arrived.
struct TimedBackend {
    arrivals: Mutex<Vec<tokio::time::Instant>>,
}

impl SearchBackend for TimedBackend {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, EnrichError> {
        self.arrivals
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());
        Ok(vec![SearchResult {
            snippet: "Tel. 912 345 678".to_string(),
            phone_found: Some("+34912345678".to_string()),
        }])
    }
}

#[tokio::test(start_paused = true)]
async fn search_delay_separates_queries_across_records() {
    let dir = TempDir::new().unwrap();
    let options = BatchOptions {
        search_delay: Duration::from_secs(2),
        ..options(&dir, 20)
    };
    let backend = TimedBackend {
        arrivals: Mutex::new(Vec::new()),
    };

    run_batches(
        &backend,
        vec![company("ACME"), company("BETA")],
        Vec::new(),
        &options,
        &mut NullSink,
    )
    .await
    .unwrap();

    let arrivals = backend.arrivals.lock().unwrap().clone();
    assert_eq!(arrivals.len(), 2);
    let gap = arrivals[1] - arrivals[0];
    assert!(gap >= Duration::from_secs(2), "queries only {gap:?} apart");
}
