//! JSON record files and their `_stats.json` sidecars.
//!
//! Every write goes to a temporary sibling first and is renamed into place,
//! so an interrupted job never leaves a truncated file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use bizdir_core::Record;
use serde::Serialize;

use crate::error::StoreError;

/// Result files looked for, in order, when no input path is given.
pub const DEFAULT_INPUT_CANDIDATES: [&str; 3] = [
    "companies_with_phones_enhanced.json",
    "companies_with_phones.json",
    "test_results.json",
];

/// Reads a JSON array of records.
///
/// # Errors
///
/// [`StoreError::Io`] if the file cannot be opened, [`StoreError::Json`] if
/// it is not an array of records.
pub fn load_records(path: &Path) -> Result<Vec<Record>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let records: Vec<Record> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::json(path, e))?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Atomically replaces `path` with the pretty-printed `records`.
///
/// # Errors
///
/// [`StoreError::Io`] on any filesystem failure.
pub fn save_records(path: &Path, records: &[Record]) -> Result<(), StoreError> {
    write_json_atomic(path, records)?;
    tracing::debug!(path = %path.display(), count = records.len(), "saved records");
    Ok(())
}

/// Atomically writes `stats` as JSON to `path`.
///
/// # Errors
///
/// [`StoreError::Io`] on any filesystem failure.
pub fn save_stats<T: Serialize>(path: &Path, stats: &T) -> Result<(), StoreError> {
    write_json_atomic(path, stats)
}

/// `companies.json` → `companies_stats.json`, in the same directory.
#[must_use]
pub fn stats_path_for(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}_stats.json"))
}

/// Returns the first of `candidates` that exists, resolved against `dir`.
///
/// # Errors
///
/// [`StoreError::NoInput`] when none exists.
pub fn first_existing_input(dir: &Path, candidates: &[&str]) -> Result<PathBuf, StoreError> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| StoreError::NoInput {
            candidates: candidates.iter().map(|s| (*s).to_string()).collect(),
        })
}

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let temp_path = temp_path_for(path);
    {
        let file = File::create(&temp_path).map_err(|e| StoreError::io(&temp_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|e| StoreError::json(&temp_path, e))?;
        writer.flush().map_err(|e| StoreError::io(&temp_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| StoreError::io(&temp_path, e))?;
    }
    fs::rename(&temp_path, path).map_err(|e| StoreError::io(path, e))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdir_core::EnrichmentStats;
    use tempfile::TempDir;

    #[test]
    fn stats_path_replaces_extension() {
        assert_eq!(
            stats_path_for(Path::new("/data/companies_with_phones.json")),
            PathBuf::from("/data/companies_with_phones_stats.json")
        );
        assert_eq!(
            stats_path_for(Path::new("out")),
            PathBuf::from("out_stats.json")
        );
    }

    #[test]
    fn save_then_load_preserves_records_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("companies.json");
        let mut acme = Record::new("ACME SL", "https://example.es/acme");
        acme.phone = Some("+34912345678".into());
        acme.search_timestamp = Some(1_700_000_000.5);

        save_records(&path, &[acme.clone(), Record::new("BETA SA", "https://example.es/b")])
            .unwrap();
        let loaded = load_records(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], acme);
        assert!(!dir.path().join(".companies.json.tmp").exists());
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("companies.json");
        save_records(&path, &[Record::new("A", "u1"), Record::new("B", "u2")]).unwrap();
        save_records(&path, &[Record::new("C", "u3")]).unwrap();
        assert_eq!(load_records(&path).unwrap().len(), 1);
    }

    #[test]
    fn load_tolerates_missing_optional_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"[{"company_name": "ACME SL", "phone": "Not found", "url": "https://x.es/a"}]"#,
        )
        .unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded[0].company_name, "ACME SL");
        assert_eq!(loaded[0].address, "");
        assert_eq!(loaded[0].phone.as_deref(), Some("Not found"));
    }

    #[test]
    fn load_accepts_records_without_company_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.json");
        fs::write(
            &path,
            r#"[
                {"company_name": "ACME SL", "phone": "+34912345678", "url": "https://x.es/a"},
                {"url": "https://x.es/b"},
                {"company_name": null, "url": "https://x.es/c"}
            ]"#,
        )
        .unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].company_name, "ACME SL");
        assert_eq!(loaded[1].company_name, "");
        assert_eq!(loaded[1].url, "https://x.es/b");
        assert_eq!(loaded[2].company_name, "");
    }

    #[test]
    fn load_reports_json_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_records(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn save_stats_writes_expected_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out_stats.json");
        let stats = EnrichmentStats::from_results(&[], 0, 20);
        save_stats(&path, &stats).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["total_processed"], 0);
        assert_eq!(raw["last_processed_batch"], "0-20");
    }

    #[test]
    fn first_existing_input_picks_first_existing_candidate() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test_results.json"), "[]").unwrap();
        fs::write(dir.path().join("companies_with_phones.json"), "[]").unwrap();

        let found = first_existing_input(dir.path(), &DEFAULT_INPUT_CANDIDATES).unwrap();
        assert_eq!(found, dir.path().join("companies_with_phones.json"));
    }

    #[test]
    fn first_existing_input_without_candidates_is_no_input() {
        let dir = TempDir::new().unwrap();
        let err = first_existing_input(dir.path(), &DEFAULT_INPUT_CANDIDATES).unwrap_err();
        assert!(matches!(err, StoreError::NoInput { .. }));
        assert!(err.to_string().contains("test_results.json"));
    }
}
