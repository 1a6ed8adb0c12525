//! End-to-end behavior of the snippet store against real files

use chrono::NaiveDate;
use snipvault::models::{ExportOptions, export_snippets, read_import_file};
use snipvault::{SnippetStore, StoreError};
use std::fs;
use tempfile::TempDir;

const LEGACY: &str = r#"{
    "Old loop": {
        "code": "for i in range(3):\n    print(i)\n",
        "category": "basics"
    },
    "Typed": {
        "code": "fn main() {}",
        "category": "rust",
        "language": "rust",
        "favorite": true,
        "created_at": "2023-11-02"
    },
    "Query": {
        "code": "SELECT 1;\nSELECT 2;",
        "category": "db",
        "language": "sql",
        "favorite": false,
        "created_at": "2023-11-20"
    }
}"#;

fn legacy_store(dir: &TempDir) -> SnippetStore {
    let path = dir.path().join("snippets.json");
    fs::write(&path, LEGACY).unwrap();
    SnippetStore::open(&path).unwrap()
}

#[test]
fn legacy_file_loads_in_order_with_backfill() {
    let dir = TempDir::new().unwrap();
    let store = legacy_store(&dir);

    let titles: Vec<&str> = store.list_all().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Old loop", "Typed", "Query"]);

    let old = store.get("Old loop").unwrap();
    assert_eq!(old.language, "unknown");
    assert!(!old.favorite);

    let favorites: Vec<&str> = store.list_favorites().map(|s| s.title.as_str()).collect();
    assert_eq!(favorites, vec!["Typed"]);
}

#[test]
fn mutation_persists_backfilled_fields() {
    let dir = TempDir::new().unwrap();
    let mut store = legacy_store(&dir);
    store.toggle_favorite("Typed").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["Old loop"]["language"], "unknown");
    assert_eq!(raw["Old loop"]["favorite"], false);
    assert!(raw["Old loop"]["created_at"].is_string());
    assert_eq!(raw["Typed"]["favorite"], false);
}

#[test]
fn contributions_filter_and_count_newlines() {
    let dir = TempDir::new().unwrap();
    let store = legacy_store(&dir);

    let november = store.contributions_by_period(Some(2023), Some(11));
    assert_eq!(november.len(), 1);
    let stats = &november["2023-11"];
    assert_eq!(stats.snippet_count, 2);
    assert_eq!(stats.total_code_lines, 1);
    assert_eq!(
        stats.languages.iter().cloned().collect::<Vec<_>>(),
        vec!["rust".to_string(), "sql".to_string()]
    );

    assert!(store.contributions_by_period(Some(2023), Some(12)).is_empty());
}

#[test]
fn corrupt_file_is_reported_not_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippets.json");
    fs::write(&path, "{\"broken\": ").unwrap();

    match SnippetStore::open(&path) {
        Err(StoreError::CorruptData { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected corrupt data, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"broken\": ");
}

#[test]
fn export_then_import_into_empty_store() {
    let dir = TempDir::new().unwrap();
    let source = legacy_store(&dir);
    let export_path = dir.path().join("export.yaml");
    let options = ExportOptions {
        format: snipvault::models::ExportFormat::Yaml,
        ..ExportOptions::default()
    };
    export_snippets(source.list_all(), &export_path, &options).unwrap();

    let mut target = SnippetStore::open(dir.path().join("other.json")).unwrap();
    let report = target.import(read_import_file(&export_path).unwrap()).unwrap();
    assert_eq!(report.imported.len(), 3);
    assert!(report.skipped.is_empty());

    let original: Vec<_> = source.list_all().cloned().collect();
    let copied: Vec<_> = target.list_all().cloned().collect();
    assert_eq!(original, copied);
    assert_eq!(
        target.get("Typed").unwrap().created_at,
        NaiveDate::from_ymd_opt(2023, 11, 2).unwrap()
    );
}

#[test]
fn no_temporary_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let mut store = SnippetStore::open(dir.path().join("snippets.json")).unwrap();
    for i in 0..5 {
        store.add(format!("s{i}"), "x", None, None).unwrap();
    }
    store.delete("s2").unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
