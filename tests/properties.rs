//! Property-based tests for the snippet store

use proptest::prelude::*;
use snipvault::SnippetStore;
use snipvault::models::storage::{parse_document, render_document};
use snipvault::models::Snippet;
use std::path::Path;
use tempfile::TempDir;

// Titles are unique keys, so generate them as a set
fn arb_titles() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Za-z0-9 _-]{1,12}", 0..8).prop_map(|set| set.into_iter().collect())
}

fn arb_code() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 (){};=\n\t]{0,40}"
}

fn arb_snippets() -> impl Strategy<Value = Vec<Snippet>> {
    arb_titles().prop_flat_map(|titles| {
        let count = titles.len();
        (
            Just(titles),
            prop::collection::vec((arb_code(), "[a-z]{0,8}", any::<bool>(), 0u32..3000), count),
        )
            .prop_map(|(titles, fields)| {
                titles
                    .into_iter()
                    .zip(fields)
                    .map(|(title, (code, category, favorite, days))| {
                        let mut snippet = Snippet::new(title, code, Some(category), Some("python".into()));
                        snippet.favorite = favorite;
                        snippet.created_at = chrono::NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()
                            + chrono::Days::new(u64::from(days));
                        snippet
                    })
                    .collect()
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Rendering and parsing the persisted layout reproduces the snippets
    #[test]
    fn document_round_trip(snippets in arb_snippets()) {
        let rendered = render_document(&snippets).unwrap();
        let parsed = parse_document(&rendered, Path::new("mem.json")).unwrap();
        prop_assert_eq!(parsed, snippets);
    }

    /// Toggling twice restores the original favorite flag
    #[test]
    fn toggle_is_an_involution(titles in arb_titles(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!titles.is_empty());
        let dir = TempDir::new().unwrap();
        let mut store = SnippetStore::open(dir.path().join("s.json")).unwrap();
        for title in &titles {
            store.add(title.clone(), "x", None, None).unwrap();
        }
        let title = &titles[pick.index(titles.len())];
        let before = store.get(title).unwrap().favorite;

        store.toggle_favorite(title).unwrap();
        store.toggle_favorite(title).unwrap();
        prop_assert_eq!(store.get(title).unwrap().favorite, before);
    }

    /// Search ignores the case of the query
    #[test]
    fn search_ignores_query_case(snippets in arb_snippets(), query in "[a-zA-Z]{0,3}") {
        let dir = TempDir::new().unwrap();
        let mut store = SnippetStore::open(dir.path().join("s.json")).unwrap();
        store.import(snippets).unwrap();

        let upper: Vec<String> = store.search(&query.to_uppercase()).map(|s| s.title.clone()).collect();
        let lower: Vec<String> = store.search(&query.to_lowercase()).map(|s| s.title.clone()).collect();
        prop_assert_eq!(upper, lower);
    }

    /// The empty query returns everything in insertion order
    #[test]
    fn empty_query_matches_all(snippets in arb_snippets()) {
        let dir = TempDir::new().unwrap();
        let mut store = SnippetStore::open(dir.path().join("s.json")).unwrap();
        let expected: Vec<String> = snippets.iter().map(|s| s.title.clone()).collect();
        store.import(snippets).unwrap();

        let found: Vec<String> = store.search("").map(|s| s.title.clone()).collect();
        prop_assert_eq!(found, expected);
    }

    /// Saved stores reload with identical content
    #[test]
    fn store_reload_matches(snippets in arb_snippets()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.json");
        let mut store = SnippetStore::open(&path).unwrap();
        store.import(snippets.clone()).unwrap();

        let reloaded = SnippetStore::open(&path).unwrap();
        let contents: Vec<Snippet> = reloaded.list_all().cloned().collect();
        prop_assert_eq!(contents, snippets);
    }
}
