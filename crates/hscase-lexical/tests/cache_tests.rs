use std::fs;
use tempfile::TempDir;

use hscase_core::types::{DocId, Document};
use hscase_lexical::cache;
use hscase_lexical::LexicalIndex;

fn doc(ordinal: usize, text: &str) -> Document {
    Document {
        id: DocId { source: "cases_part1".to_string(), ordinal },
        text: text.to_string(),
    }
}

fn corpus() -> Vec<Document> {
    vec![
        doc(0, "plastic bottle container"),
        doc(1, "metal bottle cap"),
        doc(2, "plastic bag"),
    ]
}

#[test]
fn round_trip_preserves_search_results() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("indexes/domestic.idx.zst");
    let docs = corpus();

    let built = LexicalIndex::build(&docs);
    let fp = cache::fingerprint(&docs);
    cache::save(&path, &built, fp).expect("save");
    assert!(path.exists());

    let loaded = cache::load(&path, fp).expect("cache hit");
    let a = built.search("plastic bottle", 10, 0.1);
    let b = loaded.search("plastic bottle", 10, 0.1);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.id, y.id);
        assert!((x.score - y.score).abs() < f32::EPSILON);
    }
}

#[test]
fn changed_corpus_invalidates_the_cache() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("domestic.idx.zst");
    let docs = corpus();
    let index = LexicalIndex::build(&docs);
    cache::save(&path, &index, cache::fingerprint(&docs)).expect("save");

    let mut changed = corpus();
    changed.push(doc(3, "rubber glove"));
    assert!(
        cache::load(&path, cache::fingerprint(&changed)).is_none(),
        "stale blob must not be served"
    );
}

#[test]
fn corrupt_cache_is_treated_as_absent() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("domestic.idx.zst");
    fs::write(&path, b"definitely not a zstd blob").unwrap();
    assert!(cache::load(&path, 0).is_none());
}

#[test]
fn load_or_build_writes_through_and_then_hits() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("domestic.idx.zst");
    let docs = corpus();

    assert!(!path.exists());
    let first = cache::load_or_build(&path, &docs).expect("build");
    assert!(path.exists(), "rebuild writes the cache through");
    assert_eq!(first.len(), docs.len());

    let second = cache::load_or_build(&path, &docs).expect("load");
    assert_eq!(second.len(), first.len());
}
