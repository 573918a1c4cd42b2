use std::fs;
use tempfile::TempDir;

use hscase_core::corpus::{CaseStore, CorpusKind};
use hscase_core::types::CaseRecord;

fn record(name: &str, code: &str, ref_id: &str) -> CaseRecord {
    CaseRecord {
        product_name: name.to_string(),
        hs_code: code.to_string(),
        reference_id: ref_id.to_string(),
        ..CaseRecord::default()
    }
}

#[test]
fn load_with_missing_sources_is_not_an_error() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(
        dir.join("cases_part1.json"),
        r#"[
            {"product_name": "plastic bottle", "hs_code": "3923", "reference_id": "C-1"},
            {"product_name": "glass jar", "hs_code": "7010", "reference_id": "C-2"}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join("committee.json"),
        r#"[{"product_name": "steel cap", "description": "crown cork", "hs_code": "8309"}]"#,
    )
    .unwrap();

    // All other domestic sources are absent and must load as empty.
    let store = CaseStore::load(CorpusKind::Domestic, dir).expect("load");
    assert_eq!(store.len(), 3);
    assert_eq!(store.kind(), CorpusKind::Domestic);

    let id = store.doc_id(0).expect("doc id");
    assert_eq!(id.source, "cases_part1");
    assert_eq!(id.ordinal, 0);
    assert_eq!(store.record(&id).expect("record").reference_id, "C-1");

    let last = store.doc_id(2).expect("doc id");
    assert_eq!(last.source, "committee");
}

#[test]
fn load_with_no_sources_is_empty() {
    let tmp = TempDir::new().unwrap();
    let store = CaseStore::load(CorpusKind::Overseas, tmp.path()).expect("load");
    assert!(store.is_empty());
    assert!(store.documents().is_empty());
}

#[test]
fn malformed_json_is_a_corpus_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("cases_us.json"), "{ not json").unwrap();
    let err = CaseStore::load(CorpusKind::Overseas, tmp.path()).unwrap_err();
    assert!(matches!(err, hscase_core::Error::Corpus(_)));
    assert!(err.to_string().contains("cases_us.json"));
}

#[test]
fn records_with_unknown_fields_still_parse() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("cases_us.json"),
        r#"[{"product_name": "lamp", "country": "US", "extra": 42}]"#,
    )
    .unwrap();
    let store = CaseStore::load(CorpusKind::Overseas, tmp.path()).expect("load");
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].product_name, "lamp");
    assert!(store.records()[0].hs_code.is_empty());
}

#[test]
fn documents_concatenate_semantic_fields_and_skip_blank_records() {
    let store = CaseStore::from_records(
        CorpusKind::Domestic,
        vec![(
            "cases_part1".to_string(),
            vec![
                CaseRecord {
                    product_name: "plastic bottle".to_string(),
                    description: "PET container".to_string(),
                    decision_reason: "molded plastic".to_string(),
                    ..CaseRecord::default()
                },
                CaseRecord::default(),
                record("metal cap", "8309", "C-9"),
            ],
        )],
    );

    let docs = store.documents();
    assert_eq!(docs.len(), 2, "the all-blank record is skipped");
    assert_eq!(docs[0].text, "plastic bottle PET container molded plastic");
    assert_eq!(docs[0].id.ordinal, 0);
    assert_eq!(docs[1].id.ordinal, 2, "ids keep the arena ordinal, not the doc position");
}
