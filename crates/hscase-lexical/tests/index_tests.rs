use hscase_core::types::{DocId, Document};
use hscase_lexical::index::{DEFAULT_MIN_SIMILARITY, DEFAULT_TOP_K};
use hscase_lexical::LexicalIndex;

fn doc(ordinal: usize, text: &str) -> Document {
    Document {
        id: DocId { source: "cases_part1".to_string(), ordinal },
        text: text.to_string(),
    }
}

fn bottle_corpus() -> Vec<Document> {
    vec![
        doc(0, "plastic bottle container"),
        doc(1, "metal bottle cap"),
        doc(2, "plastic bag"),
    ]
}

#[test]
fn plastic_bottle_ranks_the_plastic_container_first() {
    let index = LexicalIndex::build(&bottle_corpus());
    let hits = index.search("plastic bottle", 10, 0.1);

    assert!(!hits.is_empty());
    assert_eq!(hits[0].id.ordinal, 0, "shares both 'plastic' and 'bottle' spans");

    let pos = |ordinal: usize| hits.iter().position(|h| h.id.ordinal == ordinal);
    let bag = pos(2);
    let cap = pos(1);
    if let (Some(bag), Some(cap)) = (bag, cap) {
        assert!(bag < cap, "the metal cap is excluded or lowest-ranked");
    }
}

#[test]
fn search_is_idempotent() {
    let index = LexicalIndex::build(&bottle_corpus());
    let first = index.search("plastic bottle", DEFAULT_TOP_K, DEFAULT_MIN_SIMILARITY);
    let second = index.search("plastic bottle", DEFAULT_TOP_K, DEFAULT_MIN_SIMILARITY);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.id, b.id);
        assert!((a.score - b.score).abs() < f32::EPSILON);
    }
}

#[test]
fn raising_the_threshold_never_admits_new_documents() {
    let index = LexicalIndex::build(&bottle_corpus());
    let loose = index.search("plastic bottle", 10, 0.0);
    let strict = index.search("plastic bottle", 10, 0.3);

    assert!(strict.len() <= loose.len());
    for hit in &strict {
        assert!(
            loose.iter().any(|h| h.id == hit.id),
            "a stricter threshold can only drop documents"
        );
    }
}

#[test]
fn empty_corpus_returns_empty() {
    let index = LexicalIndex::build(&[]);
    assert!(index.is_empty());
    assert!(index.search("anything", 10, 0.0).is_empty());
}

#[test]
fn query_with_no_indexed_spans_returns_empty() {
    let index = LexicalIndex::build(&bottle_corpus());
    assert!(index.search("zzzz", 10, 0.0).is_empty());
}

#[test]
fn spans_in_every_document_are_noise_filtered() {
    // "bottle" appears in all three documents, so with max_df = 0.85 its
    // spans never enter the vocabulary.
    let index = LexicalIndex::build(&[
        doc(0, "bottle alpha"),
        doc(1, "bottle bravo"),
        doc(2, "bottle index"),
    ]);
    assert!(index.search("bottle", 10, 0.0).is_empty());
}

#[test]
fn top_k_truncates_the_ranking() {
    let mut docs = Vec::new();
    for i in 0..4 {
        docs.push(doc(i, "plastic container"));
    }
    for i in 4..8 {
        docs.push(doc(i, "glass container"));
    }
    let index = LexicalIndex::build(&docs);
    let hits = index.search("plastic", 3, 0.1);
    assert_eq!(hits.len(), 3, "four documents match but only top_k survive");
}

#[test]
fn equal_scores_keep_corpus_order() {
    let index = LexicalIndex::build(&[
        doc(0, "plastic widget"),
        doc(1, "plastic widget"),
        doc(2, "plastic widget"),
        doc(3, "glass marble"),
        doc(4, "glass marble"),
    ]);
    let hits = index.search("plastic widget", 10, 0.1);
    let ordinals: Vec<usize> = hits.iter().map(|h| h.id.ordinal).collect();
    assert_eq!(ordinals, vec![0, 1, 2], "stable sort preserves arena order on ties");
}
