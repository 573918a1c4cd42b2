use hscase_core::types::{Confidence, SourcePath};
use hscase_consolidate::{
    fuse, heading_codes, Consolidation, DualPathConsolidator, Manual, ManualEntry, PathAHit,
    PathBHit, TariffEntry, TariffTable,
};

fn a_hit(code: &str, similarity: f32) -> PathAHit {
    PathAHit {
        code: code.to_string(),
        similarity,
        tariff_name: format!("tariff {code}"),
        manual_text: format!("manual {code}"),
    }
}

fn b_hit(codes: &[&str]) -> PathBHit {
    PathBHit {
        codes: codes.iter().map(|c| (*c).to_string()).collect(),
        entry_text: "entry text".to_string(),
    }
}

#[test]
fn fusion_weights_and_confidence_match_the_dual_path_rule() {
    // Path A: 3923 with similarity 0.8. Path B: one hit each for 3923 and
    // 4202. Expected: 3923 = 0.8*0.4 + 0.5*0.6 = 0.62 HIGH, 4202 = 0.30
    // MEDIUM, in that order.
    let result = fuse(&[a_hit("3923", 0.8)], &[b_hit(&["3923"]), b_hit(&["4202"])]);
    let candidates = result.candidates().expect("candidates");

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].hs_code, "3923");
    assert!((candidates[0].score - 0.62).abs() < 1e-6);
    assert_eq!(candidates[0].confidence, Confidence::High);
    assert_eq!(
        candidates[0].sources,
        vec![SourcePath::TariffToManual, SourcePath::DirectManual]
    );

    assert_eq!(candidates[1].hs_code, "4202");
    assert!((candidates[1].score - 0.30).abs() < 1e-6);
    assert_eq!(candidates[1].confidence, Confidence::Medium);
    assert_eq!(candidates[1].sources, vec![SourcePath::DirectManual]);
}

#[test]
fn one_empty_path_still_produces_candidates() {
    let result = fuse(&[a_hit("8507", 0.5)], &[]);
    let candidates = result.candidates().expect("candidates");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].confidence, Confidence::Medium);
    assert_eq!(candidates[0].sources, vec![SourcePath::TariffToManual]);
}

#[test]
fn both_paths_empty_is_an_explicit_no_candidate() {
    assert!(matches!(fuse(&[], &[]), Consolidation::NoCandidate));
}

#[test]
fn equal_scores_keep_path_a_before_path_b() {
    // A-only code scoring 0.75*0.4 = 0.30 ties with a B-only code at
    // 0.5*0.6 = 0.30; the Path A insertion must come first.
    let result = fuse(&[a_hit("1111", 0.75)], &[b_hit(&["2222"])]);
    let candidates = result.candidates().expect("candidates");
    assert_eq!(candidates[0].hs_code, "1111");
    assert_eq!(candidates[1].hs_code, "2222");
    assert!((candidates[0].score - candidates[1].score).abs() < 1e-6);
}

#[test]
fn only_the_top_two_candidates_survive() {
    let result = fuse(
        &[a_hit("1111", 0.9), a_hit("2222", 0.6), a_hit("3333", 0.3)],
        &[],
    );
    let candidates = result.candidates().expect("candidates");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].hs_code, "1111");
    assert_eq!(candidates[1].hs_code, "2222");
}

#[test]
fn repeated_path_b_codes_accumulate() {
    let result = fuse(&[], &[b_hit(&["3923"]), b_hit(&["3923"])]);
    let candidates = result.candidates().expect("candidates");
    assert_eq!(candidates.len(), 1);
    assert!((candidates[0].score - 0.60).abs() < 1e-6);
    assert_eq!(candidates[0].confidence, Confidence::Medium);
}

fn sample_manual() -> Manual {
    Manual::from_entries(vec![
        ManualEntry {
            section: "Section VII".to_string(),
            heading: "Section VII".to_string(),
            text: "Plastics and articles thereof; rubber.".to_string(),
        },
        ManualEntry {
            section: "Section VII".to_string(),
            heading: "Chapter 39".to_string(),
            text: "Plastics in primary forms and articles of plastics.".to_string(),
        },
        ManualEntry {
            section: "Section VII".to_string(),
            heading: "39.23".to_string(),
            text: "Articles for the conveyance or packing of goods, of plastics.".to_string(),
        },
        ManualEntry {
            section: "Section VIII".to_string(),
            heading: "42.02".to_string(),
            text: "Trunks, suitcases and travel bags.".to_string(),
        },
    ])
}

#[test]
fn manual_lookup_resolves_all_three_levels() {
    let manual = sample_manual();
    let content = manual.lookup("3923.30");
    assert!(!content.is_empty());
    assert!(content.section_text.as_deref().unwrap().contains("Plastics and articles"));
    assert!(content.chapter_text.as_deref().unwrap().contains("primary forms"));
    assert!(content.heading_text.as_deref().unwrap().contains("conveyance or packing"));

    let rendered = content.rendered();
    assert!(rendered.contains("Section notes:"));
    assert!(rendered.contains("Heading notes:"));
}

#[test]
fn manual_lookup_tolerates_missing_levels() {
    let manual = sample_manual();

    // 42.02 has a heading entry but no chapter/section entries.
    let content = manual.lookup("4202");
    assert!(content.chapter_text.is_none());
    assert!(content.heading_text.is_some());

    // chapter-only code
    let chapter = manual.lookup("39");
    assert!(chapter.chapter_text.is_some());
    assert!(chapter.heading_text.is_none());

    // nothing known
    assert!(manual.lookup("9902").is_empty());
    assert!(manual.lookup("x").is_empty());
}

#[test]
fn heading_codes_extracts_dotted_and_chapter_forms() {
    assert_eq!(heading_codes("39.11 Polymers"), vec!["3911"]);
    assert_eq!(heading_codes("39.23 and 42.02"), vec!["3923", "4202"]);
    assert_eq!(heading_codes("Chapter 39"), vec!["3900"]);
    assert_eq!(heading_codes("Chapter 5"), vec!["0500"]);
    assert!(heading_codes("General notes").is_empty());
    // dotted codes win over the chapter fallback
    assert_eq!(heading_codes("Chapter 39, heading 39.23"), vec!["3923"]);
}

fn sample_tariff() -> TariffTable {
    TariffTable::from_entries(vec![
        TariffEntry {
            code: "3923".to_string(),
            name: "plastic bottles and containers".to_string(),
            name_alt: String::new(),
        },
        TariffEntry {
            code: "7010".to_string(),
            name: "glass bottles and jars".to_string(),
            name_alt: String::new(),
        },
        TariffEntry {
            code: "4202".to_string(),
            name: "plastic travel bags".to_string(),
            name_alt: String::new(),
        },
    ])
}

#[test]
fn tariff_search_ranks_by_name_similarity() {
    let table = sample_tariff();
    let hits = table.search("plastic bottles", 10, 0.1);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].code, "3923", "shares both name words");
    assert!(hits[0].similarity > 0.1);
}

#[test]
fn consolidator_end_to_end_over_small_corpora() {
    let tariff = sample_tariff();
    let manual = sample_manual();
    let consolidator = DualPathConsolidator::new(&tariff, &manual);

    let result = consolidator.consolidate("plastic bottles for packing goods");
    let candidates = result.candidates().expect("candidates");
    assert!(!candidates.is_empty());
    assert_eq!(candidates[0].hs_code, "3923");
    // found by the tariff path and by direct manual matching
    assert_eq!(candidates[0].confidence, Confidence::High);
    assert!(!candidates[0].manual_text.is_empty());
}

#[test]
fn consolidator_with_empty_corpora_reports_no_candidate() {
    let tariff = TariffTable::from_entries(Vec::new());
    let manual = Manual::from_entries(Vec::new());
    let consolidator = DualPathConsolidator::new(&tariff, &manual);
    assert!(matches!(
        consolidator.consolidate("plastic bottle"),
        Consolidation::NoCandidate
    ));
}
