use std::env;

use hscase_core::config::{expand_path, Config};
use hscase_core::corpus::{CaseStore, CorpusKind};
use hscase_core::types::CaseRecord;
use hscase_keyword::{KeywordMatcher, KeywordOptions};
use hscase_lexical::cache;

fn print_record(rank: usize, score: Option<f32>, record: &CaseRecord) {
    match score {
        Some(score) => println!(
            "\n  {}. score={:.4}  [{}]  code {}",
            rank, score, record.reference_id, record.hs_code
        ),
        None => println!("\n  {}. [{}]  code {}", rank, record.reference_id, record.hs_code),
    }
    println!("     {}", record.product_name);
    if !record.description.is_empty() {
        println!("     📝 {}", record.description);
    }
    if !record.decision_reason.is_empty() {
        println!("     ⚖️  {}", record.decision_reason);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut mode = "lexical";
    let mut kind = CorpusKind::Domestic;
    let mut query = None;
    for arg in &args {
        match arg.as_str() {
            "--keyword" | "-k" => mode = "keyword",
            "--ref" | "-r" => mode = "reference",
            "--code" | "-c" => mode = "code",
            "--overseas" | "-o" => kind = CorpusKind::Overseas,
            _ if !arg.starts_with('-') => query = Some(arg.clone()),
            other => {
                eprintln!("Unknown flag: {}", other);
                std::process::exit(1);
            }
        }
    }
    let query = query.unwrap_or_else(|| {
        eprintln!("Usage: hscase-search [--keyword|--ref|--code] [--overseas] <query>");
        std::process::exit(1)
    });

    let data_dir: String = config.get("data.dir").unwrap_or_else(|_| "./data".to_string());
    let store = CaseStore::load(kind, &expand_path(data_dir))?;
    println!("🔍 hscase-search ({} mode, {} corpus, {} cases)", mode, kind.label(), store.len());

    let top_k: usize = config.get("search.top_k").unwrap_or(10);
    match mode {
        "lexical" => {
            let index_dir: String = config
                .get("data.index_dir")
                .unwrap_or_else(|_| "./data/indexes".to_string());
            let index_path = expand_path(index_dir).join(format!("{}.idx", kind.label()));
            let documents = store.documents();
            let index = cache::load_or_build(&index_path, &documents)?;
            let min_similarity: f32 = config
                .get("search.min_similarity")
                .unwrap_or(hscase_lexical::index::DEFAULT_MIN_SIMILARITY);
            let hits = index.search(&query, top_k, min_similarity);
            println!("\nFound {} results for: \"{}\"", hits.len(), query);
            for (i, hit) in hits.iter().enumerate() {
                if let Some(record) = store.record(&hit.id) {
                    print_record(i + 1, Some(hit.score), record);
                }
            }
        }
        "keyword" => {
            let matcher = KeywordMatcher::new(&store);
            let opts = KeywordOptions { top_k, ..KeywordOptions::default() };
            let hits = matcher.search_by_keyword(&query, opts);
            println!("\nFound {} results for: \"{}\"", hits.len(), query);
            for (i, hit) in hits.iter().enumerate() {
                if let Some(record) = store.record(&hit.id) {
                    print_record(i + 1, Some(hit.score), record);
                }
            }
        }
        "reference" => {
            let matcher = KeywordMatcher::new(&store);
            match matcher.find_by_reference(&query) {
                Some(record) => print_record(1, None, record),
                None => println!("\nNo case with reference id \"{}\"", query),
            }
        }
        "code" => {
            let matcher = KeywordMatcher::new(&store);
            let records = matcher.search_by_code(&query, top_k);
            println!("\nFound {} cases under code \"{}\"", records.len(), query);
            for (i, record) in records.iter().enumerate() {
                print_record(i + 1, None, record);
            }
        }
        _ => unreachable!(),
    }
    Ok(())
}
