use std::env;
use std::sync::Arc;

use hscase_core::config::{expand_path, Config};
use hscase_core::corpus::{CaseStore, CorpusKind};
use hscase_core::types::{Confidence, SourcePath};
use hscase_consolidate::{Consolidation, DualPathConsolidator, Manual, TariffTable};
use hscase_pipeline::{CasePipeline, Dispatcher, HttpOracle, PromptTemplate, RetryPolicy};

const DEFAULT_PREAMBLE: &str = "You are a customs classification expert. Using the reference \
cases below, recommend the most plausible HS code for the user's product and explain your \
reasoning, citing case reference ids.";
const DEFAULT_AGGREGATE_PREAMBLE: &str = "You are a customs classification expert reviewing \
the analyses of several case groups for the same product.";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <classify|candidates> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn corpus_kind(args: &[String]) -> CorpusKind {
    if args.iter().any(|a| a == "--overseas" || a == "-o") {
        CorpusKind::Overseas
    } else {
        CorpusKind::Domestic
    }
}

fn query_from(args: &[String], usage: &str) -> String {
    match args.iter().find(|a| !a.starts_with('-')) {
        Some(q) => q.clone(),
        None => {
            eprintln!("{usage}");
            std::process::exit(1)
        }
    }
}

fn classify(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let query = query_from(args, "Usage: hscase classify \"<product description>\" [--overseas]");
    let kind = corpus_kind(args);
    let data_dir: String = config.get("data.dir").unwrap_or_else(|_| "./data".to_string());
    let data_dir = expand_path(&data_dir);
    let index_dir: String = config
        .get("data.index_dir")
        .unwrap_or_else(|_| "./data/indexes".to_string());
    let index_path = expand_path(&index_dir).join(format!("{}.idx", kind.label()));

    let store = CaseStore::load(kind, &data_dir)?;
    println!("Loaded {} {} cases from {}", store.len(), kind.label(), data_dir.display());
    let documents = store.documents();
    let index = hscase_lexical::cache::load_or_build(&index_path, &documents)?;

    let endpoint: String = config
        .get("oracle.endpoint")
        .unwrap_or_else(|_| "http://127.0.0.1:11434/api/generate".to_string());
    let model: String = config.get("oracle.model").unwrap_or_else(|_| "llama3".to_string());
    let oracle = HttpOracle::new(endpoint, model);
    let dispatcher = Dispatcher::new(Arc::new(oracle), RetryPolicy::default());

    let template = PromptTemplate {
        preamble: config
            .get("prompt.classify_preamble")
            .unwrap_or_else(|_| DEFAULT_PREAMBLE.to_string()),
        aggregate_preamble: config
            .get("prompt.aggregate_preamble")
            .unwrap_or_else(|_| DEFAULT_AGGREGATE_PREAMBLE.to_string()),
        source_label: kind.label().to_string(),
    };
    let top_k: usize = config
        .get("search.top_k")
        .unwrap_or(hscase_lexical::index::DEFAULT_TOP_K);
    let min_similarity: f32 = config
        .get("search.min_similarity")
        .unwrap_or(hscase_lexical::index::DEFAULT_MIN_SIMILARITY);
    let pipeline = CasePipeline::new(dispatcher, template).with_breadth(top_k, min_similarity);

    let outcome = tokio::runtime::Runtime::new()?
        .block_on(async { pipeline.run(&store, &index, &query).await });

    println!("\n📋 Retrieved {} similar cases", outcome.retrieved);
    for partial in &outcome.partials {
        println!(
            "  group {} answered in {} ms",
            partial.group_id + 1,
            partial.elapsed.as_millis()
        );
    }
    println!("\n{}", outcome.final_verdict);
    Ok(())
}

fn candidates(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let query = query_from(args, "Usage: hscase candidates \"<product description>\"");
    let tariff_path: String = config
        .get("data.tariff_table")
        .unwrap_or_else(|_| "./data/tariff_table.json".to_string());
    let manual_path: String = config
        .get("data.manual")
        .unwrap_or_else(|_| "./data/manual.json".to_string());

    let tariff = TariffTable::load(&expand_path(&tariff_path))?;
    let manual = Manual::load(&expand_path(&manual_path))?;
    println!("Tariff lines: {}  Manual entries: {}", tariff.len(), manual.entries().len());

    let consolidator = DualPathConsolidator::new(&tariff, &manual);
    match consolidator.consolidate(&query) {
        Consolidation::NoCandidate => {
            println!("\nNo candidate codes found for: \"{query}\"");
        }
        Consolidation::Candidates(candidates) => {
            println!("\nCandidate codes for: \"{query}\"");
            for (i, candidate) in candidates.iter().enumerate() {
                let confidence = match candidate.confidence {
                    Confidence::High => "HIGH",
                    Confidence::Medium => "MEDIUM",
                };
                let sources: Vec<&str> = candidate
                    .sources
                    .iter()
                    .map(|s| match s {
                        SourcePath::TariffToManual => "tariff+manual",
                        SourcePath::DirectManual => "manual",
                    })
                    .collect();
                println!(
                    "\n  {}. code {}  score={:.3}  confidence={}  via {}",
                    i + 1,
                    candidate.hs_code,
                    candidate.score,
                    confidence,
                    sources.join(", ")
                );
                if !candidate.tariff_name.is_empty() {
                    println!("     Tariff: {}", candidate.tariff_name);
                }
                if !candidate.manual_text.is_empty() {
                    println!("     Manual: {}", candidate.manual_text);
                }
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "classify" => classify(&config, &args),
        "candidates" => candidates(&config, &args),
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
}
