use std::{env, fs, path::PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use hscase_core::config::{expand_path, Config};
use hscase_core::corpus::{CaseStore, CorpusKind};
use hscase_lexical::{cache, LexicalIndex};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut force = false;
    let mut data_dir = None;
    for arg in &args {
        match arg.as_str() {
            "--force" | "-f" => force = true,
            _ if !arg.starts_with('-') => data_dir = Some(PathBuf::from(arg)),
            _ => {}
        }
    }
    let data_dir = data_dir.unwrap_or_else(|| {
        let dir: String = config.get("data.dir").unwrap_or_else(|_| "./data".to_string());
        expand_path(dir)
    });
    let index_dir: String = config
        .get("data.index_dir")
        .unwrap_or_else(|_| "./data/indexes".to_string());
    let index_dir = expand_path(index_dir);

    println!("Case Index Builder\n==================");
    println!("Data directory:  {}", data_dir.display());
    println!("Index directory: {}", index_dir.display());
    if force {
        println!("⚠️  Rebuilding from scratch (--force)");
    }
    fs::create_dir_all(&index_dir)?;

    for kind in [CorpusKind::Domestic, CorpusKind::Overseas] {
        let store = CaseStore::load(kind, &data_dir)?;
        if store.is_empty() {
            println!("\n{}: no records found, skipping", kind.label());
            continue;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        bar.set_message(format!("indexing {} ({} cases)", kind.label(), store.len()));
        bar.enable_steady_tick(std::time::Duration::from_millis(100));

        let documents = store.documents();
        let index_path = index_dir.join(format!("{}.idx", kind.label()));
        let index = if force {
            let index = LexicalIndex::build(&documents);
            cache::save(&index_path, &index, cache::fingerprint(&documents))?;
            index
        } else {
            cache::load_or_build(&index_path, &documents)?
        };
        bar.finish_with_message(format!(
            "{}: {} documents indexed -> {}",
            kind.label(),
            index.len(),
            index_path.display()
        ));
    }

    println!("\n✅ Index build completed");
    println!("💡 To search, use: cargo run --bin hscase-search '<query>'");
    Ok(())
}
