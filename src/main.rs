//! Feature-extraction batch entrypoint.
//! Reads one item per line, runs the pipeline once, writes the sparse
//! feature file for the downstream classifier.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use arabic_tweet_sentiment::analyzer::{DynAnalyzer, EchoAnalyzer, MadamiraClient};
use arabic_tweet_sentiment::{io, LexiconStore, Pipeline, ResourceConfig, VocabStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op elsewhere.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut only_ngrams = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--only-ngrams" => only_ngrams = true,
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    let [input, output] = paths.as_slice() else {
        bail!("usage: arabic-tweet-sentiment <input> <output> [--only-ngrams]");
    };

    let config = ResourceConfig::load_default();
    let lexicons = LexiconStore::load(&config);
    let vocab = VocabStore::load(&config.ngrams_dir);
    let analyzer: DynAnalyzer = match config.analyzer_url.as_deref() {
        Some(url) => Arc::new(MadamiraClient::new(url)),
        None => {
            info!("no analyzer endpoint configured; lemmas fall back to surface forms");
            Arc::new(EchoAnalyzer)
        }
    };
    info!(
        analyzer = analyzer.name(),
        arsenl = lexicons.arsenl.len(),
        arasenti = lexicons.arasenti.len(),
        dahl = lexicons.dahl.len(),
        emojis = lexicons.emojis.len(),
        negation_terms = lexicons.negation_terms.len(),
        ngram_columns = vocab.total_columns(),
        "resources loaded"
    );

    let items = io::read_items(input)?;
    let pipeline = Pipeline::new(lexicons, vocab, analyzer);
    let lines = pipeline.feature_lines(&items, only_ngrams).await;
    io::write_feature_file(output, &lines)?;
    info!(
        items = items.len(),
        only_ngrams,
        output = %output.display(),
        "feature file written"
    );
    Ok(())
}
