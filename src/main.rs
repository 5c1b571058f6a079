use std::error::Error;
use std::sync::Arc;

mod session;

use ai_llm_service::config::default_config::{config_answer, config_embedding};
use ai_llm_service::service_profiles::LlmServiceProfiles;
use sds_store::{SdsStore, SdsStoreConfig, embed::LlmEmbedder};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Environment variables may come from a .env file or the process
    // environment; both are fine.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("default env filter is valid");

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    // Credential gate: both profiles resolve here, before any pipeline
    // activity. A missing credential halts the process with the config error.
    let svc = build_profiles()?;

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("ingest") => {
            let Some(dir) = args.get(2) else {
                eprintln!("usage: sds-chat ingest <sheets-dir>");
                std::process::exit(2);
            };
            run_ingest(dir, svc).await?;
        }
        Some("chat") | None => session::run(svc).await?,
        Some(other) => {
            eprintln!("unknown command: {other}");
            eprintln!("usage: sds-chat [chat | ingest <sheets-dir>]");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Resolves the answer and embedding profiles from the environment.
fn build_profiles() -> Result<Arc<LlmServiceProfiles>, Box<dyn Error>> {
    let answer = config_answer()?;
    let embedding = config_embedding()?;
    Ok(Arc::new(LlmServiceProfiles::new(answer, embedding)))
}

/// Runs the offline batch ingestion of a sheets directory.
async fn run_ingest(dir: &str, svc: Arc<LlmServiceProfiles>) -> Result<(), Box<dyn Error>> {
    let cfg = SdsStoreConfig::from_env();
    let embedder = LlmEmbedder::new(svc, cfg.embedding_dim);
    let store = SdsStore::new(cfg)?;

    let report = sds_ingest::ingest_dir(dir, &store, &embedder).await?;
    println!(
        "Ingestion finished: {} files found, {} empty documents skipped, {} records indexed.",
        report.found, report.skipped_empty, report.indexed
    );

    Ok(())
}
