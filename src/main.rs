//! Composition root for the policy assistant backend.
//!
//! Wires environment configuration into the LLM service profiles and the RAG
//! pipeline, then runs one operation from the command line. Transport
//! concerns (HTTP routing, authentication, upload handling, PDF text
//! extraction) belong to the serving layer; this binary consumes plain UTF-8
//! text files.

use std::env;
use std::error::Error;
use std::sync::Arc;

use ai_llm_service::config::default_config;
use ai_llm_service::service_profiles::LlmServiceProfiles;
use ai_llm_service::telemetry;
use rag_store::{LlmCompletion, LlmEmbedder, RagConfig, RagPipeline};
use tracing::{Level, info, warn};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};
use vector_store::VectorDb;

const USAGE: &str = "usage:
  policy-ai-backend ingest <collection> <file>
  policy-ai-backend answer <file> <question...>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Environment may come from the shell; a missing .env file is fine.
    let _ = dotenvy::dotenv();

    // The LLM service brings its own fmt layer; scope the application layer
    // to everything else so events are not rendered twice.
    let app_events =
        filter::filter_fn(|meta| !meta.target().starts_with(telemetry::TARGET_PREFIX));
    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(fmt::layer().with_target(false).with_filter(app_events))
        .with(telemetry::layer())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    match (command.as_str(), rest) {
        ("ingest", [collection, path]) => {
            let pipeline = build_pipeline().await?;
            let text = std::fs::read_to_string(path)?;
            let collection = pipeline.ingest(&text, collection).await?;
            info!(
                collection = %collection,
                entries = pipeline.index().len(&collection)?,
                dimensions = pipeline.index().dimensions(&collection)?,
                "ingestion finished"
            );
        }
        ("answer", [path, question @ ..]) if !question.is_empty() => {
            let pipeline = build_pipeline().await?;
            let text = std::fs::read_to_string(path)?;
            let question = question.join(" ");
            let collection = pipeline.config().collection.clone();
            pipeline.ingest(&text, &collection).await?;
            let result = pipeline.ask(&question, &collection, None).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Builds the service profiles and the pipeline from environment
/// configuration, logging a health snapshot of the configured backends.
async fn build_pipeline() -> Result<RagPipeline, Box<dyn Error>> {
    let completion_cfg = default_config::config_completion()?;
    let embedding_cfg = default_config::config_embedding()?;
    let embedding_dim = default_config::embedding_dimension()?;

    let svc = Arc::new(LlmServiceProfiles::new(completion_cfg, embedding_cfg, None)?);

    for status in svc.health_all().await {
        if status.ok {
            info!(
                provider = %status.provider,
                endpoint = %status.endpoint,
                latency_ms = status.latency_ms,
                "LLM backend healthy"
            );
        } else {
            warn!(
                provider = %status.provider,
                endpoint = %status.endpoint,
                message = %status.message,
                "LLM backend not healthy"
            );
        }
    }

    let pipeline = RagPipeline::new(
        Arc::new(LlmEmbedder::new(svc.clone(), embedding_dim)),
        Arc::new(LlmCompletion::new(svc)),
        VectorDb::new(),
        RagConfig::from_env()?,
    )?;
    Ok(pipeline)
}
