mod config;
mod db;
mod errors;
mod generation;
mod llm_client;
mod marketplace;
mod models;
mod notifier;
mod pipeline;
mod store;

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{info, info_span, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{AppError, RunEnvelope};
use crate::generation::proposal::LlmProposalDrafter;
use crate::generation::relevance::LlmRelevanceScorer;
use crate::llm_client::LlmClient;
use crate::marketplace::FreelancerClient;
use crate::notifier::TelegramNotifier;
use crate::pipeline::{Pipeline, RunSummary};

/// One invocation is one run. The external scheduler reads the printed
/// envelope and the exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load configuration first; nothing runs without it
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            return finish(Err(AppError::Config(format!("{e:#}"))));
        }
    };

    init_tracing(&config.rust_log);
    info!("Starting Scout v{}", env!("CARGO_PKG_VERSION"));

    let run_id = Uuid::new_v4();
    let result = run(Arc::new(config))
        .instrument(info_span!("run", %run_id))
        .await;

    finish(result)
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Wires the production adapters and executes the pipeline once.
async fn run(config: Arc<Config>) -> Result<RunSummary, AppError> {
    let store = store::connect(&config.database_url).await?;

    let llm = LlmClient::new(config.anthropic_api_key.clone()).map_err(anyhow::Error::from)?;
    info!(
        scoring_model = generation::relevance::SCORING_MODEL,
        drafting_model = generation::proposal::DRAFTING_MODEL,
        "LLM client initialized"
    );

    let source = FreelancerClient::new(config.marketplace.clone())?;
    let notifier = TelegramNotifier::new(config.telegram.clone())?;

    let pipeline = Pipeline::new(
        config,
        Arc::new(source),
        store,
        Arc::new(LlmRelevanceScorer(llm.clone())),
        Arc::new(LlmProposalDrafter(llm)),
        Arc::new(notifier),
    );

    pipeline.run().await
}

/// Prints the run envelope on stdout and maps it to the process exit code.
fn finish(result: Result<RunSummary, AppError>) -> ExitCode {
    let (envelope, code) = match result {
        Ok(summary) => (RunEnvelope::success(&summary), ExitCode::SUCCESS),
        Err(e) => (e.into_envelope(), ExitCode::FAILURE),
    };

    match serde_json::to_string(&envelope) {
        Ok(line) => println!("{line}"),
        Err(e) => eprintln!("Failed to encode run envelope: {e}"),
    }
    code
}
