//! urlgate gateway daemon
//!
//! Startup lifecycle: read config from the environment, load a persisted
//! model if one exists, otherwise train from the labeled dataset if one is
//! configured, then serve. A missing dataset is not fatal: the gateway
//! runs with rule lists only and reports `unknown` for unlisted domains.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use urlgate_gateway::config::GatewayConfig;
use urlgate_gateway::AppState;
use urlgate_ml::LabeledDataset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    let state = Arc::new(AppState::new());

    bootstrap_model(&state, &config);

    urlgate_gateway::serve(config.listen, state).await?;
    Ok(())
}

/// Prefer a persisted model; fall back to training from the dataset.
/// Failures are logged, never fatal: the gateway serves untrained.
fn bootstrap_model(state: &AppState, config: &GatewayConfig) {
    if let Some(path) = &config.model_path {
        if path.exists() {
            match state.pipeline.load_model(path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "model loaded");
                    return;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "model load failed");
                }
            }
        }
    }

    let Some(dataset_path) = &config.dataset_path else {
        tracing::info!("no dataset configured, model stays untrained");
        return;
    };

    let trained = LabeledDataset::load_csv(dataset_path)
        .and_then(|dataset| state.pipeline.train_from_dataset(&dataset));
    match trained {
        Ok(report) => {
            tracing::info!(
                samples = report.samples,
                accuracy = report.holdout_accuracy,
                "model trained from dataset"
            );
            if let Some(model_path) = &config.model_path {
                if let Err(e) = state.pipeline.save_model(model_path) {
                    tracing::warn!(path = %model_path.display(), error = %e, "model save failed");
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                path = %dataset_path.display(),
                error = %e,
                "training skipped, model stays untrained"
            );
        }
    }
}
