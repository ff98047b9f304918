//! API Handlers

use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use urlgate_common::{GateError, Verdict};
use urlgate_rules::RuleStats;
use urlgate_verify::PipelineStats;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error body returned for rejected requests
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Human-readable cause
    pub error: String,
}

// === Verification Handlers ===

/// Verify request payload
#[derive(Deserialize)]
pub struct VerifyRequest {
    /// URL to classify
    pub url: String,
}

/// Verify response payload
#[derive(Serialize)]
pub struct VerifyResponse {
    /// Three-way verdict
    pub status: Verdict,
}

/// Classify a URL against the lists and the model fallback
pub async fn verify_url(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> impl IntoResponse {
    match state.pipeline.classify(&req.url) {
        Ok(status) => (StatusCode::OK, Json(VerifyResponse { status })).into_response(),
        Err(GateError::InvalidUrl(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid URL format".to_string(),
            }),
        )
            .into_response(),
        // classify never surfaces these, but the mapping stays explicit
        Err(
            e @ (GateError::InvalidInput(_)
            | GateError::NotTrained
            | GateError::CorruptModel(_)
            | GateError::Io(_)),
        ) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

// === Operator List Handlers ===

/// List mutation payload
#[derive(Deserialize)]
pub struct ListMutationRequest {
    /// Domain to add (host only, no scheme)
    pub domain: String,
}

/// List mutation outcome
#[derive(Serialize)]
pub struct ListMutationResponse {
    /// The domain as submitted
    pub domain: String,
    /// False when the domain was already listed
    pub added: bool,
}

/// Add a domain to the blacklist
pub async fn add_to_blacklist(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<ListMutationRequest>,
) -> Json<ListMutationResponse> {
    let added = state.pipeline.add_to_blacklist(&req.domain);
    Json(ListMutationResponse {
        domain: req.domain,
        added,
    })
}

/// Add a domain to the whitelist
pub async fn add_to_whitelist(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<ListMutationRequest>,
) -> Json<ListMutationResponse> {
    let added = state.pipeline.add_to_whitelist(&req.domain);
    Json(ListMutationResponse {
        domain: req.domain,
        added,
    })
}

// === Statistics Handlers ===

/// Combined pipeline and rule statistics
#[derive(Serialize)]
pub struct StatsResponse {
    /// Pipeline decision-path counters
    pub pipeline: PipelineStats,
    /// Rule list counters and sizes
    pub rules: RuleStats,
}

/// Statistics endpoint
pub async fn stats(Extension(state): Extension<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        pipeline: state.pipeline.stats(),
        rules: state.pipeline.rules().stats(),
    })
}

/// Metrics endpoint
pub async fn metrics(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let pipeline = state.pipeline.stats();
    let rules = state.pipeline.rules().stats();

    let metrics = format!(
        r#"# HELP urlgate_classified_total Valid URLs classified
# TYPE urlgate_classified_total counter
urlgate_classified_total {}

# HELP urlgate_rule_verdicts_total Verdicts decided by the curated lists
# TYPE urlgate_rule_verdicts_total counter
urlgate_rule_verdicts_total {}

# HELP urlgate_model_verdicts_total Verdicts decided by the model fallback
# TYPE urlgate_model_verdicts_total counter
urlgate_model_verdicts_total {}

# HELP urlgate_degraded_total Fallback failures degraded to unknown
# TYPE urlgate_degraded_total counter
urlgate_degraded_total {}

# HELP urlgate_blacklist_size Current blacklist size
# TYPE urlgate_blacklist_size gauge
urlgate_blacklist_size {}

# HELP urlgate_whitelist_size Current whitelist size
# TYPE urlgate_whitelist_size gauge
urlgate_whitelist_size {}
"#,
        pipeline.classified,
        pipeline.rule_verdicts,
        pipeline.model_verdicts,
        pipeline.degraded,
        rules.blacklist_size,
        rules.whitelist_size,
    );

    (StatusCode::OK, metrics)
}
