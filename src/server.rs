//! HTTP server for college matching

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::weights::{CategoryWeights, FactorWeights, CATEGORY_PRESETS, FACTOR_PRESETS};
use crate::{CollegeCandidate, MatchEngine, MatchRequest, MatchResponse, RankOptions, StudentProfile};

/// HTTP request structure; `gpaScale` lets callers send CGPA on a 10- or 100-point scale
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequestHttp {
    pub student: StudentProfile,
    #[serde(default)]
    pub colleges: Vec<CollegeCandidate>,
    #[serde(default)]
    pub options: RankOptions,
    #[serde(default)]
    pub gpa_scale: Option<f64>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub factor_presets: Vec<NamedFactorPreset>,
    pub category_presets: Vec<NamedCategoryPreset>,
}

#[derive(Debug, Serialize)]
pub struct NamedFactorPreset {
    pub name: &'static str,
    pub weights: FactorWeights,
}

#[derive(Debug, Serialize)]
pub struct NamedCategoryPreset {
    pub name: &'static str,
    pub weights: CategoryWeights,
}

/// Match handler
async fn match_handler(
    State(engine): State<Arc<MatchEngine>>,
    payload: Result<Json<MatchRequestHttp>, JsonRejection>,
) -> Result<Json<MatchResponse>, (StatusCode, Json<ErrorResponse>)> {
    // malformed or mistyped bodies are client errors, reported like any other bad request
    let Json(req) = payload.map_err(|rejection| {
        error!("Rejected match request body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Malformed match request".to_string(),
                details: Some(rejection.body_text()),
            }),
        )
    })?;

    info!(
        "Received match request: colleges={}, strategy={:?}, topN={:?}",
        req.colleges.len(),
        req.options.strategy,
        req.options.top_n
    );

    let student = match req.gpa_scale {
        Some(scale) => req.student.with_gpa_scale(scale),
        None => req.student,
    };

    let match_req = MatchRequest {
        student,
        colleges: req.colleges,
        options: req.options,
    };

    match engine.match_colleges(match_req).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Match failed: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid match request".to_string(),
                    details: Some(e.to_string()),
                }),
            ))
        }
    }
}

/// Preset catalog handler
async fn presets_handler() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        factor_presets: FACTOR_PRESETS
            .iter()
            .map(|&(name, weights)| NamedFactorPreset { name, weights })
            .collect(),
        category_presets: CATEGORY_PRESETS
            .iter()
            .map(|&(name, weights)| NamedCategoryPreset { name, weights })
            .collect(),
    })
}

/// Health check handler
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "admitfit".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create and configure the HTTP server
pub fn create_router(engine: Arc<MatchEngine>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/presets", get(presets_handler))
        .route("/match", post(match_handler))
        .with_state(engine)
}

/// Run the HTTP server
pub async fn run_server(engine: Arc<MatchEngine>, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting admitfit server on {}", addr);

    let app = create_router(engine);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
