//! Norms REST API endpoints
//!
//! ## Endpoints
//!
//! - `GET /api/v1/norms` - List stored norm guids
//! - `GET /api/v1/norms/:guid` - Load a single norm
//! - `GET /api/v1/norms/:guid/eli` - Derive the ELI of a norm
//! - `GET /api/health` - Health check

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::api::schemas::NormResponseSchema;
use crate::database::NormRepository;

/// Build the norms router backed by the given connection pool
pub fn create_norm_router(pool: PgPool) -> Router {
    let repository = NormRepository::new(pool);

    Router::new()
        .route("/api/v1/norms", get(list_norms))
        .route("/api/v1/norms/:guid", get(get_norm))
        .route("/api/v1/norms/:guid/eli", get(get_norm_eli))
        .route("/api/health", get(health_check))
        .with_state(repository)
}

/// Response from the ELI endpoint
#[derive(Debug, Clone, Serialize)]
pub struct EliResponse {
    pub eli: String,
}

/// GET /api/health
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/v1/norms
async fn list_norms(
    State(repository): State<NormRepository>,
) -> Result<Json<Vec<Uuid>>, (StatusCode, String)> {
    let guids = repository.list_norm_guids().await.map_err(internal_error)?;
    Ok(Json(guids))
}

/// GET /api/v1/norms/:guid
async fn get_norm(
    State(repository): State<NormRepository>,
    Path(guid): Path<Uuid>,
) -> Result<Json<NormResponseSchema>, (StatusCode, String)> {
    let norm = repository.load_norm(guid).await.map_err(internal_error)?;

    match norm {
        Some(norm) => Ok(Json(NormResponseSchema::from_domain(&norm))),
        None => Err((StatusCode::NOT_FOUND, format!("No norm found for {guid}"))),
    }
}

/// GET /api/v1/norms/:guid/eli
async fn get_norm_eli(
    State(repository): State<NormRepository>,
    Path(guid): Path<Uuid>,
) -> Result<Json<EliResponse>, (StatusCode, String)> {
    let norm = repository
        .load_norm(guid)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("No norm found for {guid}")))?;

    match norm.eli() {
        Ok(eli) => Ok(Json(EliResponse {
            eli: eli.to_string(),
        })),
        Err(err) => Err((StatusCode::UNPROCESSABLE_ENTITY, err.to_string())),
    }
}

fn internal_error(err: anyhow::Error) -> (StatusCode, String) {
    error!("Norms API failure: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}
