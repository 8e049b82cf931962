use axum::{Json, extract::State};

use board_types::api::HealthResponse;

use crate::error::ApiError;
use crate::state::{AppState, run_db};

/// GET /health — succeeds only if the database answers.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    run_db(&state, |db| db.ping()).await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
