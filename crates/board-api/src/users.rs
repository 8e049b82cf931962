use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::{error, info};
use uuid::Uuid;

use board_types::api::{CreateUserRequest, UserListResponse, UserResponse};

use crate::error::ApiError;
use crate::state::{AppState, parse_id, run_db};

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(req) = payload?;

    let name_len = req.username.chars().count();
    if !(3..=32).contains(&name_len) {
        return Err(ApiError::InvalidBody(
            "username must be 3 to 32 characters".to_string(),
        ));
    }
    if req.password.chars().count() < 8 {
        return Err(ApiError::InvalidBody(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = hash_password(req.password).await?;
    let id = Uuid::new_v4();
    let username = req.username;

    let user = run_db(&state, move |db| db.create_user(id, &username, &password_hash)).await?;

    info!("User {} registered as '{}'", user.id, user.username);
    Ok(Json(UserResponse { user: Some(user) }))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, ApiError> {
    let users = run_db(&state, |db| db.list_users()).await?;
    Ok(Json(UserListResponse { users }))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    let user = run_db(&state, move |db| db.get_user(id)).await?;
    Ok(Json(UserResponse { user }))
}

/// Argon2id with a random salt, computed off the async runtime.
async fn hash_password(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal
    })?
    .map_err(|e| {
        error!("Password hashing failed: {}", e);
        ApiError::Internal
    })
}
