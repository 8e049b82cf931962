use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::info;
use uuid::Uuid;

use board_db::models::MessagePatch;
use board_types::api::{
    CreateMessageRequest, DeleteMessageResponse, MessageListResponse, MessageResponse,
    UpdateMessageRequest,
};

use crate::error::ApiError;
use crate::state::{AppState, parse_id, run_db};

/// GET /messages
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<MessageListResponse>, ApiError> {
    let messages = run_db(&state, |db| db.list_messages()).await?;
    Ok(Json(MessageListResponse { messages }))
}

/// GET /messages/{id} — an unknown id yields `{"message": null}`, not an error.
pub async fn get_message(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    let message = run_db(&state, move |db| db.get_message(id)).await?;
    Ok(Json(MessageResponse { message }))
}

/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let id = Uuid::new_v4();

    let message = run_db(&state, move |db| {
        db.create_message(id, &req.title, &req.body, req.author)
    })
    .await?;

    info!("Message {} posted by {}", message.id, message.author);
    Ok(Json(MessageResponse {
        message: Some(message),
    }))
}

/// PUT /messages/{id}
pub async fn update_message(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(req) = payload?;
    let patch = MessagePatch {
        title: req.title,
        body: req.body,
        author: req.author,
    };

    let message = run_db(&state, move |db| db.update_message(id, &patch)).await?;
    Ok(Json(MessageResponse { message }))
}

/// DELETE /messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteMessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    if run_db(&state, move |db| db.delete_message(id)).await? {
        info!("Message {} deleted", id);
        Ok(Json(DeleteMessageResponse::deleted(raw_id)))
    } else {
        Ok(Json(DeleteMessageResponse::missing()))
    }
}
