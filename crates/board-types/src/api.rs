use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Message, User};

// -- Users --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: Option<User>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

// -- Messages --

/// Body of `POST /messages`. Extra fields are ignored, as the store is schema-less.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub title: String,
    pub body: String,
    pub author: Uuid,
}

/// Body of `PUT /messages/{id}`. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMessageRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: Option<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<Message>,
}

pub const DELETED_TEXT: &str = "Successfully deleted.";
pub const MISSING_TEXT: &str = "Message does not exist.";

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteMessageResponse {
    pub message: String,
    /// The id exactly as the client sent it in the path.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl DeleteMessageResponse {
    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            message: DELETED_TEXT.to_string(),
            id: Some(id.into()),
        }
    }

    pub fn missing() -> Self {
        Self {
            message: MISSING_TEXT.to_string(),
            id: None,
        }
    }
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `malformed_id`.
    pub code: String,
    pub message: String,
}

// -- Health --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
