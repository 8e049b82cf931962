pub mod error;
pub mod health;
pub mod messages;
pub mod state;
pub mod users;

use std::time::Duration;

use axum::{BoxError, Router, error_handling::HandleErrorLayer, routing::get};
use tower::ServiceBuilder;
use tower::timeout::{TimeoutLayer, error::Elapsed};

pub use error::ApiError;
pub use state::{AppState, AppStateInner};

/// All board routes. CORS and tracing are layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/{id}",
            get(messages::get_message)
                .put(messages::update_message)
                .delete(messages::delete_message),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        .route("/health", get(health::health))
        .with_state(state)
}

/// Bound every request on `router` by `timeout`. Expiry answers with the
/// `request_timeout` error body like any other failure.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(timeout_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn timeout_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        ApiError::Internal
    }
}
