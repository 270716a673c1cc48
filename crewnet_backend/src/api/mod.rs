mod comments;
mod connections;
mod likes;
mod posts;
mod users;

use crate::config::CrewnetConfig;
use crate::store::{Store, StoreError};
use anyhow::Result;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: CrewnetConfig,
    pub store: Store,
}

pub(crate) type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl ApiError {
    fn into_response_parts(self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse { message: msg }),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse { message: msg }),
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "internal server error".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_response_parts();
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionNotFound(_) => {
                ApiError::NotFound("Connection not found".to_string())
            }
            StoreError::Poisoned => ApiError::Internal(err.into()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

/// Decodes a request body into an entity's insert shape. A missing body or
/// any shape mismatch is a 400 carrying the entity-specific message.
pub(crate) fn parse_payload<T: DeserializeOwned>(
    body: Option<Json<serde_json::Value>>,
    message: &str,
) -> Result<T, ApiError> {
    let Some(Json(value)) = body else {
        return Err(ApiError::BadRequest(message.to_string()));
    };
    serde_json::from_value(value).map_err(|err| {
        tracing::debug!(error = %err, "rejected request payload");
        ApiError::BadRequest(message.to_string())
    })
}

/// Path ids are matched as strings; anything that does not parse as a plain
/// integer behaves like an id no row has.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(users::health_handler))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/:id", get(users::get_user))
        .route("/api/users/:id/posts", get(posts::list_user_posts))
        .route(
            "/api/users/:id/connections",
            get(connections::list_user_connections),
        )
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/:id/comments", get(comments::list_post_comments))
        .route("/api/posts/:id/likes", get(likes::list_post_likes))
        .route("/api/comments", post(comments::create_comment))
        .route("/api/connections", post(connections::create_connection))
        .route(
            "/api/connections/:id",
            patch(connections::update_connection_status),
        )
        .route(
            "/api/likes",
            post(likes::create_like).delete(likes::delete_like),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Tries to bind to the given port, or finds the next available port
async fn find_available_port(start_port: u16) -> Result<(TcpListener, u16)> {
    const MAX_PORT_ATTEMPTS: u16 = 100;

    for offset in 0..MAX_PORT_ATTEMPTS {
        // The scan stops at the top of the port range rather than wrapping.
        let Some(port) = start_port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok((listener, port)),
            Err(e) => {
                if offset == 0 {
                    tracing::debug!(port, error = %e, "Port in use, trying next port");
                }
                continue;
            }
        }
    }

    anyhow::bail!(
        "Could not find available port in range {}-{}",
        start_port,
        start_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
    )
}

pub async fn serve_http(config: CrewnetConfig, store: Store) -> Result<()> {
    let state = AppState {
        config: config.clone(),
        store,
    };
    let app = router(state);

    let (listener, actual_port) = find_available_port(config.api_port).await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], actual_port));

    if actual_port != config.api_port {
        tracing::warn!(
            requested_port = config.api_port,
            actual_port,
            "Configured port was in use, bound to next available port"
        );
    }

    tracing::info!(?addr, "HTTP server listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
