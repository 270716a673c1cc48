use super::{parse_id, parse_payload, ApiError, ApiResult, AppState};
use crate::store::models::{ConnectionRecord, ConnectionStatus, CreateConnectionInput};
use crate::store::repositories::ConnectionRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: ConnectionStatus,
}

pub(crate) async fn list_user_connections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<ConnectionRecord>> {
    let connections = match parse_id(&id) {
        Some(user_id) => state
            .store
            .with_repositories(|repos| repos.connections().list_for_user(user_id))?,
        None => Vec::new(),
    };
    Ok(Json(connections))
}

pub(crate) async fn create_connection(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<(StatusCode, Json<ConnectionRecord>), ApiError> {
    let input: CreateConnectionInput = parse_payload(body, "Invalid connection data")?;
    let connection = state
        .store
        .with_repositories(|repos| repos.connections().create(input))?;
    Ok((StatusCode::CREATED, Json(connection)))
}

pub(crate) async fn update_connection_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<serde_json::Value>>,
) -> ApiResult<ConnectionRecord> {
    // Status is checked before the id: a bad payload is a 400 even when
    // the id is unknown.
    let request: UpdateStatusRequest = parse_payload(body, "Invalid status")?;
    let id = parse_id(&id).ok_or_else(|| ApiError::NotFound("Connection not found".to_string()))?;
    let connection = state
        .store
        .with_repositories(|repos| repos.connections().update_status(id, request.status))?;
    Ok(Json(connection))
}
