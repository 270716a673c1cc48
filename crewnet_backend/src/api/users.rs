use super::{parse_id, parse_payload, ApiError, ApiResult, AppState};
use crate::store::models::{CreateUserInput, UserRecord};
use crate::store::repositories::UserRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    api_port: u16,
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        api_port: state.config.api_port,
    })
}

pub(crate) async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserRecord>> {
    let users = state.store.with_repositories(|repos| repos.users().list())?;
    Ok(Json(users))
}

pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserRecord> {
    let user = match parse_id(&id) {
        Some(id) => state
            .store
            .with_repositories(|repos| repos.users().get(id))?,
        None => None,
    };
    match user {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound("User not found".to_string())),
    }
}

pub(crate) async fn create_user(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<(StatusCode, Json<UserRecord>), ApiError> {
    let input: CreateUserInput = parse_payload(body, "Invalid user data")?;
    let user = state
        .store
        .with_repositories(|repos| repos.users().create(input))?;
    Ok((StatusCode::CREATED, Json(user)))
}
