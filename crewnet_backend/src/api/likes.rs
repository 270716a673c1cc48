use super::{parse_id, parse_payload, ApiError, ApiResult, AppState};
use crate::store::models::{CreateLikeInput, LikeRecord};
use crate::store::repositories::LikeRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_post_likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<LikeRecord>> {
    let likes = match parse_id(&id) {
        Some(post_id) => state
            .store
            .with_repositories(|repos| repos.likes().list_for_post(post_id))?,
        None => Vec::new(),
    };
    Ok(Json(likes))
}

pub(crate) async fn create_like(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<(StatusCode, Json<LikeRecord>), ApiError> {
    let input: CreateLikeInput = parse_payload(body, "Invalid like data")?;
    let like = state
        .store
        .with_repositories(|repos| repos.likes().create(input))?;
    Ok((StatusCode::CREATED, Json(like)))
}

/// Unlike is a 204 no matter what: a body that does not name a (user, post)
/// pair simply deletes nothing.
pub(crate) async fn delete_like(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<StatusCode, ApiError> {
    let input = body.and_then(|Json(value)| serde_json::from_value::<CreateLikeInput>(value).ok());
    if let Some(input) = input {
        state
            .store
            .with_repositories(|repos| repos.likes().delete(input.user_id, input.post_id))?;
    }
    Ok(StatusCode::NO_CONTENT)
}
