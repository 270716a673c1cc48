use super::{parse_id, parse_payload, ApiError, ApiResult, AppState};
use crate::store::models::{CommentRecord, CreateCommentInput};
use crate::store::repositories::CommentRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_post_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<CommentRecord>> {
    let comments = match parse_id(&id) {
        Some(post_id) => state
            .store
            .with_repositories(|repos| repos.comments().list_for_post(post_id))?,
        None => Vec::new(),
    };
    Ok(Json(comments))
}

pub(crate) async fn create_comment(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<(StatusCode, Json<CommentRecord>), ApiError> {
    let input: CreateCommentInput = parse_payload(body, "Invalid comment data")?;
    let comment = state
        .store
        .with_repositories(|repos| repos.comments().create(input))?;
    Ok((StatusCode::CREATED, Json(comment)))
}
