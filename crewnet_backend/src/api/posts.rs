use super::{parse_id, parse_payload, ApiError, ApiResult, AppState};
use crate::store::models::{CreatePostInput, PostRecord};
use crate::store::repositories::PostRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub(crate) async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<PostRecord>> {
    let posts = state.store.with_repositories(|repos| repos.posts().list())?;
    Ok(Json(posts))
}

pub(crate) async fn list_user_posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<PostRecord>> {
    let posts = match parse_id(&id) {
        Some(user_id) => state
            .store
            .with_repositories(|repos| repos.posts().list_for_user(user_id))?,
        None => Vec::new(),
    };
    Ok(Json(posts))
}

pub(crate) async fn create_post(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<(StatusCode, Json<PostRecord>), ApiError> {
    let input: CreatePostInput = parse_payload(body, "Invalid post data")?;
    let post = state
        .store
        .with_repositories(|repos| repos.posts().create(input))?;
    Ok((StatusCode::CREATED, Json(post)))
}
