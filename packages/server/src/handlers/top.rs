use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, like_error};
use crate::extractors::json::AppJson;
use crate::models::top::{LikesResponse, Top, TopListQuery, TopPayload};
use crate::routes::TOPS_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Tops",
    operation_id = "listTops",
    summary = "List tops",
    description = "Returns every top with its five items. When `title` is given, only tops whose title contains it (case-sensitive) are returned.",
    params(TopListQuery),
    responses(
        (status = 200, description = "List of tops", body = Vec<Top>),
    ),
)]
#[instrument(skip(state, query), fields(title = ?query.title))]
pub async fn list_tops(
    State(state): State<AppState>,
    Query(query): Query<TopListQuery>,
) -> Result<Json<Vec<Top>>, AppError> {
    let tops = state.tops.list(query.title.as_deref()).await?;
    Ok(Json(tops))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tops",
    operation_id = "getTop",
    summary = "Get a top by ID",
    params(("id" = String, Path, description = "Top ID")),
    responses(
        (status = 200, description = "Top details", body = Top),
        (status = 404, description = "Top not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_top(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Top>, AppError> {
    Ok(Json(state.tops.get(&id).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Tops",
    operation_id = "createTop",
    summary = "Create a top",
    description = "Creates a top with exactly five items at positions 1 to 5. The id is generated by the server and must not be sent. The `Location` header points at the new resource.",
    request_body = TopPayload,
    responses(
        (status = 201, description = "Top created", body = Top),
        (status = 400, description = "Invalid payload (VALIDATION_ERROR) or id supplied (ID_CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_top(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TopPayload>,
) -> Result<impl IntoResponse, AppError> {
    let top = state.tops.create(payload).await?;
    let location = format!("{TOPS_PATH}/{}", top.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(top)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Tops",
    operation_id = "updateTop",
    summary = "Replace the title and item names of a top",
    description = "The body must carry the same id as the path and pass the same validation as create. Only the title and the item names are applied; like counters are kept.",
    params(("id" = String, Path, description = "Top ID")),
    request_body = TopPayload,
    responses(
        (status = 200, description = "Top updated", body = Top),
        (status = 400, description = "Invalid payload (VALIDATION_ERROR) or id mismatch (ID_CONFLICT)", body = ErrorBody),
        (status = 404, description = "Top not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_top(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TopPayload>,
) -> Result<Json<Top>, AppError> {
    Ok(Json(state.tops.update(&id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tops",
    operation_id = "deleteTop",
    summary = "Delete a top and its items",
    params(("id" = String, Path, description = "Top ID")),
    responses(
        (status = 200, description = "Top deleted"),
        (status = 404, description = "Top not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_top(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.tops.delete(&id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    patch,
    path = "/{id}/like",
    tag = "Likes",
    operation_id = "likeTop",
    summary = "Add one like to a top",
    params(("id" = String, Path, description = "Top ID")),
    responses(
        (status = 200, description = "New like count", body = LikesResponse),
        (status = 400, description = "Top not found (BAD_REQUEST)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn like_top(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LikesResponse>, AppError> {
    let likes = state.tops.like_top(&id).await.map_err(like_error)?;
    Ok(Json(LikesResponse { likes }))
}

#[utoipa::path(
    patch,
    path = "/{id}/items/{position}/like",
    tag = "Likes",
    operation_id = "likeItem",
    summary = "Add one like to an item of a top",
    params(
        ("id" = String, Path, description = "Top ID"),
        ("position" = i32, Path, description = "Item position, 1 to 5"),
    ),
    responses(
        (status = 200, description = "New like count", body = LikesResponse),
        (status = 400, description = "Top or position not found (BAD_REQUEST)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn like_item(
    State(state): State<AppState>,
    Path((id, position)): Path<(String, i32)>,
) -> Result<Json<LikesResponse>, AppError> {
    let likes = state
        .tops
        .like_item(&id, position)
        .await
        .map_err(like_error)?;
    Ok(Json(LikesResponse { likes }))
}
