use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    extract::JsonBody,
    models::posts::{Category, CreatePostDto},
    AppState, Error, Result,
};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/blogs", get(get_posts).post(create_post))
        .route("/blogs/summaries", get(get_post_cards))
        .route("/blogs/{id}", get(get_post))
        .route("/categories", get(get_categories))
}

async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state
        .posts_service
        .get_posts()
        .await
        .map_err(|e| e.upstream("Failed to fetch blogs"))?;

    Ok((StatusCode::OK, Json(posts)))
}

async fn get_post_cards(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let cards = app_state
        .posts_service
        .get_post_cards()
        .await
        .map_err(|e| e.upstream("Failed to fetch blogs"))?;

    Ok((StatusCode::OK, Json(cards)))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    JsonBody(new_post): JsonBody<CreatePostDto>,
) -> Result<impl IntoResponse> {
    let post = app_state
        .posts_service
        .create_post(new_post)
        .await
        .map_err(|e| e.upstream("Failed to create blog post"))?;

    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    match app_state.posts_service.get_post_detail(&post_id).await {
        Ok(detail) => Ok((StatusCode::OK, Json(detail)).into_response()),
        Err(Error::NotFound) => Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Article not found" })),
        )
            .into_response()),
        Err(e) => Err(e.upstream("Failed to fetch blogs")),
    }
}

async fn get_categories() -> impl IntoResponse {
    Json(Category::ALL)
}
