use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};

use crate::{extract::JsonBody, models::users::CreateUserDto, AppState, Result};

pub fn users_handler() -> Router {
    Router::new().route("/create-user", post(create_user))
}

async fn create_user(
    Extension(app_state): Extension<Arc<AppState>>,
    JsonBody(new_user): JsonBody<CreateUserDto>,
) -> Result<impl IntoResponse> {
    let user = app_state
        .users_service
        .create_user(new_user)
        .await
        .map_err(|e| e.upstream("Failed to create user"))?;

    Ok(Json(user))
}
