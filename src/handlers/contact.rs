use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::post, Extension, Json, Router};

use crate::{
    extract::JsonBody,
    models::{contact::ContactMessageDto, response::Response},
    AppState, Result,
};

pub fn contact_handler() -> Router {
    Router::new().route("/contact", post(submit_contact))
}

async fn submit_contact(
    Extension(app_state): Extension<Arc<AppState>>,
    JsonBody(message): JsonBody<ContactMessageDto>,
) -> Result<impl IntoResponse> {
    app_state
        .contact_service
        .submit(message)
        .await
        .map_err(|e| e.upstream("Failed to send message"))?;

    Ok((
        StatusCode::OK,
        Json(Response {
            status: "success",
            message: "Message sent successfully!".to_string(),
        }),
    ))
}
