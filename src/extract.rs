use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::Error;

/// `Json<T>` whose rejection is the crate `Error`, so malformed or
/// wrongly-typed bodies answer `400 {error: ...}`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
