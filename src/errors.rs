use std::{borrow::Cow, collections::BTreeMap, fmt};

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use validator::{ValidationErrors, ValidationErrorsKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound,
    MissingFields,
    BadRequest(String),
    Validation(ValidationErrors),
    DatabaseError(sqlx::Error),
    MailError(String),
    InternalServerError,
    Upstream(&'static str),
}

impl Error {
    /// Replaces a collaborator failure with the route's generic message.
    /// Client-correctable errors pass through untouched.
    pub fn upstream(self, message: &'static str) -> Self {
        match self {
            Self::DatabaseError(_) | Self::MailError(_) | Self::InternalServerError => {
                Self::Upstream(message)
            }
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "resource not found"),
            Self::MissingFields => write!(f, "missing required fields"),
            Self::BadRequest(msg) => write!(f, "bad request: {msg}"),
            Self::Validation(errors) => write!(f, "validation failed: {errors}"),
            Self::DatabaseError(err) => write!(f, "database error: {err}"),
            Self::MailError(msg) => write!(f, "mail error: {msg}"),
            Self::InternalServerError => write!(f, "internal server error"),
            Self::Upstream(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Flattens validator output into `{ field: [message, ...] }`.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut fields = BTreeMap::new();

    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(errs) = kind {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .clone()
                        .unwrap_or_else(|| Cow::Owned(format!("{field} is invalid")))
                        .into_owned()
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
    }

    fields
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "Resource not found" })),
            Self::MissingFields => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing required fields" }),
            ),
            Self::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Self::Validation(ref errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid input", "fields": field_messages(errors) }),
            ),
            Self::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Database error" }),
            ),
            Self::MailError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Mail delivery error" }),
            ),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
            Self::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        error!("Database error: {:?}", err);
        Self::DatabaseError(err)
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        error!("Migration error: {:?}", err);
        Self::DatabaseError(err.into())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<lettre::error::Error> for Error {
    fn from(err: lettre::error::Error) -> Self {
        error!("Failed to build email: {:?}", err);
        Self::MailError(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for Error {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        error!("SMTP error: {:?}", err);
        Self::MailError(err.to_string())
    }
}

impl From<lettre::address::AddressError> for Error {
    fn from(err: lettre::address::AddressError) -> Self {
        error!("Invalid email address: {:?}", err);
        Self::MailError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_hides_collaborator_failures() {
        let err = Error::MailError("connection refused".to_string()).upstream("Failed to send");
        assert!(matches!(err, Error::Upstream("Failed to send")));

        let err = Error::InternalServerError.upstream("Failed to fetch blogs");
        assert!(matches!(err, Error::Upstream("Failed to fetch blogs")));
    }

    #[test]
    fn upstream_keeps_client_errors() {
        assert!(matches!(
            Error::MissingFields.upstream("Failed to create blog post"),
            Error::MissingFields
        ));
        assert!(matches!(Error::NotFound.upstream("x"), Error::NotFound));
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            Error::MissingFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::BadRequest("bad body".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Upstream("Failed to fetch blogs").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
