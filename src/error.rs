use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api_models::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid section: {0}")]
    InvalidSection(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    fn variant(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "NotFound",
            AppError::Validation(_) => "Validation",
            AppError::Conflict(_) => "Conflict",
            AppError::InvalidSection(_) => "InvalidSection",
            AppError::Internal => "Internal",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidSection(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Name an error is reported under in the interceptor's error line.
///
/// The default is the full type path, the closest thing Rust has to an
/// exception class name.
pub trait ErrorKind: std::fmt::Display {
    fn kind(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl ErrorKind for AppError {
    fn kind(&self) -> String {
        format!("{}::{}", std::any::type_name::<Self>(), self.variant())
    }
}

impl ErrorKind for anyhow::Error {}

impl ErrorKind for std::io::Error {}

/// A failed handler invocation, as seen by the request logging interceptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}.{message}")]
pub struct InvocationError {
    pub kind: String,
    pub message: String,
}

impl InvocationError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn from_error<E: ErrorKind + ?Sized>(error: &E) -> Self {
        Self::new(error.kind(), error.to_string())
    }

    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Self::new("panic", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_kind_includes_variant() {
        let err = AppError::Conflict("station in use".to_string());
        assert_eq!(err.kind(), "subway::error::AppError::Conflict");
    }

    #[test]
    fn test_invocation_error_display() {
        let err = AppError::Validation("name too long".to_string());
        let invocation_error = InvocationError::from_error(&err);

        assert_eq!(invocation_error.message, "Validation error: name too long");
        assert_eq!(
            invocation_error.to_string(),
            "subway::error::AppError::Validation.Validation error: name too long"
        );
    }

    #[test]
    fn test_invocation_error_from_panic_payload() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(
            InvocationError::from_panic(payload.as_ref()),
            InvocationError::new("panic", "boom")
        );

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(InvocationError::from_panic(payload.as_ref()).message, "owned boom");
    }

    #[test]
    fn test_status_codes() {
        let id = Uuid::new_v4();
        assert_eq!(
            AppError::NotFound { entity: "Station", id }.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict(String::new()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidSection(String::new()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
