// HTTP handlers
//
// Station and line handlers are tagged for request logging: their bodies run
// through `RequestLogging::intercept`. Health checks are not.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub mod health;
pub mod lines;
pub mod stations;

/// Turn an intercepted handler outcome into an HTTP response.
///
/// A suppressed failure leaves no result; the client gets an empty `200 OK`.
pub(crate) fn respond<T: IntoResponse>(outcome: Result<Option<T>, AppError>) -> Response {
    match outcome {
        Ok(Some(response)) => response.into_response(),
        Ok(None) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}
