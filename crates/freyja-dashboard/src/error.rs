use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use freyja_ai::error::AiError;
use freyja_publish::error::PublishError;
use freyja_queue::error::QueueError;
use freyja_storage::error::StorageError;

/// Failure of a JSON route, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show a client. Internal details only go to the log.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::BadGateway(msg) => msg.clone(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                "internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.public_message();
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Validation(msg) => ApiError::BadRequest(msg),
            QueueError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),
            QueueError::NotFound(_) => ApiError::NotFound(err.to_string()),
            QueueError::PublisherFailure(_) => ApiError::BadGateway(err.to_string()),
            QueueError::Storage(source) => ApiError::from(source),
            QueueError::Task(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PreconditionFailed { .. } => {
                ApiError::Conflict("item was modified concurrently, reload and retry".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::BadGateway(other.to_string()),
        }
    }
}

impl From<PublishError> for ApiError {
    fn from(err: PublishError) -> Self {
        ApiError::BadGateway(err.to_string())
    }
}

impl From<tera::Error> for ApiError {
    fn from(err: tera::Error) -> Self {
        ApiError::Internal(format!("template rendering failed: {err:?}"))
    }
}

/// Failure of an HTML route: the same mapping, rendered as a page with a
/// way back to the dashboard.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError(err)
    }
}

impl From<QueueError> for PageError {
    fn from(err: QueueError) -> Self {
        PageError(ApiError::from(err))
    }
}

impl From<PublishError> for PageError {
    fn from(err: PublishError) -> Self {
        PageError(ApiError::from(err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = self.0.public_message();
        (status, Html(error_page(status, &message))).into_response()
    }
}

/// Standalone error page; must not depend on the template set, which may
/// itself be what failed.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{code} {title} | Freyja</title></head>\n\
         <body style=\"font-family: sans-serif; max-width: 40rem; margin: 4rem auto;\">\n\
         <h1>{code} {title}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to Dashboard</a></p>\n</body>\n</html>\n",
        code = status.as_u16(),
        title = tera::escape_html(title),
        message = tera::escape_html(message),
    )
}
