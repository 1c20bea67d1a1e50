//! Error types for the hockey gateway

use lineup_validator::LineupRejection;
use persistence::PersistenceError;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// Errors that can occur while serving a request
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{context}")]
    Upstream { context: String, cause: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Lineup rejected: {0}")]
    Lineup(#[from] LineupRejection),

    #[error("Storage error: {0}")]
    Storage(#[from] PersistenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl warp::reject::Reject for GatewayError {}

impl GatewayError {
    /// Upstream NHL API failure, logged with its full cause chain
    pub fn upstream(context: impl Into<String>, err: anyhow::Error) -> Self {
        let context = context.into();
        let cause = format!("{err:#}");
        tracing::error!("{}: {}", context, cause);
        Self::Upstream { context, cause }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Lineup(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Upstream { .. }
            | GatewayError::Storage(_)
            | GatewayError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Upstream { .. } => "UPSTREAM_ERROR",
            GatewayError::BadRequest(_) => "BAD_REQUEST",
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::Lineup(rejection) => rejection.code(),
            GatewayError::Storage(_) => "STORAGE_ERROR",
            GatewayError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            GatewayError::Upstream { cause, .. } => Some(serde_json::json!({ "cause": cause })),
            _ => None,
        }
    }
}

/// Result type for gateway handlers
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub timestamp: String,
}

/// Error detail
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail { code: code.into(), message: message.into(), details: None },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl From<&GatewayError> for ErrorResponse {
    fn from(err: &GatewayError) -> Self {
        let mut response = ErrorResponse::new(err.code(), err.to_string());
        response.error.details = err.details();
        response
    }
}

/// Render every rejection as an `ErrorResponse` with a matching status
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if let Some(e) = err.find::<GatewayError>() {
        (e.status(), ErrorResponse::from(e))
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, ErrorResponse::new("NOT_FOUND", "Route not found"))
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, ErrorResponse::new("INVALID_BODY", e.to_string()))
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, ErrorResponse::new("INVALID_QUERY", e.to_string()))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, ErrorResponse::new("PAYLOAD_TOO_LARGE", "Request body too large"))
    } else if let Some(e) = err.find::<warp::filters::cors::CorsForbidden>() {
        (StatusCode::FORBIDDEN, ErrorResponse::new("CORS_FORBIDDEN", e.to_string()))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, ErrorResponse::new("METHOD_NOT_ALLOWED", "Method not allowed"))
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new("INTERNAL_ERROR", "Internal server error"))
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fantasy_scoring::PositionCategory;

    #[test]
    fn test_status_mapping() {
        assert_eq!(GatewayError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        let rejection = LineupRejection::PositionFull { category: PositionCategory::Goalie, capacity: 1 };
        let err = GatewayError::from(rejection);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "POSITION_FULL");
    }

    #[test]
    fn test_upstream_error_body() {
        let err = GatewayError::upstream("Failed to fetch games", anyhow::anyhow!("timeout"));
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error.code, "UPSTREAM_ERROR");
        assert_eq!(body.error.message, "Failed to fetch games");
        assert_eq!(body.error.details, Some(serde_json::json!({"cause": "timeout"})));
    }
}
