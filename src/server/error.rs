use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::model::ValidationError;

/// JSON body returned for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

/// Errors returned by the report endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Any method other than POST on the report route.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Malformed body or a blank required field.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), "rejected request: {}", self);
        let body = ErrorBody {
            status: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_allowed_maps_to_405() {
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::MethodNotAllowed.to_string(), "Method not allowed");
    }

    #[test]
    fn validation_error_maps_to_400() {
        let err = ApiError::from(ValidationError::MissingField("arrest.reason"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("arrest.reason"));
    }

    #[test]
    fn error_body_field_order() {
        let body = ErrorBody {
            status: 405,
            message: "Method not allowed".into(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":405,"message":"Method not allowed"}"#
        );
    }
}
