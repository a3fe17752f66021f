use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

use crate::models::ValidationError;

/// Error returned by every handler.
///
/// Client-facing rejections and not-found answers carry a `message` key,
/// validation and store failures carry an `error` key.
#[derive(Debug)]
pub enum ApiError {
    /// 400 `{message}`
    Rejected(String),
    /// 404 `{message: "<Entity> not found"}`
    NotFound(&'static str),
    /// 400 `{error}`
    Invalid(String),
    /// 500 `{error}`
    Store(String),
}

impl ApiError {
    /// Failure of a read or delete: reported as a server error.
    pub fn read(err: impl fmt::Display) -> Self {
        ApiError::Store(err.to_string())
    }

    /// Failure of a create or update: reported as a bad request.
    pub fn write(err: impl fmt::Display) -> Self {
        ApiError::Invalid(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Rejected(msg) => write!(f, "{}", msg),
            ApiError::NotFound(entity) => write!(f, "{} not found", entity),
            ApiError::Invalid(msg) => write!(f, "{}", msg),
            ApiError::Store(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Missing(msg) => ApiError::Rejected(msg.to_string()),
            field @ ValidationError::Field { .. } => ApiError::Invalid(field.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Rejected(_) | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Rejected(_) | ApiError::NotFound(_) => json!({ "message": self.to_string() }),
            ApiError::Invalid(_) => {
                log::warn!("⚠️  Rejected write: {}", self);
                json!({ "error": self.to_string() })
            }
            ApiError::Store(_) => {
                log::error!("❌ Store error: {}", self);
                json!({ "error": self.to_string() })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(ApiError::Rejected("Missing required fields".into()), StatusCode::BAD_REQUEST, "message")]
    #[case(ApiError::NotFound("Trip"), StatusCode::NOT_FOUND, "message")]
    #[case(ApiError::Invalid("bad status".into()), StatusCode::BAD_REQUEST, "error")]
    #[case(ApiError::Store("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR, "error")]
    #[actix_web::test]
    async fn each_kind_has_its_status_and_body_key(
        #[case] error: ApiError,
        #[case] status: StatusCode,
        #[case] key: &str,
    ) {
        let expected = error.to_string();
        let response = error.error_response();
        assert_eq!(response.status(), status);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body[key], expected.as_str());
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(ApiError::NotFound("Destination").to_string(), "Destination not found");
    }

    #[test]
    fn validation_errors_keep_their_shape() {
        let missing: ApiError = ValidationError::Missing("Missing city or country").into();
        assert!(matches!(missing, ApiError::Rejected(_)));

        let field: ApiError = ValidationError::field("Trip", "status", "nope").into();
        assert!(matches!(field, ApiError::Invalid(_)));
    }
}
