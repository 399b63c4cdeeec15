use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("An account with this email already exists")]
    DuplicateIdentity,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("New password and confirmation do not match")]
    PasswordMismatch,

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Refresh token has been revoked")]
    RevokedCredential,

    #[error("Refresh token has expired")]
    ExpiredCredential,

    #[error("Refresh token is malformed: {0}")]
    MalformedCredential(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Assistant upstream error: {0}")]
    Upstream(String),
}

/// Wire envelope for every error body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateIdentity => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::PasswordMismatch => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::RevokedCredential => StatusCode::UNAUTHORIZED,
            AppError::ExpiredCredential => StatusCode::UNAUTHORIZED,
            AppError::MalformedCredential(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_type = match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DuplicateIdentity => "DUPLICATE_IDENTITY",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::PasswordMismatch => "PASSWORD_MISMATCH",
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::RevokedCredential => "REVOKED_CREDENTIAL",
            AppError::ExpiredCredential => "EXPIRED_CREDENTIAL",
            AppError::MalformedCredential(_) => "MALFORMED_CREDENTIAL",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
        };

        let message = self.to_string();
        let details = match self {
            AppError::Database(e) => Some(e.to_string()),
            _ => None,
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

// Convert validator errors to AppError
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::DuplicateIdentity.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PasswordMismatch.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthenticated("missing token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::RevokedCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::ExpiredCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::MalformedCredential("bad signature".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("not the owner".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("course".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_error_body_carries_code_and_message() {
        let response = AppError::RevokedCredential.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body read");
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "REVOKED_CREDENTIAL");
        assert!(json["message"].as_str().unwrap().contains("revoked"));
    }

    #[test]
    fn test_validation_errors_convert_to_400() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(email)]
            email: String,
        }

        let probe = Probe {
            email: "nope".to_string(),
        };
        let err: AppError = probe.validate().unwrap_err().into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
