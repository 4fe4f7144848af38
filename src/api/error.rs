use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::constants::messages;
use crate::services::{AuthError, StudentError};

#[derive(Debug)]
pub enum ApiError {
    DatabaseError(String),

    ValidationError(String),

    Conflict(String),

    InternalError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                Self::Unauthorized(messages::INVALID_CREDENTIALS.to_string())
            }
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::Conflict => Self::Conflict(messages::USERNAME_TAKEN.to_string()),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<StudentError> for ApiError {
    fn from(err: StudentError) -> Self {
        match err {
            StudentError::Validation(msg) => Self::ValidationError(msg),
            StudentError::Conflict => Self::Conflict(messages::MATRIC_TAKEN.to_string()),
            StudentError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    pub fn session(err: impl fmt::Display) -> Self {
        Self::InternalError(format!("Session error: {err}"))
    }

    /// Splits user-correctable errors (shown as a flash message) from faults.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged for database and internal errors.
    pub fn into_flash(self) -> Result<String, Self> {
        match self {
            Self::ValidationError(msg) | Self::Conflict(msg) | Self::Unauthorized(msg) => Ok(msg),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_errors_become_flash_messages() {
        let msg = ApiError::from(StudentError::Conflict).into_flash().unwrap();
        assert_eq!(msg, messages::MATRIC_TAKEN);

        let msg = ApiError::from(AuthError::InvalidCredentials)
            .into_flash()
            .unwrap();
        assert_eq!(msg, messages::INVALID_CREDENTIALS);

        let msg = ApiError::validation("Name and Matric No are required")
            .into_flash()
            .unwrap();
        assert_eq!(msg, "Name and Matric No are required");
    }

    #[test]
    fn test_faults_are_not_flashed() {
        let err = ApiError::from(StudentError::Database("disk I/O error".to_string()));
        assert!(matches!(err.into_flash(), Err(ApiError::DatabaseError(_))));
    }

    #[test]
    fn test_fault_response_hides_details() {
        let response = ApiError::internal("secret stack trace").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
