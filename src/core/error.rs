use std::time::Duration;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Minimum delay between two calls of the same action was not respected
    #[error("Too frequent: {message}")]
    TooFrequent {
        message: String,
        retry_after: Duration,
    },

    /// Per-minute or per-hour call count reached its maximum
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        message: String,
        retry_after: Duration,
    },

    /// Request-declared resource state contradicts the stored state
    #[error("Stale state: {0}")]
    StaleState(String),

    /// Cooldown-gated action requested before its stored expiry
    #[error("Cooldown active: {message}")]
    CooldownActive {
        message: String,
        available_at: DateTime<Utc>,
        retry_after: Duration,
    },
}

impl AppError {
    /// Seconds a client should wait before retrying, rounded up
    pub fn retry_after_secs(&self) -> Option<u64> {
        let wait = match self {
            AppError::TooFrequent { retry_after, .. }
            | AppError::RateLimitExceeded { retry_after, .. }
            | AppError::CooldownActive { retry_after, .. } => *retry_after,
            _ => return None,
        };

        let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
        Some(secs.max(1))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retry_after = self.retry_after_secs();

        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Auth(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::TooFrequent { ref message, .. }
            | AppError::RateLimitExceeded { ref message, .. }
            | AppError::CooldownActive { ref message, .. } => {
                (StatusCode::TOO_MANY_REQUESTS, message.clone(), None)
            }
            AppError::StaleState(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));
        let mut response = (status, body).into_response();

        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after_rounds_up_partial_seconds() {
        let err = AppError::TooFrequent {
            message: "too frequent".to_string(),
            retry_after: Duration::from_millis(1500),
        };
        assert_eq!(err.retry_after_secs(), Some(2));
    }

    #[test]
    fn test_retry_after_never_zero() {
        let err = AppError::RateLimitExceeded {
            message: "rate limit exceeded".to_string(),
            retry_after: Duration::ZERO,
        };
        assert_eq!(err.retry_after_secs(), Some(1));
    }

    #[test]
    fn test_guard_errors_map_to_429_with_retry_after() {
        let response = AppError::RateLimitExceeded {
            message: "rate limit exceeded".to_string(),
            retry_after: Duration::from_secs(30),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "30");
    }

    #[test]
    fn test_stale_state_maps_to_400_without_retry_after() {
        let response = AppError::StaleState("stale state".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[test]
    fn test_cooldown_retry_after_uses_carried_wait() {
        let response = AppError::CooldownActive {
            message: "action not yet available".to_string(),
            available_at: Utc::now(),
            retry_after: Duration::from_secs(90),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "90");
    }
}
