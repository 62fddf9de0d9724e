use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::dex::DexError;
use crate::relay::{RelayError, TransportError};
use crate::text::limit_text;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Relay failure answered in chat, cut to `max_len` characters
    #[error("{source}")]
    Relay { source: RelayError, max_len: usize },

    #[error("Pokedex error: {0}")]
    Dex(#[from] DexError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn relay(source: RelayError, max_len: usize) -> Self {
        AppError::Relay { source, max_len }
    }
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, log_message) = match &self {
            // Chat bots print whatever body comes back, so relay failures
            // are answered as a normal chat line. The orchestrator has
            // already logged them.
            AppError::Relay { source, max_len } => {
                return (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    limit_text(&source.to_string(), *max_len),
                )
                    .into_response();
            }
            AppError::Config(e) => ("CONFIG_ERROR", e.to_string()),
            AppError::Dex(e) => ("DEX_ERROR", e.to_string()),
            AppError::Transport(e) => ("TRANSPORT_ERROR", e.to_string()),
            AppError::Internal(e) => ("INTERNAL_ERROR", e.clone()),
        };

        // Always log the detailed error server-side
        tracing::error!(code = %code, message = %log_message, "API error");

        let client_message = if is_production() {
            "Internal server error".to_string()
        } else {
            log_message
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            client_message,
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_relay_error_is_a_chat_line() {
        let response = AppError::relay(RelayError::MissingParameter("output"), 400).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            body_text(response).await,
            "Error! Please provide an 'output' parameter!"
        );
    }

    #[tokio::test]
    async fn test_relay_error_is_length_limited() {
        let err = RelayError::ConfigFetch(TransportError::Request("x".repeat(1000)));
        let text = body_text(AppError::relay(err, 120).into_response()).await;
        assert_eq!(text.chars().count(), 120);
        assert!(text.ends_with('…'));
    }

    #[tokio::test]
    async fn test_internal_error_status() {
        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
