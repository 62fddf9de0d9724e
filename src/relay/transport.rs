//! Outbound HTTP for the relay: config fetch and webhook post

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::config::RelayConfig;

/// Transport-level failure, reported back to chat verbatim
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(String),

    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::Status {
                status: status.as_u16(),
            },
            None => TransportError::Request(err.to_string()),
        }
    }
}

/// Discord-compatible webhook execute body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookMessage {
    pub username: String,
    pub content: String,
    /// Ask the webhook to acknowledge delivery before responding
    pub wait: bool,
}

/// Outbound calls made by the relay
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// GET `url` and return the body as text
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError>;

    /// POST `message` as JSON to `url`
    async fn post_webhook(&self, url: &str, message: &WebhookMessage) -> Result<(), TransportError>;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &RelayConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RelayTransport for HttpTransport {
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    async fn post_webhook(&self, url: &str, message: &WebhookMessage) -> Result<(), TransportError> {
        self.client
            .post(url)
            .json(message)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Create the transport configured in settings
pub fn create_transport(config: &RelayConfig) -> Result<Arc<dyn RelayTransport>, TransportError> {
    tracing::info!(
        timeout_secs = ?config.request_timeout_secs,
        "Creating relay HTTP transport"
    );
    Ok(Arc::new(HttpTransport::new(config)?))
}
