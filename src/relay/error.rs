//! Relay error taxonomy. Display strings are shown in chat as-is.

use thiserror::Error;

use super::transport::TransportError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Error! Please provide an '{0}' parameter!")]
    MissingParameter(&'static str),

    #[error("Error! The value of the '{name}' parameter is not a valid URL! ({value})")]
    InvalidUrl { name: &'static str, value: String },

    #[error("ERROR! Request to 'options' url failed! ({0})")]
    ConfigFetch(#[source] TransportError),

    #[error("ERROR! 'options' url contains an invalid JSON! ({0})")]
    ConfigParse(#[source] serde_json::Error),

    #[error("Discord API returned an error! ({0})")]
    Webhook(#[source] TransportError),
}

impl RelayError {
    /// Short machine-readable category for logs
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MissingParameter(_) | RelayError::InvalidUrl { .. } => "parameter",
            RelayError::ConfigFetch(_) | RelayError::Webhook(_) => "transport",
            RelayError::ConfigParse(_) => "config_parse",
        }
    }
}
