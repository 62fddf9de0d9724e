//! Chat-to-Discord relay.
//!
//! This module provides:
//! - Per-request options fetched from a caller-supplied URL
//! - Bounded compilation of the optional message pattern
//! - Webhook posting over a pluggable HTTP transport
//! - The orchestrator tying them together into one chat reply

mod error;
mod options;
mod orchestrator;
mod pattern;
mod transport;

pub use error::RelayError;
pub use options::RelayOptions;
pub use orchestrator::{RelayOrchestrator, RelayOutcome, RelayReply, MATCH_KEY};
pub use pattern::{capture_groups, compile_pattern, PatternError, PatternLimits};
pub use transport::{
    create_transport, HttpTransport, RelayTransport, TransportError, WebhookMessage,
};
