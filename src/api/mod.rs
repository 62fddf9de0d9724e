//! API layer - HTTP endpoint handlers organized by domain.

mod dex;
mod discord;
mod health;
mod metrics;
mod routes;

pub use dex::{dex_help, dex_query, dex_random};
pub use discord::discord_relay;
pub use health::{health, HealthResponse};
pub use metrics::prometheus_metrics;
pub use routes::api_routes;
