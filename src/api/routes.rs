use axum::{routing::get, Router};

use crate::server::AppState;

use super::dex::{dex_help, dex_query, dex_random};
use super::discord::discord_relay;
use super::health::health;
use super::metrics::prometheus_metrics;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Pokedex chat command
        .route("/dex", get(dex_random))
        .route("/dex/help", get(dex_help))
        .route("/dex/{query}", get(dex_query))
        // Chat-to-Discord relay
        .route("/discord", get(discord_relay))
}
