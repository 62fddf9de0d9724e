// Shared components
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Domain layer
pub mod dex;
pub mod relay;
pub mod template;
pub mod text;

// Application layer
pub mod api;
pub mod server;
