mod settings;

pub use settings::{DexConfig, OtelConfig, RelayConfig, ServerConfig, Settings};
