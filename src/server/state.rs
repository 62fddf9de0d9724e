use std::sync::Arc;

use crate::config::Settings;
use crate::dex::{create_pokedex, DexCommands, Pokedex};
use crate::error::Result;
use crate::relay::{create_transport, RelayOrchestrator, RelayTransport};

#[derive(Clone)]
pub struct AppState {
    pub dex: Arc<DexCommands>,
    pub relay: Arc<RelayOrchestrator>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let pokedex = create_pokedex(&settings.dex)?;
        let transport = create_transport(&settings.relay)?;
        Ok(Self::with_components(settings, pokedex, transport))
    }

    /// Build state around an explicit dex and relay transport
    pub fn with_components(
        settings: Settings,
        pokedex: Arc<dyn Pokedex>,
        transport: Arc<dyn RelayTransport>,
    ) -> Self {
        let dex = Arc::new(DexCommands::new(pokedex, settings.dex.clone()));
        let relay = Arc::new(RelayOrchestrator::new(
            transport,
            settings.relay.clone(),
            settings.template,
        ));

        Self { dex, relay }
    }
}
