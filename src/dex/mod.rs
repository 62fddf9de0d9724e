//! Pokedex chat command.
//!
//! This module provides:
//! - Pokemon record types and an in-memory dex loaded from JSON
//! - Lookup, type/ability search and fuzzy suggestions
//! - Single-line entry formatting that trims the flavor quote to fit chat
//! - `!dex` command parsing (help, random, searches, easter eggs)

mod commands;
mod eastereggs;
mod format;
mod store;
mod types;

pub use commands::{DexCommands, DexReply};
pub use eastereggs::easter_egg;
pub use format::{format_evolutions, format_pokemon};
pub use store::{create_pokedex, MemoryDex, Pokedex};
pub use types::{Ability, BaseStats, DexError, DexResult, Evolution, Pokemon, DISPLAY_LOCALE};
