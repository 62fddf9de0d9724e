//! Pokedex lookup and search

use std::sync::Arc;

use rand::RngCore;

use crate::config::DexConfig;
use crate::text::pick_random;

use super::types::{DexError, DexResult, Pokemon};

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Bundled sample data used when no data file is configured
const EMBEDDED_DEX: &str = include_str!("../../data/pokedex.json");

/// Read-only access to Pokemon records
pub trait Pokedex: Send + Sync {
    /// Exact lookup by national id (optionally `#`-prefixed) or by any localized name
    fn lookup(&self, query: &str) -> Option<&Pokemon>;

    /// Pokemon with a type containing `query` (case-insensitive)
    fn search_by_type(&self, query: &str) -> Vec<&Pokemon>;

    /// Pokemon with an ability containing `query` (case-insensitive)
    fn search_by_ability(&self, query: &str) -> Vec<&Pokemon>;

    /// Closest names to a query that had no exact match, best first
    fn suggest(&self, query: &str, limit: usize) -> Vec<&Pokemon>;

    /// Uniformly random record, `None` when the dex is empty
    fn random(&self, rng: &mut dyn RngCore) -> Option<&Pokemon>;
}

/// In-memory Pokedex, ordered by national id
#[derive(Debug, Default)]
pub struct MemoryDex {
    pokemon: Vec<Pokemon>,
}

impl MemoryDex {
    pub fn new(mut pokemon: Vec<Pokemon>) -> Self {
        pokemon.sort_by_key(|p| p.national_id);
        Self { pokemon }
    }

    /// Parse a JSON array of records
    pub fn from_json(json: &str) -> DexResult<Self> {
        let pokemon: Vec<Pokemon> = serde_json::from_str(json)?;
        Ok(Self::new(pokemon))
    }

    /// Load a JSON data file
    pub fn from_path(path: &str) -> DexResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| DexError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The bundled sample data
    pub fn embedded() -> DexResult<Self> {
        Self::from_json(EMBEDDED_DEX)
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    fn filter_by<F>(&self, query: &str, field: F) -> Vec<&Pokemon>
    where
        F: Fn(&Pokemon) -> Vec<&str>,
    {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.pokemon
            .iter()
            .filter(|p| {
                field(p)
                    .iter()
                    .any(|value| value.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

impl Pokedex for MemoryDex {
    fn lookup(&self, query: &str) -> Option<&Pokemon> {
        let query = query.trim();
        let query = query.strip_prefix('#').unwrap_or(query);

        if let Ok(id) = query.parse::<u32>() {
            return self.pokemon.iter().find(|p| p.national_id == id);
        }

        let needle = query.to_lowercase();
        self.pokemon
            .iter()
            .find(|p| p.names.values().any(|name| name.to_lowercase() == needle))
    }

    fn search_by_type(&self, query: &str) -> Vec<&Pokemon> {
        self.filter_by(query, |p| p.types.iter().map(String::as_str).collect())
    }

    fn search_by_ability(&self, query: &str) -> Vec<&Pokemon> {
        self.filter_by(query, |p| {
            p.abilities.iter().map(|a| a.name.as_str()).collect()
        })
    }

    fn suggest(&self, query: &str, limit: usize) -> Vec<&Pokemon> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &Pokemon)> = self
            .pokemon
            .iter()
            .filter_map(|p| {
                let score = p
                    .names
                    .values()
                    .map(|name| strsim::jaro_winkler(&needle, &name.to_lowercase()))
                    .fold(0.0_f64, f64::max);
                (score >= SUGGESTION_THRESHOLD).then_some((score, p))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.national_id.cmp(&b.1.national_id))
        });

        scored.into_iter().take(limit).map(|(_, p)| p).collect()
    }

    fn random(&self, rng: &mut dyn RngCore) -> Option<&Pokemon> {
        pick_random(&self.pokemon, rng)
    }
}

/// Create the dex configured in settings.
///
/// Falls back to the bundled data when no data path is set.
pub fn create_pokedex(config: &DexConfig) -> DexResult<Arc<dyn Pokedex>> {
    let dex = match config.data_path.as_deref() {
        Some(path) => {
            tracing::info!(path = %path, "Loading dex data from file");
            MemoryDex::from_path(path)?
        }
        None => {
            tracing::info!("Loading bundled dex data");
            MemoryDex::embedded()?
        }
    };

    tracing::info!(entries = dex.len(), "Dex loaded");
    Ok(Arc::new(dex))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dex() -> MemoryDex {
        MemoryDex::embedded().unwrap()
    }

    #[test]
    fn test_embedded_data_loads_sorted() {
        let dex = dex();
        assert!(!dex.is_empty());
        let ids: Vec<u32> = dex.pokemon.iter().map(|p| p.national_id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_lookup_by_name_and_id() {
        let dex = dex();
        assert_eq!(dex.lookup("gengar").unwrap().national_id, 94);
        assert_eq!(dex.lookup("GENGAR").unwrap().national_id, 94);
        assert_eq!(dex.lookup("94").unwrap().name(), "Gengar");
        assert_eq!(dex.lookup("#25").unwrap().name(), "Pikachu");
        assert!(dex.lookup("agumon").is_none());
        assert!(dex.lookup("9999").is_none());
    }

    #[test]
    fn test_search_by_type() {
        let dex = dex();
        let ghosts: Vec<u32> = dex.search_by_type("ghost").iter().map(|p| p.national_id).collect();
        assert_eq!(ghosts, vec![93, 94]);
        assert!(dex.search_by_type("ELECTRIC").iter().any(|p| p.national_id == 25));
        assert!(dex.search_by_type("nothing").is_empty());
        assert!(dex.search_by_type("  ").is_empty());
    }

    #[test]
    fn test_search_by_ability() {
        let dex = dex();
        let overgrow: Vec<u32> = dex
            .search_by_ability("overgrow")
            .iter()
            .map(|p| p.national_id)
            .collect();
        assert_eq!(overgrow, vec![1, 2]);
    }

    #[test]
    fn test_suggest_close_names() {
        let dex = dex();
        let suggestions = dex.suggest("pikachuu", 3);
        assert_eq!(suggestions.first().unwrap().name(), "Pikachu");
        assert!(dex.suggest("zzzzqqq", 3).is_empty());
        assert!(dex.suggest("gengr", 0).is_empty());
    }

    #[test]
    fn test_random_from_empty_dex() {
        let empty = MemoryDex::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(empty.random(&mut rng).is_none());
        assert!(dex().random(&mut rng).is_some());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(MemoryDex::from_json("{"), Err(DexError::Parse(_))));
        assert!(matches!(
            MemoryDex::from_path("/nonexistent/dex.json"),
            Err(DexError::Read { .. })
        ));
    }
}
