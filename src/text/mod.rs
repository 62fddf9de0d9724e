//! Plain-text helpers shared by the chat endpoints.
//!
//! - `limit`: character-counted truncation with an ellipsis marker
//! - `stylize`: Unicode glyph substitution for emphasis in chat
//! - `pick_random`: uniform choice from a slice

mod limit;
mod stylize;

pub use limit::{char_len, limit_text, ELLIPSIS};
pub use stylize::{stylize, Style};

use rand::seq::IndexedRandom;
use rand::Rng;

/// Pick one element uniformly at random, `None` for an empty slice
pub fn pick_random<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_random_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: [u8; 0] = [];
        assert_eq!(pick_random(&empty, &mut rng), None);
    }

    #[test]
    fn test_pick_random_covers_all_items() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = ["gen1", "gen2", "gen3"];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(*pick_random(&items, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), items.len());
    }
}
