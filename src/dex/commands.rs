//! `!dex` chat command handling
//!
//! Turns the free text after the command into one reply line: a random
//! entry, the help text, a type/ability search, an exact lookup, or a
//! not-found message with suggestions.

use std::sync::Arc;

use lazy_static::lazy_static;
use rand::RngCore;
use regex::Regex;

use crate::config::DexConfig;
use crate::metrics::DexMetrics;
use crate::text::{char_len, limit_text, stylize, Style};

use super::eastereggs::easter_egg;
use super::format::format_pokemon;
use super::store::Pokedex;
use super::types::Pokemon;

lazy_static! {
    /// Chat bots forward the command word itself, e.g. `!dex gengar`
    static ref COMMAND_PREFIX: Regex = Regex::new(r"^!\w+ ?").unwrap();
    static ref TYPE_QUERY: Regex = Regex::new(r"(?i)^(types?) (.*)").unwrap();
    static ref ABILITY_QUERY: Regex = Regex::new(r"(?i)^(ability|abilities?) (.*)").unwrap();
}

const ME_ACTION: &str = "/me";

/// Reply to a dex query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DexReply {
    /// Plain-text chat line
    Text(String),
    /// Nothing left to look up; serve a random entry instead
    Random,
}

/// Dex command processor
pub struct DexCommands {
    dex: Arc<dyn Pokedex>,
    config: DexConfig,
    prefix: String,
}

impl DexCommands {
    pub fn new(dex: Arc<dyn Pokedex>, config: DexConfig) -> Self {
        Self {
            dex,
            config,
            prefix: stylize("📟 ", Style::SquaredNeg),
        }
    }

    /// Random entry with a banner
    pub fn random(&self, rng: &mut dyn RngCore) -> String {
        DexMetrics::record_query("random");

        let mut out = stylize("🎲RANDOM🎲 ", Style::BoldScript);
        match self.dex.random(rng) {
            Some(pokemon) => {
                let budget = self
                    .config
                    .max_length
                    .saturating_sub(char_len(&self.prefix) + char_len(&out));
                out.push_str(&format_pokemon(pokemon, budget, rng));
            }
            None => out.push_str("The Pokedex is empty!"),
        }

        limit_text(&format!("{}{}", self.prefix, out), self.config.max_length)
    }

    /// Usage text listing every query form
    pub fn help(&self) -> String {
        DexMetrics::record_query("help");

        let cmd = |args: &str| {
            let text = if args.is_empty() {
                self.config.command.clone()
            } else {
                format!("{} {}", self.config.command, args)
            };
            stylize(&text, Style::SansBold)
        };

        let out = format!(
            " {}❓ ➤ \"{}\" to get a random Pokemon. \
             ➤ \"{}\" or \"{}\" to see the Pokedex info about Gengar. \
             ➤ \"{}\" to search pokemons with that ability. \
             ➤ \"{}\" to search pokemons with that type. \
             ➤ \"{}\" to see about this command.",
            stylize("HELP", Style::Squared),
            cmd(""),
            cmd("gengar"),
            cmd("94"),
            cmd("ability overgrow"),
            cmd("type electric"),
            cmd("about"),
        );

        limit_text(&format!("{}{}", self.prefix, out), self.config.max_length)
    }

    /// Answer the free text following the command
    pub fn query(&self, raw: &str, rng: &mut dyn RngCore) -> DexReply {
        let trimmed = raw.trim();
        let query = COMMAND_PREFIX.replace(trimmed, "");
        let query = query.trim();
        if query.is_empty() {
            return DexReply::Random;
        }

        let out = if let Some(egg) = easter_egg(query) {
            DexMetrics::record_query("easter_egg");
            egg.to_string()
        } else if let Some(caps) = TYPE_QUERY.captures(query) {
            DexMetrics::record_query("type");
            let needle = caps.get(2).map_or("", |m| m.as_str());
            format!(
                "Searching for pokemons with types that match \"{}\": {}",
                needle,
                list_results(&self.dex.search_by_type(needle))
            )
        } else if let Some(caps) = ABILITY_QUERY.captures(query) {
            DexMetrics::record_query("ability");
            let needle = caps.get(2).map_or("", |m| m.as_str());
            format!(
                "Searching for pokemons with abilities that match \"{}\": {}",
                needle,
                list_results(&self.dex.search_by_ability(needle))
            )
        } else {
            self.lookup(query, rng)
        };

        DexReply::Text(limit_text(&self.with_prefix(&out), self.config.max_length))
    }

    fn lookup(&self, query: &str, rng: &mut dyn RngCore) -> String {
        if let Some(pokemon) = self.dex.lookup(query) {
            DexMetrics::record_query("lookup");
            let budget = self.config.max_length.saturating_sub(char_len(&self.prefix));
            return format_pokemon(pokemon, budget, rng);
        }

        DexMetrics::record_query("not_found");
        let mut out = format!(
            "{} ({})",
            stylize("🕵 This Pokemon is not on the database!", Style::SansBold),
            query
        );

        let suggestions = self.dex.suggest(query, self.config.max_suggestions);
        if suggestions.is_empty() {
            out.push_str(&format!(
                " Use \"{} help\" to learn how to use this command!",
                self.config.command
            ));
        } else {
            let lead = if suggestions.len() > 1 {
                "one of these"
            } else {
                "this one"
            };
            let options: Vec<String> = suggestions
                .iter()
                .map(|p| format!("🔹{} {}", self.config.command, p.name()))
                .collect();
            out.push_str(&format!(" 🔮 But you can try {}: {}", lead, options.join(" ")));
        }
        out
    }

    /// Prefix the reply, keeping a leading `/me` action in front
    fn with_prefix(&self, out: &str) -> String {
        match out.strip_prefix(ME_ACTION) {
            Some(rest) => format!("{} {}{}", ME_ACTION, self.prefix, rest.trim_start()),
            None => format!("{}{}", self.prefix, out),
        }
    }
}

fn list_results(results: &[&Pokemon]) -> String {
    if results.is_empty() {
        return "No results!".to_string();
    }
    results
        .iter()
        .map(|p| format!("#{} {}", p.national_id, p.name()))
        .collect::<Vec<_>>()
        .join(",")
}
