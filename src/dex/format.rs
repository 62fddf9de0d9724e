//! Single-line Pokedex entry formatting

use rand::RngCore;
use serde_json::json;

use crate::template::{render_template, ArgumentSource};
use crate::text::{char_len, limit_text, pick_random, stylize, Style};

use super::types::{Evolution, Pokemon};

const HEADER_TEMPLATE: &str = "{name} #{id}";
const LINK_TEMPLATE: &str = "bulbapedia.bulbagarden.net/wiki/{0}";
const NO_EVOLUTION: &str = "EVOLUTION: none";

/// Format a Pokemon as one chat line of at most `max_len` characters.
///
/// Only the flavor quote is shortened to fit; every other field is kept
/// intact even if that leaves the line over budget.
pub fn format_pokemon(pokemon: &Pokemon, max_len: usize, rng: &mut dyn RngCore) -> String {
    let name = pokemon.name();
    let header = render_template(
        HEADER_TEMPLATE,
        &ArgumentSource::from(json!({
            "name": name.to_uppercase(),
            "id": pokemon.national_id,
        })),
    );

    let mut fields = vec![
        header,
        format!(
            "{}{}",
            stylize("TYPE:", Style::SansBold),
            pokemon.types.join("/")
        ),
        format!("{}{}", stylize("ABIL:", Style::SansBold), format_abilities(pokemon)),
        format!("{}{}", stylize("BASE:", Style::SansBold), format_base_stats(pokemon)),
    ];

    if let Some(from) = pokemon.evolution_from.as_deref().filter(|f| !f.is_empty()) {
        fields.push(format!("FROM:{}", from));
    }
    fields.push(format_evolutions(pokemon));

    let flavor_texts = pokemon.flavor_texts();
    let quote_index = pick_random(&flavor_texts, rng).map(|text| {
        fields.push(stylize(&format!("🗣\"{}\"", text), Style::SansItalic));
        fields.len() - 1
    });

    fields.push(render_template(
        LINK_TEMPLATE,
        &ArgumentSource::positional([name.to_lowercase()]),
    ));

    if let Some(index) = quote_index {
        let overflow = char_len(&fields.join(" ")).saturating_sub(max_len);
        if overflow > 0 {
            let budget = char_len(&fields[index]).saturating_sub(overflow);
            let quote = limit_text(&fields[index], budget);
            if quote.is_empty() {
                fields.remove(index);
            } else {
                fields[index] = quote;
            }
        }
    }

    fields.join(" ")
}

fn format_abilities(pokemon: &Pokemon) -> String {
    pokemon
        .abilities
        .iter()
        .map(|a| {
            if a.hidden {
                format!("{}*", a.name)
            } else {
                a.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn format_base_stats(pokemon: &Pokemon) -> String {
    pokemon
        .base_stats
        .labeled()
        .iter()
        .map(|(label, value)| format!("{} {}", stylize(label, Style::Normal), value))
        .collect::<Vec<_>>()
        .join("|")
}

/// Summary of evolution targets, listing only the qualifiers each one has
pub fn format_evolutions(pokemon: &Pokemon) -> String {
    if pokemon.evolutions.is_empty() {
        return NO_EVOLUTION.to_string();
    }

    let entries: Vec<String> = pokemon.evolutions.iter().map(format_evolution).collect();
    format!("EVOLUTION:{}", entries.join(","))
}

fn format_evolution(evolution: &Evolution) -> String {
    fn text(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }
    fn number(value: Option<u32>) -> Option<u32> {
        value.filter(|v| *v > 0)
    }

    let mut parts = Vec::new();
    if let Some(to) = text(&evolution.to) {
        parts.push(to.to_string());
    }
    if let Some(level) = number(evolution.level) {
        parts.push(format!("Lvl:{}", level));
    }
    if let Some(conditions) = text(&evolution.conditions) {
        parts.push(format!("Cond:{}", conditions));
    }
    if let Some(level_up) = text(&evolution.level_up) {
        parts.push(format!("LvlUp:{}", level_up));
    }
    if let Some(trade) = text(&evolution.trade) {
        parts.push(format!("Trade:{}", trade));
    }
    if let Some(happiness) = number(evolution.happiness) {
        parts.push(format!("Happiness:{}", happiness));
    }
    if let Some(item) = text(&evolution.hold_item) {
        parts.push(format!("HoldItem:{}", item));
    }
    if let Some(learned) = text(&evolution.move_learned) {
        parts.push(format!("MoveLearned:{}", learned));
    }
    parts.join(" ")
}
