//! Fixed replies for special dex queries

const ABOUT: &str = "Pokedex chat command: look up any Pokemon by name or number, \
    search by type or ability, and get suggestions when a name is misspelled.";

const EGGS: &[(&str, &str)] = &[
    ("about", ABOUT),
    ("missingno", "/me glitches out... ERROR 0x00 MISSINGNO. #000 TYPE:Bird/Normal"),
    ("mew under the truck", "/me checks under the truck... nothing but a Poke Ball wrapper."),
    ("ditto?", "Ditto is whatever you want it to be."),
];

/// Fixed reply for `query`, matched case-insensitively on the whole query
pub fn easter_egg(query: &str) -> Option<&'static str> {
    let query = query.trim();
    EGGS.iter()
        .find(|(trigger, _)| trigger.eq_ignore_ascii_case(query))
        .map(|(_, reply)| *reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_eggs() {
        assert!(easter_egg("about").unwrap().starts_with("Pokedex chat command"));
        assert!(easter_egg("  MissingNo ").unwrap().starts_with("/me "));
    }

    #[test]
    fn test_regular_queries_are_not_eggs() {
        assert_eq!(easter_egg("pikachu"), None);
        assert_eq!(easter_egg("about pikachu"), None);
    }
}
