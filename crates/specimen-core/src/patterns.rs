//! Curated built-in pattern entries.
//!
//! Fragments are ordered most-specific first within the builtin source so
//! that, say, `firstname` wins over the bare `name` fragment. Callers layer
//! environment and config-file entries on top via the table builder.

use specimen_types::{PatternRule, PatternSource, PatternTable, Value};

fn one_of(candidates: &[&str]) -> PatternRule {
    PatternRule::OneOf(
        candidates
            .iter()
            .map(|s| Value::Text((*s).to_owned()))
            .collect(),
    )
}

fn regex(template: &str) -> PatternRule {
    PatternRule::Regex(template.to_owned())
}

/// The default heuristic table used when no other sources are configured.
#[must_use]
pub fn builtin_patterns() -> PatternTable {
    let mut builder = PatternTable::builder();
    let entries: Vec<(&str, PatternRule)> = vec![
        (
            "email",
            regex(r"[a-z]{3,10}\.[a-z]{3,10}@(example|test)\.(com|org|net)"),
        ),
        ("phone", regex(r"\+1-[2-9][0-9]{2}-[0-9]{3}-[0-9]{4}")),
        ("zip", regex(r"[0-9]{5}")),
        ("postal", regex(r"[0-9]{5}")),
        (
            "url",
            regex(r"https://(www\.)?[a-z]{4,12}\.(com|org|io)/[a-z]{3,8}"),
        ),
        (
            "firstname",
            one_of(&["Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald"]),
        ),
        (
            "lastname",
            one_of(&["Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth"]),
        ),
        (
            "city",
            one_of(&["Lisbon", "Kyoto", "Oslo", "Montevideo", "Nairobi", "Wellington"]),
        ),
        (
            "country",
            one_of(&["Portugal", "Japan", "Norway", "Uruguay", "Kenya", "New Zealand"]),
        ),
        ("currency", one_of(&["USD", "EUR", "GBP", "JPY"])),
        (
            "name",
            one_of(&["Ada Lovelace", "Grace Hopper", "Alan Turing", "Barbara Liskov"]),
        ),
    ];
    for (fragment, rule) in entries {
        builder = builder.entry(PatternSource::Builtin, fragment, rule);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_fragment_wins_over_general() {
        let table = builtin_patterns();
        let hit = table.find("firstName").unwrap();
        assert_eq!(hit.fragment, "firstname");
        let general = table.find("nickname").unwrap();
        assert_eq!(general.fragment, "name");
    }

    #[test]
    fn zip_is_a_five_digit_regex() {
        let table = builtin_patterns();
        match &table.find("zipCode").unwrap().rule {
            PatternRule::Regex(r) => assert_eq!(r, "[0-9]{5}"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
