//! The known-pattern table: heuristic generation rules keyed by coordinate
//! fragments, consulted when no explicit override matches.
//!
//! Entries come from up to three sources with fixed precedence
//! (environment/system configuration, then an external declarative file,
//! then curated built-in defaults). Assembling entries *from* those sources
//! is an outer layer's job; this module only models the merged, read-only
//! table and its matching rules.

use crate::Value;

/// What to generate when a pattern fragment matches.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PatternRule {
    /// A fixed literal, coerced to the target type.
    Literal(Value),
    /// A regex template expanded to a string, then coerced.
    Regex(String),
    /// A candidate list; one entry is chosen at random and coerced.
    OneOf(Vec<Value>),
}

/// Where a pattern entry came from. Lower rank wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PatternSource {
    /// Environment/system configuration (highest precedence).
    Environment,
    /// External declarative configuration file.
    ConfigFile,
    /// Curated built-in defaults (lowest precedence).
    Builtin,
}

/// One merged pattern entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternEntry {
    /// Matched case-insensitively as a substring of a coordinate's final
    /// segment.
    pub fragment: String,
    pub rule: PatternRule,
    pub source: PatternSource,
}

/// The merged, ordered, read-only pattern table.
///
/// Built once at engine construction; lookups scan in precedence order
/// (source rank, then insertion order within a source).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
}

impl PatternTable {
    /// An empty table (no heuristics; resolution falls through to fresh
    /// generation).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start assembling a table.
    #[must_use]
    pub fn builder() -> PatternTableBuilder {
        PatternTableBuilder {
            staged: Vec::new(),
        }
    }

    /// First entry whose fragment is a case-insensitive substring of
    /// `segment`, in precedence order.
    #[must_use]
    pub fn find(&self, segment: &str) -> Option<&PatternEntry> {
        if segment.is_empty() {
            return None;
        }
        let lowered = segment.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|entry| lowered.contains(&entry.fragment.to_ascii_lowercase()))
    }

    /// All entries in precedence order.
    #[must_use]
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// Number of merged entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder that merges entries from multiple sources and freezes them in
/// precedence order.
pub struct PatternTableBuilder {
    staged: Vec<PatternEntry>,
}

impl PatternTableBuilder {
    /// Add one entry.
    #[must_use]
    pub fn entry(
        mut self,
        source: PatternSource,
        fragment: impl Into<String>,
        rule: PatternRule,
    ) -> Self {
        self.staged.push(PatternEntry {
            fragment: fragment.into(),
            rule,
            source,
        });
        self
    }

    /// Add many entries from one source.
    #[must_use]
    pub fn extend(
        mut self,
        source: PatternSource,
        entries: impl IntoIterator<Item = (String, PatternRule)>,
    ) -> Self {
        for (fragment, rule) in entries {
            self.staged.push(PatternEntry {
                fragment,
                rule,
                source,
            });
        }
        self
    }

    /// Freeze the table: stable sort by source rank, preserving insertion
    /// order within each source.
    #[must_use]
    pub fn build(mut self) -> PatternTable {
        self.staged.sort_by_key(|e| e.source);
        PatternTable {
            entries: self.staged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(s: &str) -> PatternRule {
        PatternRule::Literal(Value::Text(s.to_owned()))
    }

    #[test]
    fn precedence_source_then_insertion() {
        let table = PatternTable::builder()
            .entry(PatternSource::Builtin, "mail", literal("builtin"))
            .entry(PatternSource::Environment, "mail", literal("env"))
            .entry(PatternSource::ConfigFile, "mail", literal("file"))
            .entry(PatternSource::Environment, "email", literal("env-specific"))
            .build();

        let hit = table.find("email").unwrap();
        assert_eq!(hit.source, PatternSource::Environment);
        // "mail" was inserted before "email" within the Environment source.
        assert_eq!(hit.rule, literal("env"));
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let table = PatternTable::builder()
            .entry(PatternSource::Builtin, "name", literal("n"))
            .build();
        assert!(table.find("userName").is_some());
        assert!(table.find("NAME").is_some());
        assert!(table.find("address").is_none());
        assert!(table.find("").is_none());
    }

    #[test]
    fn empty_table() {
        assert!(PatternTable::empty().find("email").is_none());
        assert!(PatternTable::empty().is_empty());
    }
}
