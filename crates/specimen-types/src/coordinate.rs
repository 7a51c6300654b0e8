//! Structural path addressing for nodes in the generated object graph.
//!
//! The root coordinate is the empty string. Descending into a field appends
//! `.name` (the leading dot is omitted at the root, so a top-level field is
//! addressed as `name`, a nested one as `outer.inner`). Descending into a
//! collection element or map entry appends `[i]` / `[key]` with no dot
//! before the bracket. Within one top-level generation, two distinct
//! structural positions never share a coordinate.

use std::fmt;

/// A path identifying one node's position in the generated object graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Coordinate(String);

impl Coordinate {
    /// The root coordinate (empty path).
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Build a coordinate from an already-flattened path string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Whether this is the root coordinate.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Coordinate of the field `name` under this node.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_owned())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Coordinate of the collection element at position `i` under this node.
    #[must_use]
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{i}]", self.0))
    }

    /// Coordinate of the map entry with literal key `key` under this node.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{key}]", self.0))
    }

    /// The final path segment, with any trailing index marker stripped.
    ///
    /// `user.emails[3]` → `emails`; `user.email` → `email`; root → `""`.
    /// Used for case-insensitive known-pattern matching.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        let tail = match self.0.rfind('.') {
            Some(dot) => &self.0[dot + 1..],
            None => self.0.as_str(),
        };
        match tail.find('[') {
            Some(bracket) => &tail[..bracket],
            None => tail,
        }
    }

    /// If this coordinate is `prefix[x]` (optionally followed by a deeper
    /// path), return the bracket content `x`.
    ///
    /// Returns `None` when this coordinate does not start with
    /// `prefix[`, when the bracket is unterminated, or when anything other
    /// than `.`/`[` follows the closing bracket.
    #[must_use]
    pub fn bracket_content_under<'a>(&'a self, prefix: &Self) -> Option<&'a str> {
        let rest = self.0.strip_prefix(prefix.as_str())?;
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        let after = &inner[close + 1..];
        if after.is_empty() || after.starts_with('.') || after.starts_with('[') {
            Some(&inner[..close])
        } else {
            None
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for Coordinate {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
