//! The dynamic value model produced by generation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::Decimal;

/// A dynamically-typed generated value.
///
/// Every generator produces one of these; structured generation produces a
/// [`Struct`](Value::Struct) whose fields are themselves `Value`s, giving a
/// fully materialized object graph.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// Absent value; also the substitute emitted on cycle/depth truncation.
    Null,
    Bool(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Text(String),
    /// A UTC point in time.
    Instant(DateTime<Utc>),
    /// A zone-less timestamp.
    Timestamp(NaiveDateTime),
    /// A calendar date.
    Date(NaiveDate),
    Decimal(Decimal),
    Uuid(Uuid),
    List(Vec<Value>),
    /// Insertion-ordered set; elements deduplicated by equality.
    Set(Vec<Value>),
    /// Insertion-ordered key/value pairs.
    Map(Vec<(Value, Value)>),
    /// An enumerated value: the enum type's name and the chosen variant.
    Enum {
        type_name: String,
        variant: String,
    },
    Struct(StructValue),
}

impl Value {
    /// Whether this value is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short label of this value's kind, for error messages and tracing.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "i32",
            Self::Long(_) => "i64",
            Self::Float(_) => "f32",
            Self::Double(_) => "f64",
            Self::Char(_) => "char",
            Self::Text(_) => "text",
            Self::Instant(_) => "instant",
            Self::Timestamp(_) => "timestamp",
            Self::Date(_) => "date",
            Self::Decimal(_) => "decimal",
            Self::Uuid(_) => "uuid",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Enum { .. } => "enum",
            Self::Struct(_) => "struct",
        }
    }

    /// Compact rendering for error messages (never the full object graph).
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Long(n) => n.to_string(),
            Self::Float(x) => x.to_string(),
            Self::Double(x) => x.to_string(),
            Self::Char(c) => format!("'{c}'"),
            Self::Text(s) => format!("\"{s}\""),
            Self::Instant(t) => t.to_rfc3339(),
            Self::Timestamp(t) => t.to_string(),
            Self::Date(d) => d.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Uuid(u) => u.to_string(),
            Self::List(items) => format!("list[{}]", items.len()),
            Self::Set(items) => format!("set[{}]", items.len()),
            Self::Map(pairs) => format!("map[{}]", pairs.len()),
            Self::Enum { type_name, variant } => format!("{type_name}::{variant}"),
            Self::Struct(sv) => format!("{} {{..}}", sv.type_name()),
        }
    }

    /// Borrow the inner struct value, if this is a `Struct`.
    #[must_use]
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(sv) => Some(sv),
            _ => None,
        }
    }

    /// Borrow the inner text, if this is `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A materialized structured instance: type name plus an ordered field map.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct StructValue {
    type_name: String,
    fields: BTreeMap<String, Value>,
}

impl StructValue {
    /// An empty instance of the named type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// The instance's type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Direct field assignment (insert or overwrite).
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether a field is present (set to anything, including `Null`).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate over `(name, value)` pairs in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of populated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
