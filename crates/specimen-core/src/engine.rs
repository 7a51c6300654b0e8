//! The dispatcher: the single recursive entry point.

use std::sync::Arc;

use rand::{thread_rng, Rng};
use specimen_error::Result;
use specimen_types::{Category, Definition, PatternTable, Value};
use tracing::trace;

use crate::classify::classify;
use crate::collection;
use crate::guard::{GenerationContext, DEFAULT_MAX_DEPTH};
use crate::registry::SchemaRegistry;
use crate::resolve::{resolve, Resolution};
use crate::structured;
use crate::{scalar, temporal};

/// The generation engine: schema registry, known-pattern table, and depth
/// bound, wired together once and shared across any number of top-level
/// generations (safely across threads — guard state lives in a per-call
/// [`GenerationContext`]).
pub struct Engine {
    schemas: Arc<SchemaRegistry>,
    patterns: Arc<PatternTable>,
    max_depth: usize,
}

impl Engine {
    /// Start configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder {
            schemas: None,
            patterns: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// The shared schema registry.
    #[must_use]
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// The merged known-pattern table.
    #[must_use]
    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Generate one fully populated value for `def`.
    ///
    /// Returns `Value::Null` when the root itself is truncated (cycle/depth)
    /// or skipped by a null-kind override. Unrecoverable instantiation and
    /// conversion failures surface as errors.
    pub fn generate(&self, def: &Definition) -> Result<Value> {
        let mut cx = GenerationContext::new(self.max_depth);
        Ok(self.generate_in(&mut cx, def)?.unwrap_or(Value::Null))
    }

    /// The recursive dispatch point every generator calls back into.
    ///
    /// `Ok(None)` means the slot was skipped by a null-kind override.
    pub(crate) fn generate_in(
        &self,
        cx: &mut GenerationContext,
        def: &Definition,
    ) -> Result<Option<Value>> {
        let category = classify(def.ty(), &self.schemas);
        trace!(
            coordinate = %def.coordinate(),
            ty = %def.ty(),
            category = %category,
            depth = cx.depth(),
            "dispatch"
        );
        match category {
            leaf if leaf.is_leaf() => {
                let mut rng = thread_rng();
                match resolve(def, leaf, &self.patterns, &mut rng)? {
                    Resolution::Skip => Ok(None),
                    Resolution::Ready(v) => Ok(Some(v)),
                    Resolution::Fresh => Ok(Some(fresh_leaf(leaf, &mut rng))),
                }
            }
            Category::List => collection::generate_sequence(self, cx, def, false),
            Category::Set => collection::generate_sequence(self, cx, def, true),
            Category::Map => collection::generate_map(self, cx, def),
            Category::Enum => structured::generate_enum(self, def),
            Category::Structured => structured::generate_struct(self, cx, def),
            // is_leaf() covered every other category above.
            _ => unreachable!("non-leaf category not dispatched"),
        }
    }
}

/// Fresh generation for a leaf (scalar/temporal) category.
pub(crate) fn fresh_leaf(category: Category, rng: &mut impl Rng) -> Value {
    match category {
        Category::String => scalar::fresh_text(rng),
        Category::Boolean => scalar::fresh_bool(rng),
        Category::Integer => scalar::fresh_int(rng),
        Category::Long => scalar::fresh_long(rng),
        Category::Float => scalar::fresh_float(rng),
        Category::Double => scalar::fresh_double(rng),
        Category::Character => scalar::fresh_char(rng),
        Category::BigDecimal => scalar::fresh_decimal(rng),
        Category::UniqueId => scalar::fresh_uuid(rng),
        Category::Instant => temporal::fresh_instant(rng),
        Category::Timestamp => temporal::fresh_timestamp(rng),
        Category::Date => temporal::fresh_date(rng),
        Category::List
        | Category::Set
        | Category::Map
        | Category::Enum
        | Category::Structured => Value::Null,
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    schemas: Option<Arc<SchemaRegistry>>,
    patterns: Option<Arc<PatternTable>>,
    max_depth: usize,
}

impl EngineBuilder {
    /// Use a shared schema registry.
    #[must_use]
    pub fn schemas(mut self, schemas: Arc<SchemaRegistry>) -> Self {
        self.schemas = Some(schemas);
        self
    }

    /// Use a merged known-pattern table.
    #[must_use]
    pub fn patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = Some(Arc::new(patterns));
        self
    }

    /// Override the maximum nesting depth.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Finish: missing pieces default to an empty registry and an empty
    /// pattern table.
    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            schemas: self.schemas.unwrap_or_default(),
            patterns: self.patterns.unwrap_or_else(|| Arc::new(PatternTable::empty())),
            max_depth: self.max_depth,
        }
    }
}
