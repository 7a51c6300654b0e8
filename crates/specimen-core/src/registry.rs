//! The type-introspection cache: memoized schema lookup.
//!
//! Schemas are either registered directly (the common path in tests and
//! derive-style integrations) or produced lazily by a [`SchemaProvider`]
//! and memoized on first use. Reads are concurrent; writes happen only at
//! memoization time (insert-if-absent) or at explicit invalidation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use specimen_types::TypeSchema;

/// Lazily describes types the registry has not seen yet.
///
/// The dynamic-model analogue of runtime reflection: implementations derive
/// a [`TypeSchema`] for a type name on demand (from generated code, an IDL,
/// a schema file, ...).
pub trait SchemaProvider: Send + Sync {
    /// Describe `type_name`, or `None` if this provider does not know it.
    fn describe(&self, type_name: &str) -> Option<TypeSchema>;
}

/// Read-through, explicitly-invalidatable schema cache.
pub struct SchemaRegistry {
    cache: RwLock<HashMap<String, Arc<TypeSchema>>>,
    provider: Option<Arc<dyn SchemaProvider>>,
}

impl SchemaRegistry {
    /// Registry with no lazy provider; only directly registered schemas
    /// resolve.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            provider: None,
        }
    }

    /// Registry backed by a lazy provider.
    #[must_use]
    pub fn with_provider(provider: Arc<dyn SchemaProvider>) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            provider: Some(provider),
        }
    }

    /// Register (or replace) a schema directly.
    pub fn register(&self, schema: TypeSchema) {
        self.cache
            .write()
            .insert(schema.name().to_owned(), Arc::new(schema));
    }

    /// Look up a schema, consulting the provider and memoizing its answer
    /// on a miss.
    #[must_use]
    pub fn lookup(&self, type_name: &str) -> Option<Arc<TypeSchema>> {
        if let Some(hit) = self.cache.read().get(type_name) {
            return Some(Arc::clone(hit));
        }
        let described = self.provider.as_ref()?.describe(type_name)?;
        let schema = Arc::new(described);
        let mut cache = self.cache.write();
        // Another thread may have memoized while we described; keep the
        // first entry so concurrent readers observe one schema identity.
        Some(Arc::clone(
            cache
                .entry(type_name.to_owned())
                .or_insert_with(|| Arc::clone(&schema)),
        ))
    }

    /// Drop the memoized entry for one type.
    pub fn invalidate(&self, type_name: &str) {
        self.cache.write().remove(type_name);
    }

    /// Drop every memoized entry.
    pub fn invalidate_all(&self) {
        self.cache.write().clear();
    }

    /// Number of memoized schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Whether nothing is memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
