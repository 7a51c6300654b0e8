//! Per-type capability surface consumed by the structured generator.
//!
//! A [`TypeSchema`] is the engine's only window into a caller-defined
//! shape: its fields, its constructors, its zero-argument factories, and
//! any conventional setters. Schemas are registered (or provided lazily)
//! through the schema registry; the engine itself never inspects host-language
//! types.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use specimen_error::Result;

use crate::{StructValue, TypeExpr, Value};

/// Constructor body: receives one generated value per parameter, in
/// declaration order, and returns the built instance.
pub type ConstructFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// Zero-argument named factory body.
pub type FactoryFn = dyn Fn() -> Result<Value> + Send + Sync;

/// Conventional setter body: applied when a field cannot be assigned
/// directly.
pub type SetterFn = dyn Fn(&mut StructValue, Value) -> Result<()> + Send + Sync;

/// Constructor visibility, used for candidate ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    /// Preferred: public constructors.
    Public,
    /// Fallback: crate-visible (the least-restrictive non-public level).
    Crate,
    /// Never invoked; a type with only private constructors fails.
    Private,
}

/// One declared constructor parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub ty: TypeExpr,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// One candidate constructor.
#[derive(Clone)]
pub struct ConstructorSpec {
    pub visibility: Visibility,
    pub params: Vec<ParamSpec>,
    /// Custom invocation body. When absent, the default body builds a
    /// struct value with each parameter assigned to the same-named field.
    pub invoke: Option<Arc<ConstructFn>>,
}

impl ConstructorSpec {
    /// A public constructor with the default field-per-parameter body.
    #[must_use]
    pub fn public(params: Vec<ParamSpec>) -> Self {
        Self {
            visibility: Visibility::Public,
            params,
            invoke: None,
        }
    }

    /// A constructor with an explicit visibility and default body.
    #[must_use]
    pub fn with_visibility(visibility: Visibility, params: Vec<ParamSpec>) -> Self {
        Self {
            visibility,
            params,
            invoke: None,
        }
    }

    /// Attach a custom invocation body.
    #[must_use]
    pub fn invoking(mut self, f: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static) -> Self {
        self.invoke = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ConstructorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorSpec")
            .field("visibility", &self.visibility)
            .field("params", &self.params)
            .field("invoke", &self.invoke.as_ref().map(|_| "..."))
            .finish()
    }
}

/// One declared instance field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeExpr,
    /// Constant fields (the analogue of static/final members) are never
    /// populated.
    pub constant: bool,
    /// Direct assignment unavailable: population must go through the
    /// schema's conventional setter.
    pub setter_only: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            constant: false,
            setter_only: false,
        }
    }

    /// Mark as a constant (excluded from population).
    #[must_use]
    pub const fn constant(mut self) -> Self {
        self.constant = true;
        self
    }

    /// Mark as assignable only through the registered setter.
    #[must_use]
    pub const fn via_setter(mut self) -> Self {
        self.setter_only = true;
        self
    }
}

/// A public, zero-argument named factory.
#[derive(Clone)]
pub struct FactorySpec {
    pub name: String,
    pub produce: Arc<FactoryFn>,
}

impl FactorySpec {
    pub fn new(
        name: impl Into<String>,
        produce: impl Fn() -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            produce: Arc::new(produce),
        }
    }
}

impl fmt::Debug for FactorySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactorySpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// What kind of shape a schema describes.
#[derive(Clone)]
pub enum SchemaKind {
    Struct {
        fields: Vec<FieldSpec>,
        constructors: Vec<ConstructorSpec>,
        factories: Vec<FactorySpec>,
        setters: HashMap<String, Arc<SetterFn>>,
    },
    Enum {
        variants: Vec<String>,
    },
}

impl fmt::Debug for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct {
                fields,
                constructors,
                factories,
                setters,
            } => f
                .debug_struct("Struct")
                .field("fields", fields)
                .field("constructors", constructors)
                .field("factories", factories)
                .field("setters", &setters.keys().collect::<Vec<_>>())
                .finish(),
            Self::Enum { variants } => {
                f.debug_struct("Enum").field("variants", variants).finish()
            }
        }
    }
}

/// The full capability surface for one named type.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    name: String,
    type_params: Vec<String>,
    kind: SchemaKind,
}

impl TypeSchema {
    /// Start building a struct schema.
    pub fn structure(name: impl Into<String>) -> StructSchemaBuilder {
        StructSchemaBuilder {
            name: name.into(),
            type_params: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            factories: Vec::new(),
            setters: HashMap::new(),
        }
    }

    /// An enum schema with the given variants.
    pub fn enumeration(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            kind: SchemaKind::Enum {
                variants: variants.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// The described type's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type parameters, in positional order.
    #[must_use]
    pub fn type_params(&self) -> &[String] {
        &self.type_params
    }

    /// The schema kind.
    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Whether this schema describes an enumerated type.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, SchemaKind::Enum { .. })
    }

    /// Enum variants (empty slice for struct schemas).
    #[must_use]
    pub fn variants(&self) -> &[String] {
        match &self.kind {
            SchemaKind::Enum { variants } => variants,
            SchemaKind::Struct { .. } => &[],
        }
    }

    /// Declared instance fields (empty slice for enum schemas).
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        match &self.kind {
            SchemaKind::Struct { fields, .. } => fields,
            SchemaKind::Enum { .. } => &[],
        }
    }

    /// Declared constructors.
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorSpec] {
        match &self.kind {
            SchemaKind::Struct { constructors, .. } => constructors,
            SchemaKind::Enum { .. } => &[],
        }
    }

    /// Declared zero-argument factories.
    #[must_use]
    pub fn factories(&self) -> &[FactorySpec] {
        match &self.kind {
            SchemaKind::Struct { factories, .. } => factories,
            SchemaKind::Enum { .. } => &[],
        }
    }

    /// Conventional setter for a field, if registered.
    #[must_use]
    pub fn setter(&self, field: &str) -> Option<&Arc<SetterFn>> {
        match &self.kind {
            SchemaKind::Struct { setters, .. } => setters.get(field),
            SchemaKind::Enum { .. } => None,
        }
    }
}

/// Builder for struct schemas.
pub struct StructSchemaBuilder {
    name: String,
    type_params: Vec<String>,
    fields: Vec<FieldSpec>,
    constructors: Vec<ConstructorSpec>,
    factories: Vec<FactorySpec>,
    setters: HashMap<String, Arc<SetterFn>>,
}

impl StructSchemaBuilder {
    /// Declare a type parameter (positional order matters for binding).
    #[must_use]
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Declare a plain assignable field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeExpr) -> Self {
        self.fields.push(FieldSpec::new(name, ty));
        self
    }

    /// Declare a field with full control over its flags.
    #[must_use]
    pub fn field_spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Declare a constructor.
    #[must_use]
    pub fn constructor(mut self, spec: ConstructorSpec) -> Self {
        self.constructors.push(spec);
        self
    }

    /// Declare a zero-argument factory.
    pub fn factory(
        mut self,
        name: impl Into<String>,
        produce: impl Fn() -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.factories.push(FactorySpec::new(name, produce));
        self
    }

    /// Register a conventional setter for a field.
    pub fn setter(
        mut self,
        field: impl Into<String>,
        f: impl Fn(&mut StructValue, Value) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.setters.insert(field.into(), Arc::new(f));
        self
    }

    /// Finish the schema.
    #[must_use]
    pub fn build(self) -> TypeSchema {
        TypeSchema {
            name: self.name,
            type_params: self.type_params,
            kind: SchemaKind::Struct {
                fields: self.fields,
                constructors: self.constructors,
                factories: self.factories,
                setters: self.setters,
            },
        }
    }
}
