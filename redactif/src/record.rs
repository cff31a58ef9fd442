//! Static field metadata for derived record types.
//!
//! `#[derive(Redact)]` emits a [`Record`] impl listing every field with its
//! declared type and tag expression. The traversal reads tag expressions from
//! this table, so the table is the single source of a type's policy.

use crate::tags::TagExpr;

/// How the engine treats a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldAccess {
    /// Evaluate the tag expression (if any), then walk the field.
    Walk,
    /// Evaluate the tag expression but never walk the field.
    Opaque,
    /// The field is invisible to the engine.
    Skip,
}

/// Compile-time description of one record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMeta {
    name: &'static str,
    ty: &'static str,
    variant: Option<&'static str>,
    tags: Option<TagExpr<'static>>,
    access: FieldAccess,
}

impl FieldMeta {
    /// Describes an untagged field that is walked.
    #[must_use]
    pub const fn new(name: &'static str, ty: &'static str) -> Self {
        Self {
            name,
            ty,
            variant: None,
            tags: None,
            access: FieldAccess::Walk,
        }
    }

    /// Attaches a tag expression.
    #[must_use]
    pub const fn tagged(mut self, expr: &'static str) -> Self {
        self.tags = Some(TagExpr::new(expr));
        self
    }

    /// Places the field inside an enum variant.
    #[must_use]
    pub const fn in_variant(mut self, variant: &'static str) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Overrides how the engine treats the field.
    #[must_use]
    pub const fn with_access(mut self, access: FieldAccess) -> Self {
        self.access = access;
        self
    }

    /// Field name; positional fields use their index (`"0"`, `"1"`, ...).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type as written in the source.
    pub fn ty(&self) -> &'static str {
        self.ty
    }

    /// Enclosing enum variant, if any.
    pub fn variant(&self) -> Option<&'static str> {
        self.variant
    }

    /// The field's tag expression, if it has one.
    pub fn tags(&self) -> Option<TagExpr<'static>> {
        self.tags
    }

    /// How the engine treats the field.
    pub fn access(&self) -> FieldAccess {
        self.access
    }
}

/// Types whose fields are described by static metadata.
///
/// Implemented by `#[derive(Redact)]`. Enums list the fields of every variant
/// in declaration order.
pub trait Record {
    /// All fields, in declaration order.
    const FIELDS: &'static [FieldMeta];

    /// Looks up a field by name, ignoring variants.
    fn field(name: &str) -> Option<&'static FieldMeta> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}
