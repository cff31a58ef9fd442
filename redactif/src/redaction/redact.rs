//! Application layer: the per-call redaction state and the public entrypoints.
//!
//! A [`Redactor`] owns the two invocation-scoped sets: the active tags and the
//! visited storage identities. It is created fresh by [`redact`] and dropped
//! when the call returns, so nothing survives across calls.
//!
//! The walk is a plain depth-first recursion. Its depth equals the depth of the
//! value graph, so pathologically deep graphs can exhaust the stack.

use std::{any::type_name, collections::HashSet};

use super::traverse::{Kind, Redact};
use crate::{
    record::{FieldAccess, FieldMeta},
    tags::TagSet,
};

/// Identity of a storage location that can be reached more than once.
///
/// Built from the address of shared storage (an `Rc`/`Arc` allocation). Keys
/// are only compared within one call, while every keyed allocation is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdentityKey(usize);

impl IdentityKey {
    /// Derives a key from a pointer, discarding any pointer metadata.
    #[must_use]
    pub fn of<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>() as usize)
    }
}

/// Invocation state threaded through the traversal.
///
/// Custom [`Redact`] impls receive a `Redactor` and hand nested values back to
/// it with [`Redactor::walk`]. Impls for shared storage must call
/// [`Redactor::enter`] before descending so cycles terminate.
#[derive(Debug)]
pub struct Redactor<'t> {
    tags: &'t TagSet,
    visited: HashSet<IdentityKey>,
}

impl<'t> Redactor<'t> {
    /// Starts a traversal with an empty visited set.
    #[must_use]
    pub fn new(tags: &'t TagSet) -> Self {
        Self {
            tags,
            visited: HashSet::new(),
        }
    }

    /// The active tags for this call.
    pub fn tags(&self) -> &'t TagSet {
        self.tags
    }

    /// Recurses into `value`.
    pub fn walk<T>(&mut self, value: &mut T)
    where
        T: Redact + ?Sized,
    {
        value.redact_with(self);
    }

    /// Marks `key` visited. Returns `false` if it was already visited, in
    /// which case the caller must not descend.
    pub fn enter(&mut self, key: IdentityKey) -> bool {
        self.visited.insert(key)
    }

    /// Returns `true` when the field's tag expression matches the active tags.
    ///
    /// Untagged and skipped fields never match.
    pub fn matches(&self, field: &FieldMeta) -> bool {
        if field.access() == FieldAccess::Skip {
            return false;
        }
        field.tags().is_some_and(|expr| expr.matches(self.tags))
    }

    /// Overwrites `value` with its default if the field matches.
    ///
    /// Returns whether the value was zeroed. The value is never walked.
    pub fn zero<T>(&self, value: &mut T, field: &FieldMeta) -> bool
    where
        T: Default,
    {
        if !self.matches(field) {
            return false;
        }
        *value = T::default();
        true
    }

    /// Processes one record field: zero it on a match, then walk whatever
    /// value it now holds.
    pub fn field<T>(&mut self, value: &mut T, field: &FieldMeta)
    where
        T: Redact + Default,
    {
        if field.access() == FieldAccess::Skip {
            return;
        }
        self.zero(value, field);
        if field.access() == FieldAccess::Walk {
            self.walk(value);
        }
    }
}

/// Redacts everything reachable from `value` and returns it.
///
/// `value` must be an indirection (`&mut T`, `Box<T>`, `Option<T>`, or a shared
/// cell such as `Rc<RefCell<T>>`). Fields whose tag expression matches `tags`
/// are reset to their `Default` in place.
///
/// # Panics
///
/// Panics before touching anything if `value` is not an indirection. Passing
/// a record by value is a programming error.
///
/// ```rust
/// use redactif::{redact, Redact};
///
/// #[derive(Redact)]
/// struct Login {
///     user: String,
///     #[redactif = "!admin"]
///     password: String,
/// }
///
/// let mut login = Login { user: "ana".into(), password: "hunter2".into() };
/// redact(&mut login, ["support"]);
/// assert_eq!(login.user, "ana");
/// assert_eq!(login.password, "");
/// ```
pub fn redact<V, I>(value: V, tags: I) -> V
where
    V: Redact,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let tags: TagSet = tags.into_iter().collect();
    redact_with(value, &tags)
}

/// Like [`redact`], reusing a prebuilt [`TagSet`].
///
/// # Panics
///
/// Panics if `value` is not an indirection.
pub fn redact_with<V>(mut value: V, tags: &TagSet) -> V
where
    V: Redact,
{
    ensure_indirection(&value);
    Redactor::new(tags).walk(&mut value);
    value
}

fn ensure_indirection<V>(value: &V)
where
    V: Redact,
{
    let kind = value.kind();
    assert!(
        kind == Kind::Indirection,
        "cannot redact non-pointer value of type `{}` ({kind:?})",
        type_name::<V>()
    );
}
