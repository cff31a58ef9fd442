//! Domain layer: the [`Redact`] trait and its standard library impls.
//!
//! Every type the engine can reach implements [`Redact`]. The impl decides
//! two things:
//!
//! - its structural [`Kind`], which the entrypoint checks, and
//! - how to walk into it.
//!
//! | Kind | Types | Behavior |
//! |------|-------|----------|
//! | `Indirection` | `&mut T`, `Box<T>`, `Option<T>`, cells | Walk the referent, if any |
//! | `Record` | derived types, tuples, `Result` | Walk each field in order |
//! | `Sequence` | arrays, slices, `Vec`, `VecDeque`, `LinkedList` | Walk elements by index |
//! | `Map` | `HashMap`, `BTreeMap`, `HashSet`, `BTreeSet` | Nothing; contents are never inspected |
//! | `Scalar` | numbers, strings, `bool`, `char`, ... | Nothing |
//!
//! Values only reachable through a shared reference `&T` are not addressable
//! and are skipped, including everything beneath them. `Rc`/`Arc` live in
//! `shared` because they need the cycle guard.

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    ffi::{OsStr, OsString},
    marker::PhantomData,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    num::{
        NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroU16, NonZeroU32, NonZeroU64,
        NonZeroU8, NonZeroUsize,
    },
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError, RwLock},
    time::{Duration, Instant, SystemTime},
};

use super::redact::{redact, Redactor};

/// Structural kind of a value, used for dispatch and for the entrypoint check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Refers to another value: pointers, boxes, options, cells.
    Indirection,
    /// A composite with fields.
    Record,
    /// An ordered container.
    Sequence,
    /// An associative container.
    Map,
    /// Anything without nested structure.
    Scalar,
}

/// A value the redaction engine can walk.
///
/// Usually derived with `#[derive(Redact)]`. Hand-written impls should report
/// their [`Kind`] and pass every nested value they own to
/// [`Redactor::walk`]:
///
/// ```rust
/// use redactif::{Kind, Redact, Redactor};
///
/// struct Pair<T>(T, T);
///
/// impl<T: Redact> Redact for Pair<T> {
///     fn kind(&self) -> Kind {
///         Kind::Record
///     }
///
///     fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
///         redactor.walk(&mut self.0);
///         redactor.walk(&mut self.1);
///     }
/// }
/// ```
///
/// The trait is object safe, so `Box<dyn Redact>` (or a box of any trait with
/// `Redact` as a supertrait) is walked like any other box.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Redact`",
    label = "this type cannot be walked for redaction",
    note = "use `#[derive(Redact)]` on the type definition",
    note = "or mark the field `#[redactif(skip)]` / `#[redactif(opaque)]` if it comes from another crate"
)]
pub trait Redact {
    /// The structural kind of this value.
    fn kind(&self) -> Kind;

    /// Walks this value, redacting matching fields in place.
    fn redact_with(&mut self, redactor: &mut Redactor<'_>);
}

/// User-facing method form of [`redact`].
///
/// Blanket-implemented for every [`Redact`] type.
pub trait Redactable: Redact {
    /// Redacts `self` in place with the given active tags.
    fn redact_tags<I>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        redact(self, tags)
    }
}

impl<T> Redactable for T where T: Redact + ?Sized {}

// =============================================================================
// Scalars
// =============================================================================

macro_rules! impl_redact_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Redact for $ty {
                fn kind(&self) -> Kind {
                    Kind::Scalar
                }

                fn redact_with(&mut self, _redactor: &mut Redactor<'_>) {}
            }
        )*
    };
}

impl_redact_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, (),
    String, str, OsString, OsStr, PathBuf, Path, Duration, Instant, SystemTime, IpAddr, Ipv4Addr,
    Ipv6Addr, SocketAddr, NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroU8, NonZeroU16,
    NonZeroU32, NonZeroU64, NonZeroUsize,
);

impl<T: ?Sized> Redact for PhantomData<T> {
    fn kind(&self) -> Kind {
        Kind::Scalar
    }

    fn redact_with(&mut self, _redactor: &mut Redactor<'_>) {}
}

// =============================================================================
// Indirections
// =============================================================================

impl<T> Redact for &mut T
where
    T: Redact + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redactor.walk(&mut **self);
    }
}

// Shared references never yield mutable access.
impl<T: ?Sized> Redact for &T {
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, _redactor: &mut Redactor<'_>) {}
}

impl<T> Redact for Box<T>
where
    T: Redact + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redactor.walk(&mut **self);
    }
}

impl<T> Redact for Option<T>
where
    T: Redact,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        if let Some(value) = self {
            redactor.walk(value);
        }
    }
}

impl<T> Redact for Cell<T>
where
    T: Redact + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redactor.walk(self.get_mut());
    }
}

impl<T> Redact for RefCell<T>
where
    T: Redact + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redactor.walk(self.get_mut());
    }
}

impl<T> Redact for Mutex<T>
where
    T: Redact + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redactor.walk(self.get_mut().unwrap_or_else(PoisonError::into_inner));
    }
}

impl<T> Redact for RwLock<T>
where
    T: Redact + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redactor.walk(self.get_mut().unwrap_or_else(PoisonError::into_inner));
    }
}

// =============================================================================
// Records
// =============================================================================

impl<T, E> Redact for Result<T, E>
where
    T: Redact,
    E: Redact,
{
    fn kind(&self) -> Kind {
        Kind::Record
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        match self {
            Ok(value) => redactor.walk(value),
            Err(err) => redactor.walk(err),
        }
    }
}

macro_rules! impl_redact_tuple {
    ($(($($name:ident : $idx:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Redact),+> Redact for ($($name,)+) {
                fn kind(&self) -> Kind {
                    Kind::Record
                }

                fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
                    $(redactor.walk(&mut self.$idx);)+
                }
            }
        )*
    };
}

impl_redact_tuple!(
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
    (A: 0, B: 1, C: 2, D: 3, E: 4),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7),
);

// =============================================================================
// Sequences
// =============================================================================

impl<T> Redact for [T]
where
    T: Redact,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        for value in self.iter_mut() {
            redactor.walk(value);
        }
    }
}

impl<T, const N: usize> Redact for [T; N]
where
    T: Redact,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redactor.walk(self.as_mut_slice());
    }
}

impl<T> Redact for Vec<T>
where
    T: Redact,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redactor.walk(self.as_mut_slice());
    }
}

impl<T> Redact for VecDeque<T>
where
    T: Redact,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        for value in self.iter_mut() {
            redactor.walk(value);
        }
    }
}

impl<T> Redact for LinkedList<T>
where
    T: Redact,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        for value in self.iter_mut() {
            redactor.walk(value);
        }
    }
}

// =============================================================================
// Associative containers
// =============================================================================

// Map and set contents are never inspected. Each container has its own impl,
// so walking values later only touches that container's `redact_with`.

impl<K, V, S> Redact for HashMap<K, V, S> {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn redact_with(&mut self, _redactor: &mut Redactor<'_>) {}
}

impl<K, V> Redact for BTreeMap<K, V> {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn redact_with(&mut self, _redactor: &mut Redactor<'_>) {}
}

impl<T, S> Redact for HashSet<T, S> {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn redact_with(&mut self, _redactor: &mut Redactor<'_>) {}
}

impl<T> Redact for BTreeSet<T> {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn redact_with(&mut self, _redactor: &mut Redactor<'_>) {}
}
