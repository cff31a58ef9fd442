//! Shared ownership: the only place a value can be reached more than once.
//!
//! `Rc`/`Arc` (and their `Weak` handles) can alias and form cycles, so their
//! impls consult the cycle guard before descending. The allocation address is
//! the identity key; it is the same for every clone and every `Weak` of one
//! allocation.
//!
//! Exclusive access through a shared pointer requires a cell. Cells are
//! accessed with non-blocking `try_*` calls: if the value is already borrowed
//! or locked, it is not addressable and is skipped. A poisoned lock is
//! recovered and redacted.

use std::{
    cell::RefCell,
    rc::{self, Rc},
    sync::{self, Arc, Mutex, RwLock, TryLockError},
};

use super::{
    redact::{IdentityKey, Redactor},
    traverse::{Kind, Redact},
};

/// Interior-mutable storage that can be walked through a shared pointer.
///
/// Implemented for `RefCell<T>`, `Mutex<T>` and `RwLock<T>`. `Rc<T>` and
/// `Arc<T>` implement [`Redact`] only when `T: SharedCell`. A field holding
/// `Rc<T>` or `Arc<T>` without a cell is not skipped at runtime: it fails to
/// compile until the data is wrapped in a cell or the field is marked
/// `#[redactif(skip)]`.
pub trait SharedCell {
    /// Walks the contents if exclusive access is available right now.
    fn redact_shared(&self, redactor: &mut Redactor<'_>);
}

impl<T> SharedCell for RefCell<T>
where
    T: Redact + ?Sized,
{
    fn redact_shared(&self, redactor: &mut Redactor<'_>) {
        if let Ok(mut value) = self.try_borrow_mut() {
            redactor.walk(&mut *value);
        }
    }
}

impl<T> SharedCell for Mutex<T>
where
    T: Redact + ?Sized,
{
    fn redact_shared(&self, redactor: &mut Redactor<'_>) {
        let mut value = match self.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return,
        };
        redactor.walk(&mut *value);
    }
}

impl<T> SharedCell for RwLock<T>
where
    T: Redact + ?Sized,
{
    fn redact_shared(&self, redactor: &mut Redactor<'_>) {
        let mut value = match self.try_write() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return,
        };
        redactor.walk(&mut *value);
    }
}

fn redact_once<T>(cell: &T, key: IdentityKey, redactor: &mut Redactor<'_>)
where
    T: SharedCell + ?Sized,
{
    if redactor.enter(key) {
        cell.redact_shared(redactor);
    }
}

impl<T> Redact for Rc<T>
where
    T: SharedCell + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redact_once(&**self, IdentityKey::of(Rc::as_ptr(self)), redactor);
    }
}

impl<T> Redact for Arc<T>
where
    T: SharedCell + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        redact_once(&**self, IdentityKey::of(Arc::as_ptr(self)), redactor);
    }
}

impl<T> Redact for rc::Weak<T>
where
    T: SharedCell + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        if let Some(strong) = self.upgrade() {
            redact_once(&*strong, IdentityKey::of(Rc::as_ptr(&strong)), redactor);
        }
    }
}

impl<T> Redact for sync::Weak<T>
where
    T: SharedCell + ?Sized,
{
    fn kind(&self) -> Kind {
        Kind::Indirection
    }

    fn redact_with(&mut self, redactor: &mut Redactor<'_>) {
        if let Some(strong) = self.upgrade() {
            redact_once(&*strong, IdentityKey::of(Arc::as_ptr(&strong)), redactor);
        }
    }
}
