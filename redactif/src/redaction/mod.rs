//! Traversal, cycle guard, and entrypoints.
//!
//! This module ties the pieces together:
//!
//! - **`traverse`**: Domain layer - what can be walked (`Redact`, `Kind`)
//! - **`shared`**: Shared ownership - `Rc`/`Arc` walks guarded by identity keys
//! - **`redact`**: Application layer - per-call state and the `redact` entrypoint
//!
//! Tag parsing lives in `crate::tags`; field metadata in `crate::record`.

mod redact;
mod shared;
mod traverse;

pub use redact::{redact, redact_with, IdentityKey, Redactor};
pub use shared::SharedCell;
pub use traverse::{Kind, Redact, Redactable};
