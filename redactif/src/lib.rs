//! Tag-driven, in-place redaction of sensitive fields.
//!
//! Fields opt into redaction with a tag expression, and each call supplies the
//! set of active tags:
//!
//! ```rust
//! use redactif::{redact, Redact};
//!
//! #[derive(Redact)]
//! struct Account {
//!     id: u64,
//!     #[redactif = "export"]
//!     email: String,
//!     #[redactif = "!admin"]
//!     password_hash: String,
//!     #[redactif = "export,!admin"]
//!     recovery_codes: Vec<String>,
//! }
//!
//! let mut account = Account {
//!     id: 7,
//!     email: "ana@example.com".into(),
//!     password_hash: "$argon2id$...".into(),
//!     recovery_codes: vec!["1234".into()],
//! };
//!
//! redact(&mut account, ["admin"]);
//! assert_eq!(account.email, "ana@example.com");
//! assert_eq!(account.password_hash, "$argon2id$...");
//! assert_eq!(account.recovery_codes, vec!["1234".to_string()]);
//!
//! redact(&mut account, ["export", "admin"]);
//! assert_eq!(account.id, 7);
//! assert!(account.email.is_empty());
//! assert!(account.recovery_codes.is_empty());
//! ```
//!
//! Key rules:
//! - A clause `name` matches when `name` is active; `!name` matches when it is
//!   not. A field is reset to `Default` when any of its clauses matches.
//! - Untagged fields are never reset, but they are still walked.
//! - Maps and sets are never inspected.
//! - Values reachable only through `&T` are skipped with everything beneath
//!   them. Mark foreign or irrelevant fields `#[redactif(skip)]`.
//! - `Rc`/`Arc` cycles terminate: each shared allocation is visited once per
//!   call.
//!
//! What this crate does not do:
//! - perform I/O or logging (see the `slog` feature for an adapter)
//! - inspect values at runtime beyond what `#[derive(Redact)]` generates
//!
//! The `Redact` derive macro lives in `redactif-derive` and is re-exported here.
//!
//! ```compile_fail
//! use redactif::Redact;
//!
//! // Unions cannot be walked.
//! #[derive(Redact)]
//! union Bits {
//!     int: u32,
//!     float: f32,
//! }
//! ```
//!
//! ```compile_fail
//! use redactif::Redact;
//!
//! // Tag expressions must be string literals.
//! #[derive(Redact)]
//! struct Login {
//!     #[redactif = admin]
//!     password: String,
//! }
//! ```
//!
//! ```compile_fail
//! use redactif::Redact;
//!
//! struct Foreign;
//!
//! // Walked fields must implement `Redact`; use `#[redactif(skip)]` instead.
//! #[derive(Redact)]
//! struct Holder {
//!     foreign: Foreign,
//! }
//! ```
//!
//! ```compile_fail
//! use std::rc::Rc;
//!
//! use redactif::Redact;
//!
//! // Shared data is only walked through a cell; wrap it or mark it `skip`.
//! #[derive(Redact)]
//! struct Cached {
//!     shared: Rc<String>,
//! }
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use redactif_derive::Redact;

#[allow(unused_extern_crates)]
extern crate self as redactif;

// Module declarations
mod record;
mod redaction;
#[cfg(feature = "slog")]
pub mod slog;
mod tags;

// Re-exports
pub use record::{FieldAccess, FieldMeta, Record};
pub use redaction::{
    redact, redact_with, IdentityKey, Kind, Redact, Redactable, Redactor, SharedCell,
};
pub use tags::{Clause, TagExpr, TagSet};
