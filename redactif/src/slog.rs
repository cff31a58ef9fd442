//! Adapters for emitting redacted values through `slog`.
//!
//! This module connects [`crate::redact`] with `slog` by providing a
//! `slog::Value` that serializes the redacted value as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is taken after redaction with the
//!   caller's tags, never from the original value.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide which tags are active.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::redaction::{redact, Redact};

/// Placeholder stored when the redacted value cannot be converted to JSON.
pub const SERIALIZE_FAILED: &str = "Failed to serialize redacted value";

/// A `slog::Value` that emits an owned redacted payload as structured JSON.
#[derive(Clone, Debug)]
pub struct RedactedJson {
    value: JsonValue,
}

impl RedactedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON payload that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their redacted form as JSON.
///
/// ## Example
/// ```ignore
/// use redactif::slog::IntoRedactedJson;
///
/// info!(logger, "login"; "request" => request.into_redacted_json(["support"]));
/// ```
pub trait IntoRedactedJson: Redact + Serialize + Sized {
    /// Redacts `self` with `tags` and returns a `slog::Value` holding the
    /// redacted JSON.
    ///
    /// If serialization fails, the payload is the JSON string
    /// [`SERIALIZE_FAILED`].
    fn into_redacted_json<I>(mut self, tags: I) -> RedactedJson
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        redact(&mut self, tags);
        let json_value = serde_json::to_value(&self)
            .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string()));
        RedactedJson::new(json_value)
    }
}

impl<T> IntoRedactedJson for T where T: Redact + Serialize {}
