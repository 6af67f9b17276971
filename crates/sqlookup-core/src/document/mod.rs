//! Module: document
//! Responsibility: JSON text encoding of operands and document path literals.
//! Does not own: CAST wrapping or placeholder emission.
//! Boundary: used by the document compiler and the serialized-column fallback.

#[cfg(test)]
mod tests;

use crate::value::Value;
use thiserror::Error as ThisError;

///
/// DocumentEncodeError
///

#[derive(Debug, ThisError)]
pub enum DocumentEncodeError {
    #[error("out of range float values are not JSON compliant: {value}")]
    NonFinite { value: f64 },

    #[error("document serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a value as JSON text.
///
/// NaN and infinities are rejected instead of degrading to `null`.
pub fn encode(value: &Value) -> Result<String, DocumentEncodeError> {
    ensure_finite(value)?;

    Ok(serde_json::to_string(value)?)
}

/// Build the `$.<key>` path addressing one top-level member.
///
/// The key is emitted as a JSON string literal so quotes, dots and
/// wildcards inside it cannot change the path structure.
pub fn key_path(key: &str) -> Result<String, DocumentEncodeError> {
    let quoted = serde_json::to_string(key)?;

    Ok(format!("$.{quoted}"))
}

fn ensure_finite(value: &Value) -> Result<(), DocumentEncodeError> {
    match value {
        Value::Float(v) if !v.is_finite() => Err(DocumentEncodeError::NonFinite { value: *v }),
        Value::List(values) => values.iter().try_for_each(ensure_finite),
        Value::Map(entries) => entries.iter().try_for_each(|(_, v)| ensure_finite(v)),
        _ => Ok(()),
    }
}
