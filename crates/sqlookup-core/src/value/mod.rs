#[cfg(test)]
mod tests;

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};
use sqlookup_primitives::ScalarKind;
use thiserror::Error as ThisError;

///
/// MapValueError
///
/// Invariant violations for `Value::Map` construction.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MapValueError {
    #[error("map contains duplicate key '{key}' at positions {left_index} and {right_index}")]
    DuplicateKey {
        key: String,
        left_index: usize,
        right_index: usize,
    },
}

///
/// Value
/// right-hand operand of a lookup, typed by the caller
///
/// Null → SQL NULL / JSON null.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    /// Ordered sequence; order is preserved into emitted parameters.
    List(Vec<Self>),
    /// Key → value mapping.
    ///
    /// - Entries keep caller insertion order; compilers emit conditions and
    ///   parameters in this order.
    /// - Keys are unique when built through [`Value::map`].
    Map(Vec<(String, Self)>),
}

impl Value {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Build a map, rejecting duplicate keys.
    pub fn map<I, K, V>(entries: I) -> Result<Self, MapValueError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        let mut out: Vec<(String, Self)> = Vec::new();
        for (right_index, (key, value)) in entries.into_iter().enumerate() {
            let key = key.into();
            if let Some(left_index) = out.iter().position(|(existing, _)| *existing == key) {
                return Err(MapValueError::DuplicateKey {
                    key,
                    left_index,
                    right_index,
                });
            }
            out.push((key, value.into()));
        }

        Ok(Self::Map(out))
    }

    /// Scalar kind of this value, or `None` for lists and maps.
    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Null => Some(ScalarKind::Null),
            Self::Bool(_) => Some(ScalarKind::Bool),
            Self::Int(_) => Some(ScalarKind::Int),
            Self::Uint(_) => Some(ScalarKind::Uint),
            Self::Float(_) => Some(ScalarKind::Float),
            Self::Text(_) => Some(ScalarKind::Text),
            Self::List(_) | Self::Map(_) => None,
        }
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.scalar_kind().is_some()
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&[(String, Self)]> {
        match self {
            Self::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Text rendering of a non-null scalar, as stored in a key/value column.
    ///
    /// Whole floats keep their fraction (`1.0`, not `1`), matching the
    /// document encoding of the same value.
    /// Returns `None` for `Null`, lists and maps.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Bool(v) => Some(v.to_string()),
            Self::Int(v) => Some(v.to_string()),
            Self::Uint(v) => Some(v.to_string()),
            Self::Float(v) => Some(float_text(*v)),
            Self::Text(v) => Some(v.clone()),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Label used in diagnostics.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Map(_) => "map",
            _ => match self.scalar_kind() {
                Some(kind) => kind.label(),
                None => "unknown",
            },
        }
    }
}

// Non-finite floats have no JSON number form and keep the std rendering.
fn float_text(value: f64) -> String {
    serde_json::Number::from_f64(value).map_or_else(|| value.to_string(), |n| n.to_string())
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Uint(v) => serializer.serialize_u64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Text(v) => serializer.serialize_str(v),
            Self::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(values: Vec<Self>) -> Self {
        Self::List(values)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
