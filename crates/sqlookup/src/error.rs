use derive_more::Display;
use serde::{Deserialize, Serialize};
use sqlookup_core::{
    error::{ErrorClass, LookupError},
    lookup::Backend,
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// Rejection raised while compiling against `backend`.
    pub(crate) fn compile(backend: Backend, err: &LookupError) -> Self {
        Self::new(err.class().into(), backend.into(), err.to_string())
    }
}

impl From<LookupError> for Error {
    fn from(err: LookupError) -> Self {
        let origin = match &err {
            LookupError::Unsupported { backend, .. } => (*backend).into(),
            _ => ErrorOrigin::Interface,
        };

        Self::new(err.class().into(), origin, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Operand shape does not fit the lookup.
    InvalidOperand,

    /// Operand has the wrong scalar type.
    TypeMismatch,

    /// Operand has no document encoding.
    Encoding,

    /// Unknown lookup, or a lookup the column family does not support.
    Unsupported,
}

impl From<ErrorClass> for ErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::InvalidOperand => Self::InvalidOperand,
            ErrorClass::TypeMismatch => Self::TypeMismatch,
            ErrorClass::Encoding => Self::Encoding,
            ErrorClass::Unsupported => Self::Unsupported,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    /// Caller input rejected before any backend was chosen.
    Interface,
    KeyValue,
    Document,
}

impl From<Backend> for ErrorOrigin {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::KeyValue => Self::KeyValue,
            Backend::Document => Self::Document,
        }
    }
}
