use crate::{
    document::DocumentEncodeError,
    lookup::{Backend, LookupOp},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// LookupError
///
/// Compile-time rejection of one predicate. No partial SQL accompanies it.
///

#[derive(Debug, ThisError)]
pub enum LookupError {
    #[error("invalid value for '{lookup}' lookup: {reason}")]
    InvalidOperandShape { lookup: LookupOp, reason: String },

    #[error("'{lookup}' lookup only works with {expected} values")]
    TypeMismatch {
        lookup: LookupOp,
        expected: &'static str,
    },

    #[error("{0}")]
    Encoding(#[from] DocumentEncodeError),

    #[error("'{lookup}' lookup is not supported on {backend} columns")]
    Unsupported { lookup: LookupOp, backend: Backend },

    #[error("unknown lookup '{name}'")]
    UnknownLookup { name: String },
}

impl LookupError {
    pub(crate) fn invalid(lookup: LookupOp, reason: impl Into<String>) -> Self {
        Self::InvalidOperandShape {
            lookup,
            reason: reason.into(),
        }
    }

    pub(crate) const fn type_mismatch(lookup: LookupOp, expected: &'static str) -> Self {
        Self::TypeMismatch { lookup, expected }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidOperandShape { .. } => ErrorClass::InvalidOperand,
            Self::TypeMismatch { .. } => ErrorClass::TypeMismatch,
            Self::Encoding(_) => ErrorClass::Encoding,
            Self::Unsupported { .. } | Self::UnknownLookup { .. } => ErrorClass::Unsupported,
        }
    }
}

///
/// ErrorClass
/// Stable classification of compile errors for callers and metrics.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    InvalidOperand,
    TypeMismatch,
    Encoding,
    Unsupported,
}

impl ErrorClass {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidOperand => "invalid_operand",
            Self::TypeMismatch => "type_mismatch",
            Self::Encoding => "encoding",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
