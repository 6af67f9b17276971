//! Core runtime for sqlookup: operand values, type annotations, the
//! key/value and document lookup compilers, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod annotation;
pub mod document;
pub mod error;
pub mod fragment;
pub mod lookup;
pub mod obs;
pub mod options;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        fragment::{CompiledFragment, Param, SqlExpr},
        lookup::{Backend, ColumnRef, LookupCompiler, LookupOp, Operand, Predicate},
        value::Value,
    };
}
