//! ## Crate layout
//! - `core`: operand values, type annotations, lookup compilers, and
//!   observability.
//! - `primitives`: scalar kind registry shared by the annotation resolver.
//! - `error`: public error taxonomy.
//!
//! The `prelude` module carries the vocabulary needed to build and compile
//! predicates.

pub use sqlookup_core as core;
pub use sqlookup_primitives as primitives;

mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

use sqlookup_core::{
    fragment::CompiledFragment,
    lookup::{Backend, ColumnRef, LookupCompiler, LookupOp, Operand, Predicate},
    options::CompileOptions,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Compiler
///
/// Lookup compiler addressed by lookup name, with errors mapped to the
/// public taxonomy.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Compiler {
    inner: LookupCompiler,
}

impl Compiler {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self {
            inner: LookupCompiler::new(backend),
        }
    }

    #[must_use]
    pub const fn with_options(backend: Backend, options: CompileOptions) -> Self {
        Self {
            inner: LookupCompiler::with_options(backend, options),
        }
    }

    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.inner.backend()
    }

    /// Compile `lhs <lookup> rhs`, resolving the lookup by name.
    pub fn compile(
        &self,
        lhs: ColumnRef,
        lookup: &str,
        rhs: impl Into<Operand>,
    ) -> Result<CompiledFragment, Error> {
        let op: LookupOp = lookup.parse()?;

        self.compile_predicate(&Predicate::new(lhs, op, rhs))
    }

    pub fn compile_predicate(&self, predicate: &Predicate) -> Result<CompiledFragment, Error> {
        self.inner
            .compile(predicate)
            .map_err(|err| Error::compile(self.backend(), &err))
    }
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Compiler,
        core::{
            fragment::{CompiledFragment, Param, Placeholder, SqlExpr},
            lookup::{Backend, ColumnRef, LookupOp, Operand, Predicate},
            options::CompileOptions,
            value::Value,
        },
    };
}
