//! Module: lookup
//! Responsibility: predicate vocabulary and `(backend, lookup)` dispatch.
//! Does not own: SQL shapes (see `key_value`, `document`, `fallback`).
//! Boundary: `LookupCompiler::compile` is the only entrypoint callers use.

mod document;
mod fallback;
mod key_value;

#[cfg(test)]
mod tests;

use crate::{
    annotation::{self, TypeAnnotation},
    error::LookupError,
    fragment::{CompiledFragment, FragmentBuilder, Param, SqlExpr},
    obs::{MetricsEvent, sink},
    options::CompileOptions,
    value::Value,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// LookupOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LookupOp {
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    IContains,
    IsNull,
    Exact,
    HasKey,
    HasKeys,
    HasAnyKeys,
    ContainedBy,
}

impl LookupOp {
    pub const ALL: [Self; 12] = [
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Contains,
        Self::IContains,
        Self::IsNull,
        Self::Exact,
        Self::HasKey,
        Self::HasKeys,
        Self::HasAnyKeys,
        Self::ContainedBy,
    ];

    /// Lookup name as written by query front ends.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Contains => "contains",
            Self::IContains => "icontains",
            Self::IsNull => "isnull",
            Self::Exact => "exact",
            Self::HasKey => "has_key",
            Self::HasKeys => "has_keys",
            Self::HasAnyKeys => "has_any_keys",
            Self::ContainedBy => "contained_by",
        }
    }

    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte)
    }

    /// SQL comparison operator for exact and ordering lookups.
    pub(crate) const fn comparison_sql(self) -> Option<&'static str> {
        match self {
            Self::Gt => Some(">"),
            Self::Gte => Some(">="),
            Self::Lt => Some("<"),
            Self::Lte => Some("<="),
            Self::Exact => Some("="),
            _ => None,
        }
    }
}

impl fmt::Display for LookupOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LookupOp {
    type Err = LookupError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| LookupError::UnknownLookup {
                name: name.to_string(),
            })
    }
}

///
/// Backend
///
/// Column family plus the SQL dialect its lookups compile to.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Flat string map column (PostgreSQL hstore idiom).
    #[default]
    #[display("key_value")]
    KeyValue,
    /// Nested document column (MySQL JSON idiom).
    #[display("document")]
    Document,
}

///
/// ColumnRef
///
/// Left operand: a pre-rendered, already quoted column expression.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnRef {
    pub expr: SqlExpr,

    /// Trailing `::type` marker the front end attached, without the colons.
    pub cast: Option<String>,

    /// Column stores scalar values through a serializer.
    pub serialized: bool,
}

impl ColumnRef {
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            expr: SqlExpr::raw(sql),
            cast: None,
            serialized: false,
        }
    }

    #[must_use]
    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = Some(cast.into());
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.expr.params = params;
        self
    }

    #[must_use]
    pub fn serialized(mut self) -> Self {
        self.serialized = true;
        self
    }

    /// Write the column with its cast marker.
    pub(crate) fn render(&self, out: &mut FragmentBuilder) {
        self.render_with_cast(out, self.cast.as_deref());
    }

    /// Write the column with its marker replaced by `cast` (`None` strips it).
    pub(crate) fn render_with_cast(&self, out: &mut FragmentBuilder, cast: Option<&str>) {
        out.push_expr(&self.expr);
        if let Some(cast) = cast {
            out.push_sql("::").push_sql(cast);
        }
    }
}

///
/// Operand
///
/// Right operand. `Expr` marks an already prepared SQL expression that the
/// document compiler must not re-encode.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Value(Value),
    Expr(SqlExpr),
}

impl Operand {
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Expr(_) => None,
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<SqlExpr> for Operand {
    fn from(expr: SqlExpr) -> Self {
        Self::Expr(expr)
    }
}

///
/// Predicate
///
/// One lookup against one column. The type annotation is resolved here,
/// from the typed operand, and never recomputed.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    lhs: ColumnRef,
    op: LookupOp,
    rhs: Operand,
    annotation: TypeAnnotation,
}

impl Predicate {
    #[must_use]
    pub fn new(lhs: ColumnRef, op: LookupOp, rhs: impl Into<Operand>) -> Self {
        let rhs = rhs.into();
        let annotation = rhs
            .as_value()
            .map(annotation::resolve)
            .unwrap_or_default();

        Self {
            lhs,
            op,
            rhs,
            annotation,
        }
    }

    #[must_use]
    pub const fn lhs(&self) -> &ColumnRef {
        &self.lhs
    }

    #[must_use]
    pub const fn op(&self) -> LookupOp {
        self.op
    }

    #[must_use]
    pub const fn rhs(&self) -> &Operand {
        &self.rhs
    }

    #[must_use]
    pub const fn annotation(&self) -> &TypeAnnotation {
        &self.annotation
    }
}

///
/// LookupContext
///
/// Borrowed inputs of one compilation.
///

pub(crate) struct LookupContext<'a> {
    pub(crate) predicate: &'a Predicate,
    pub(crate) options: &'a CompileOptions,
}

impl LookupContext<'_> {
    pub(crate) const fn op(&self) -> LookupOp {
        self.predicate.op
    }

    pub(crate) const fn lhs(&self) -> &ColumnRef {
        &self.predicate.lhs
    }

    pub(crate) const fn rhs(&self) -> &Operand {
        &self.predicate.rhs
    }

    pub(crate) const fn value(&self) -> Option<&Value> {
        self.predicate.rhs.as_value()
    }

    pub(crate) const fn builder(&self) -> FragmentBuilder {
        FragmentBuilder::new(self.options.placeholder)
    }

    /// Cast suffix for one key of a mapping operand.
    pub(crate) fn cast_for(&self, key: &str) -> String {
        self.options
            .cast_suffix(self.predicate.annotation.tag(key))
    }

    pub(crate) fn invalid(&self, reason: impl Into<String>) -> LookupError {
        LookupError::invalid(self.op(), reason)
    }
}

type CompileFn = fn(&LookupContext<'_>) -> Result<CompiledFragment, LookupError>;

///
/// LookupRule
///
/// One supported `(backend, lookup)` pair.
///

#[derive(Clone, Copy)]
pub(crate) struct LookupRule {
    pub(crate) backend: Backend,
    pub(crate) op: LookupOp,
    pub(crate) compile: CompileFn,
}

pub(crate) const LOOKUP_TABLE: &[LookupRule] = &[
    LookupRule {
        backend: Backend::KeyValue,
        op: LookupOp::Gt,
        compile: key_value::compile_ordering,
    },
    LookupRule {
        backend: Backend::KeyValue,
        op: LookupOp::Gte,
        compile: key_value::compile_ordering,
    },
    LookupRule {
        backend: Backend::KeyValue,
        op: LookupOp::Lt,
        compile: key_value::compile_ordering,
    },
    LookupRule {
        backend: Backend::KeyValue,
        op: LookupOp::Lte,
        compile: key_value::compile_ordering,
    },
    LookupRule {
        backend: Backend::KeyValue,
        op: LookupOp::Contains,
        compile: key_value::compile_contains,
    },
    LookupRule {
        backend: Backend::KeyValue,
        op: LookupOp::IContains,
        compile: key_value::compile_contains,
    },
    LookupRule {
        backend: Backend::KeyValue,
        op: LookupOp::IsNull,
        compile: key_value::compile_is_null,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::Exact,
        compile: document::compile_comparison,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::Gt,
        compile: document::compile_comparison,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::Gte,
        compile: document::compile_comparison,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::Lt,
        compile: document::compile_comparison,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::Lte,
        compile: document::compile_comparison,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::Contains,
        compile: document::compile_contains,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::ContainedBy,
        compile: document::compile_contained_by,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::HasKey,
        compile: document::compile_has_key,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::HasKeys,
        compile: document::compile_has_keys,
    },
    LookupRule {
        backend: Backend::Document,
        op: LookupOp::HasAnyKeys,
        compile: document::compile_has_keys,
    },
];

///
/// FallbackRule
///
/// Generic column behavior used when a backend has no specialised rule.
///

#[derive(Clone, Copy)]
pub(crate) struct FallbackRule {
    pub(crate) op: LookupOp,
    pub(crate) compile: CompileFn,
}

pub(crate) const FALLBACK_TABLE: &[FallbackRule] = &[
    FallbackRule {
        op: LookupOp::IsNull,
        compile: fallback::compile_null_check,
    },
    FallbackRule {
        op: LookupOp::Exact,
        compile: fallback::compile_exact,
    },
];

/// Resolve the compile function for one pair: specialised rule first, then
/// the generic fallback.
fn resolve_rule(backend: Backend, op: LookupOp) -> Option<CompileFn> {
    LOOKUP_TABLE
        .iter()
        .find(|rule| rule.backend == backend && rule.op == op)
        .map(|rule| rule.compile)
        .or_else(|| {
            FALLBACK_TABLE
                .iter()
                .find(|rule| rule.op == op)
                .map(|rule| rule.compile)
        })
}

/// Returns whether `op` compiles on `backend`, specialised or generic.
#[must_use]
pub fn supports(backend: Backend, op: LookupOp) -> bool {
    resolve_rule(backend, op).is_some()
}

///
/// LookupCompiler
///
/// Stateless compiler bound to one backend and one set of options.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LookupCompiler {
    backend: Backend,
    options: CompileOptions,
}

impl LookupCompiler {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self::with_options(backend, CompileOptions::default())
    }

    #[must_use]
    pub const fn with_options(backend: Backend, options: CompileOptions) -> Self {
        Self { backend, options }
    }

    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    #[must_use]
    pub const fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile one predicate into SQL text and ordered bind parameters.
    pub fn compile(&self, predicate: &Predicate) -> Result<CompiledFragment, LookupError> {
        let backend = self.backend;
        let lookup = predicate.op();

        let result = match resolve_rule(backend, lookup) {
            Some(compile) => compile(&LookupContext {
                predicate,
                options: &self.options,
            }),
            None => Err(LookupError::Unsupported { lookup, backend }),
        };

        match &result {
            Ok(fragment) => {
                tracing::debug!(
                    %backend,
                    %lookup,
                    placeholders = fragment.placeholder_count(),
                    "compiled lookup"
                );
                sink::record(MetricsEvent::Compiled {
                    backend,
                    lookup,
                    params: u64::try_from(fragment.params().len()).unwrap_or(u64::MAX),
                });
            }
            Err(err) => {
                let class = err.class();
                tracing::debug!(%backend, %lookup, %class, error = %err, "rejected lookup");
                sink::record(MetricsEvent::Rejected {
                    backend,
                    lookup,
                    class,
                });
            }
        }

        result
    }
}
