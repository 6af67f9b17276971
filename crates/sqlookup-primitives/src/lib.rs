//! Scalar vocabulary shared by the lookup compilers.
//!
//! The registry in `macros.rs` is the single source of truth for how each
//! scalar kind is tagged and whether it may appear in ordering comparisons.

#[macro_use]
mod macros;

#[cfg(test)]
mod tests;

///
/// ScalarKind
///
/// Canonical scalar kind of a right-hand lookup operand.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarKind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    Text,
}

impl ScalarKind {
    /// Return the full metadata descriptor for one scalar kind.
    #[must_use]
    pub const fn metadata(self) -> ScalarMetadata {
        scalar_kind_registry!(metadata_from_registry, self)
    }

    /// Return the type tag recorded by the annotation resolver.
    #[must_use]
    pub const fn type_tag(self) -> TypeTag {
        self.metadata().tag
    }

    /// Return whether this scalar may be bound on the right of `<`/`>`.
    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        self.metadata().supports_ordering
    }

    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }
}

///
/// ScalarMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScalarMetadata {
    pub tag: TypeTag,
    pub supports_ordering: bool,
    pub label: &'static str,
}

///
/// TypeTag
///
/// Coarse value family used to pick the SQL cast applied to one extracted
/// key. Text never receives a cast.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeTag {
    Numeric,
    Boolean,
    Text,
}

/// Ordered list of all scalar kinds in registry order.
pub const ALL_SCALAR_KINDS: [ScalarKind; 6] = scalar_kind_registry!(all_kinds_from_registry);
