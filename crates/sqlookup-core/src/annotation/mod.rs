//! Module: annotation
//! Responsibility: record the type family of each key of a mapping operand.
//! Does not own: cast rendering or SQL emission.
//! Boundary: computed once by `Predicate::new`, read by the compilers.


use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use sqlookup_primitives::{ScalarKind, TypeTag};
use std::collections::BTreeMap;

///
/// TypeAnnotation
///
/// Per-key type tags of a mapping operand. Immutable once resolved.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct TypeAnnotation(BTreeMap<String, TypeTag>);

impl TypeAnnotation {
    /// Tag recorded for `key`; keys that were never annotated read as text.
    #[must_use]
    pub fn tag(&self, key: &str) -> TypeTag {
        self.0.get(key).copied().unwrap_or(TypeTag::Text)
    }
}

/// Resolve the type annotation of one right-hand operand.
///
/// Non-mapping operands resolve to an empty annotation. Nested values are
/// not inspected; a list or map under a key is tagged as text.
#[must_use]
pub fn resolve(value: &Value) -> TypeAnnotation {
    let Some(entries) = value.as_map() else {
        return TypeAnnotation::default();
    };

    TypeAnnotation(
        entries
            .iter()
            .map(|(key, value)| (key.clone(), tag_for(value)))
            .collect(),
    )
}

fn tag_for(value: &Value) -> TypeTag {
    value
        .scalar_kind()
        .map_or(TypeTag::Text, ScalarKind::type_tag)
}
