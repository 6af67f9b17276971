use crate::{ALL_SCALAR_KINDS, ScalarKind, TypeTag};

#[test]
fn registry_lists_every_kind_once() {
    let mut seen = Vec::new();
    for kind in ALL_SCALAR_KINDS {
        assert!(!seen.contains(&kind), "duplicate registry entry {kind:?}");
        seen.push(kind);
    }

    assert_eq!(seen.len(), 6);
}

#[test]
fn numeric_kinds_share_numeric_tag() {
    for kind in [ScalarKind::Int, ScalarKind::Uint, ScalarKind::Float] {
        assert_eq!(kind.type_tag(), TypeTag::Numeric, "{}", kind.label());
    }

    assert_eq!(ScalarKind::Bool.type_tag(), TypeTag::Boolean);
    assert_eq!(ScalarKind::Text.type_tag(), TypeTag::Text);
    assert_eq!(ScalarKind::Null.type_tag(), TypeTag::Text);
}

#[test]
fn null_is_the_only_unordered_kind() {
    let unordered: Vec<_> = ALL_SCALAR_KINDS
        .into_iter()
        .filter(|kind| !kind.supports_ordering())
        .collect();

    assert_eq!(unordered, vec![ScalarKind::Null]);
}
