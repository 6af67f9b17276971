use crate::value::{MapValueError, Value};
use sqlookup_primitives::ScalarKind;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn map_keeps_insertion_order() {
    let value = Value::map([("b", Value::Int(1)), ("a", Value::Int(2))]).expect("unique keys");
    let keys: Vec<_> = value
        .as_map()
        .expect("map")
        .iter()
        .map(|(key, _)| key.as_str())
        .collect();

    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn map_rejects_duplicate_keys() {
    let err = Value::map([("a", Value::Int(1)), ("b", Value::Int(2)), ("a", Value::Int(3))])
        .expect_err("duplicate key must be rejected");

    assert_eq!(
        err,
        MapValueError::DuplicateKey {
            key: "a".to_string(),
            left_index: 0,
            right_index: 2,
        }
    );
}

#[test]
fn scalar_kind_covers_scalars_only() {
    assert_eq!(Value::Null.scalar_kind(), Some(ScalarKind::Null));
    assert_eq!(Value::Float(1.5).scalar_kind(), Some(ScalarKind::Float));
    assert_eq!(v_txt("x").scalar_kind(), Some(ScalarKind::Text));
    assert_eq!(Value::list([1, 2]).scalar_kind(), None);
    assert!(!Value::Map(Vec::new()).is_scalar());
}

#[test]
fn to_text_renders_scalars() {
    assert_eq!(Value::Int(-3).to_text().as_deref(), Some("-3"));
    assert_eq!(Value::Uint(7).to_text().as_deref(), Some("7"));
    assert_eq!(Value::Float(2.5).to_text().as_deref(), Some("2.5"));
    assert_eq!(Value::Float(1.0).to_text().as_deref(), Some("1.0"));
    assert_eq!(Value::Float(-0.5).to_text().as_deref(), Some("-0.5"));
    assert_eq!(Value::Float(f64::INFINITY).to_text().as_deref(), Some("inf"));
    assert_eq!(Value::Bool(true).to_text().as_deref(), Some("true"));
    assert_eq!(v_txt("abc").to_text().as_deref(), Some("abc"));
    assert_eq!(Value::Null.to_text(), None);
    assert_eq!(Value::list(["a"]).to_text(), None);
}

#[test]
fn serializes_maps_in_entry_order() {
    let value = Value::map([
        ("z", Value::Int(1)),
        ("a", Value::list([v_txt("x"), Value::Null])),
    ])
    .expect("unique keys");

    let json = serde_json::to_string(&value).expect("finite value serializes");

    assert_eq!(json, r#"{"z":1,"a":["x",null]}"#);
}

#[test]
fn option_converts_to_null() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("k")), v_txt("k"));
}
