use crate::{
    document::{DocumentEncodeError, encode, key_path},
    value::Value,
};

#[test]
fn encode_renders_nested_values() {
    let value = Value::map([
        ("a", Value::list([Value::Int(1), Value::Float(2.5)])),
        ("b", Value::map([("c", Value::Bool(true))]).expect("unique keys")),
        ("d", Value::Null),
    ])
    .expect("unique keys");

    assert_eq!(
        encode(&value).expect("finite"),
        r#"{"a":[1,2.5],"b":{"c":true},"d":null}"#
    );
}

#[test]
fn encode_rejects_non_finite_floats_at_any_depth() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let top = encode(&Value::Float(bad));
        assert!(matches!(top, Err(DocumentEncodeError::NonFinite { .. })));

        let nested = Value::map([("k", Value::list([Value::Int(1), Value::Float(bad)]))])
            .expect("unique keys");
        assert!(matches!(
            encode(&nested),
            Err(DocumentEncodeError::NonFinite { .. })
        ));
    }
}

#[test]
fn key_path_quotes_the_member_name() {
    assert_eq!(key_path("x").expect("path"), r#"$."x""#);
    assert_eq!(key_path("a.b").expect("path"), r#"$."a.b""#);
    assert_eq!(key_path(r#"q"t"#).expect("path"), r#"$."q\"t""#);
}
