use crate::{
    fragment::{FragmentBuilder, Param, Placeholder, SqlExpr},
    value::Value,
};

#[test]
fn params_follow_placeholder_order() {
    let mut sql = FragmentBuilder::new(Placeholder::Question);
    sql.push_sql("a = ")
        .push_param(Param::Int(1))
        .push_sql(" AND b IN (")
        .push_param_list([Param::text("x"), Param::text("y")])
        .push_sql(")");
    let fragment = sql.finish();

    assert_eq!(fragment.sql(), "a = ? AND b IN (?, ?)");
    assert_eq!(
        fragment.params(),
        &[Param::Int(1), Param::text("x"), Param::text("y")]
    );
    assert_eq!(fragment.placeholder_count(), 3);
}

#[test]
fn expressions_splice_their_params() {
    let expr = SqlExpr::new("f(%s, %s)", vec![Param::Bool(true), Param::Null]);
    let mut sql = FragmentBuilder::new(Placeholder::Format);
    sql.push_param(Param::Uint(7)).push_sql(" < ").push_expr(&expr);

    let (text, params) = sql.finish().into_parts();
    assert_eq!(text, "%s < f(%s, %s)");
    assert_eq!(params, vec![Param::Uint(7), Param::Bool(true), Param::Null]);
}

#[test]
fn quoted_literals_double_embedded_quotes() {
    let mut sql = FragmentBuilder::new(Placeholder::Question);
    sql.push_quoted("it's").push_sql(" ").push_quoted("");

    let fragment = sql.finish();
    assert_eq!(fragment.sql(), "'it''s' ''");
    assert_eq!(fragment.placeholder_count(), 0);
}

#[test]
fn scalar_params_keep_their_type() {
    assert_eq!(Param::from_scalar(&Value::Int(-3)), Some(Param::Int(-3)));
    assert_eq!(Param::from_scalar(&Value::Null), Some(Param::Null));
    assert_eq!(Param::from_scalar(&Value::text("1")), Some(Param::text("1")));
    assert_eq!(Param::from_scalar(&Value::list([1])), None);
}

#[test]
fn placeholder_serde_names() {
    let format: Placeholder = serde_json::from_str(r#""format""#).expect("known placeholder");

    assert_eq!(format, Placeholder::Format);
    assert_eq!(format.as_str(), "%s");
    assert_eq!(Placeholder::default().as_str(), "?");
}

#[test]
fn format_placeholder_doubles_literal_percent() {
    let mut sql = FragmentBuilder::new(Placeholder::Format);
    sql.push_sql("(c->")
        .push_quoted("x%s")
        .push_sql(") LIKE ")
        .push_param(Param::text("%a%"));
    let fragment = sql.finish();

    assert_eq!(fragment.sql(), "(c->'x%%s') LIKE %s");
    assert_eq!(fragment.placeholder_count(), 1);

    let mut sql = FragmentBuilder::new(Placeholder::Question);
    sql.push_quoted("50%");
    assert_eq!(sql.finish().sql(), "'50%'");
}

#[test]
fn expressions_are_spliced_verbatim() {
    let expr = SqlExpr::new("f(%s, '%%')", vec![Param::Int(1)]);
    let mut sql = FragmentBuilder::new(Placeholder::Format);
    sql.push_expr(&expr);

    assert_eq!(sql.finish().sql(), "f(%s, '%%')");
}
