//! Module: lookup::document
//! Responsibility: JSON-idiom SQL for nested document columns.
//! Does not own: JSON text encoding (see `crate::document`).
//! Boundary: reached only through `LOOKUP_TABLE` rules for `Backend::Document`.

use crate::{
    document::{encode, key_path},
    error::LookupError,
    fragment::{CompiledFragment, FragmentBuilder, Param},
    lookup::{LookupContext, LookupOp, Operand},
    value::Value,
};

/// Write the right operand as a document value.
///
/// Plain values are encoded and bound as `CAST(? AS JSON)` so both sides of
/// the comparison are documents. Prepared expressions and null pass through.
fn push_operand(out: &mut FragmentBuilder, cx: &LookupContext<'_>) -> Result<(), LookupError> {
    match cx.rhs() {
        Operand::Expr(expr) => {
            out.push_expr(expr);
        }
        Operand::Value(Value::Null) => {
            out.push_param(Param::Null);
        }
        Operand::Value(value) => {
            let json = encode(value)?;
            out.push_sql("CAST(")
                .push_param(Param::Text(json))
                .push_sql(" AS JSON)");
        }
    }

    Ok(())
}

/// `exact`, `gt`, `gte`, `lt`, `lte`.
pub(super) fn compile_comparison(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let op = cx.op();
    let sign = op
        .comparison_sql()
        .ok_or_else(|| cx.invalid("not a comparison lookup"))?;

    let mut sql = cx.builder();
    cx.lhs().render(&mut sql);

    if matches!(cx.value(), Some(Value::Null)) {
        if op.is_ordering() {
            return Err(cx.invalid("null has no ordering"));
        }
        sql.push_sql(" IS NULL");

        return Ok(sql.finish());
    }

    sql.push_sql(" ").push_sql(sign).push_sql(" ");
    push_operand(&mut sql, cx)?;

    Ok(sql.finish())
}

/// `JSON_CONTAINS(lhs, rhs)`
pub(super) fn compile_contains(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let mut sql = cx.builder();
    sql.push_sql("JSON_CONTAINS(");
    cx.lhs().render(&mut sql);
    sql.push_sql(", ");
    push_operand(&mut sql, cx)?;
    sql.push_sql(")");

    Ok(sql.finish())
}

/// `JSON_CONTAINS(rhs, lhs)`; operands and their parameters swap places.
pub(super) fn compile_contained_by(
    cx: &LookupContext<'_>,
) -> Result<CompiledFragment, LookupError> {
    let mut sql = cx.builder();
    sql.push_sql("JSON_CONTAINS(");
    push_operand(&mut sql, cx)?;
    sql.push_sql(", ");
    cx.lhs().render(&mut sql);
    sql.push_sql(")");

    Ok(sql.finish())
}

/// `JSON_CONTAINS_PATH(lhs, 'one', ?)` for a single text key.
pub(super) fn compile_has_key(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let Some(Value::Text(key)) = cx.value() else {
        return Err(LookupError::type_mismatch(cx.op(), "text"));
    };
    let path = key_path(key)?;

    let mut sql = cx.builder();
    sql.push_sql("JSON_CONTAINS_PATH(");
    cx.lhs().render(&mut sql);
    sql.push_sql(", 'one', ").push_param(Param::Text(path)).push_sql(")");

    Ok(sql.finish())
}

/// `has_keys` (`'all'`) and `has_any_keys` (`'one'`): one path per key, in
/// input order.
pub(super) fn compile_has_keys(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let op = cx.op();
    let mode = if op == LookupOp::HasKeys { "all" } else { "one" };

    let Some(Value::List(keys)) = cx.value() else {
        return Err(LookupError::type_mismatch(op, "sequence of text"));
    };
    if keys.is_empty() {
        return Err(cx.invalid("sequence of keys must not be empty"));
    }

    let paths = keys
        .iter()
        .map(|key| {
            let key = key
                .as_text()
                .ok_or_else(|| LookupError::type_mismatch(op, "sequence of text"))?;

            Ok(Param::Text(key_path(key)?))
        })
        .collect::<Result<Vec<_>, LookupError>>()?;

    let mut sql = cx.builder();
    sql.push_sql("JSON_CONTAINS_PATH(");
    cx.lhs().render(&mut sql);
    sql.push_sql(", '")
        .push_sql(mode)
        .push_sql("', ")
        .push_param_list(paths)
        .push_sql(")");

    Ok(sql.finish())
}
