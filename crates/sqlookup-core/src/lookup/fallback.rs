//! Module: lookup::fallback
//! Responsibility: generic whole-column SQL used when no backend-specific
//! branch applies.
//! Boundary: invoked via `FALLBACK_TABLE` or directly from a backend branch
//! that defers to it.

use crate::{
    error::LookupError,
    fragment::{CompiledFragment, Param},
    lookup::{LookupContext, Operand, key_value},
    value::Value,
};

const TEXT_CAST: &str = "text";

///
/// TextCase
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum TextCase {
    Sensitive,
    Insensitive,
}

/// Substring match over the column's text rendering.
///
/// `lhs::text LIKE ?` or `UPPER(lhs::text) LIKE UPPER(?)`, bound to
/// `%needle%` with LIKE metacharacters escaped.
pub(super) fn text_contains(
    cx: &LookupContext<'_>,
    needle: &str,
    case: TextCase,
) -> CompiledFragment {
    let pattern = Param::Text(format!("%{}%", escape_like(needle)));
    let mut sql = cx.builder();

    match case {
        TextCase::Sensitive => {
            cx.lhs().render_with_cast(&mut sql, Some(TEXT_CAST));
            sql.push_sql(" LIKE ").push_param(pattern);
        }
        TextCase::Insensitive => {
            sql.push_sql("UPPER(");
            cx.lhs().render_with_cast(&mut sql, Some(TEXT_CAST));
            sql.push_sql(") LIKE UPPER(").push_param(pattern).push_sql(")");
        }
    }

    sql.finish()
}

pub(super) fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }

    out
}

/// `lhs IS NULL` / `lhs IS NOT NULL` from a boolean operand.
pub(super) fn compile_null_check(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let Some(Value::Bool(is_null)) = cx.value() else {
        return Err(cx.invalid("expected a boolean or a mapping of key to boolean"));
    };

    let mut sql = cx.builder();
    cx.lhs().render(&mut sql);
    sql.push_sql(if *is_null { " IS NULL" } else { " IS NOT NULL" });

    Ok(sql.finish())
}

/// `lhs = ?`; a null operand becomes `lhs IS NULL`.
pub(super) fn compile_exact(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let mut sql = cx.builder();

    match cx.rhs() {
        Operand::Expr(expr) => {
            cx.lhs().render(&mut sql);
            sql.push_sql(" = ").push_expr(expr);
        }
        Operand::Value(Value::Null) => {
            cx.lhs().render(&mut sql);
            sql.push_sql(" IS NULL");
        }
        Operand::Value(Value::Map(entries)) => {
            let pairs = key_value::hstore_pairs(cx, entries)?;

            cx.lhs().render(&mut sql);
            sql.push_sql(" = ").push_param(Param::Hstore(pairs));
        }
        Operand::Value(value) => {
            let param = Param::from_scalar(value)
                .ok_or_else(|| cx.invalid("a sequence has no column equality"))?;

            cx.lhs().render(&mut sql);
            sql.push_sql(" = ").push_param(param);
        }
    }

    Ok(sql.finish())
}
