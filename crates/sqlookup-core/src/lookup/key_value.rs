//! Module: lookup::key_value
//! Responsibility: hstore-idiom SQL for flat map columns.
//! Does not own: generic column behavior (see `fallback`).
//! Boundary: reached only through `LOOKUP_TABLE` rules for `Backend::KeyValue`.

use crate::{
    document,
    error::LookupError,
    fragment::{CompiledFragment, FragmentBuilder, Param},
    lookup::{
        LookupContext, LookupOp, Operand,
        fallback::{self, TextCase},
    },
    value::Value,
};

// Containment lookups arrive with a `::text` marker; hstore operators need
// the column typed as hstore instead.
const TEXT_CAST: &str = "text";
const HSTORE_CAST: &str = "hstore";

/// `(lhs->'k')<cast> <op> ?` per key, ANDed in mapping order.
pub(super) fn compile_ordering(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let sign = cx
        .op()
        .comparison_sql()
        .ok_or_else(|| cx.invalid("not a comparison lookup"))?;
    let entries = cx
        .value()
        .and_then(Value::as_map)
        .ok_or_else(|| cx.invalid("expected a mapping of key to scalar value"))?;
    if entries.is_empty() {
        return Err(cx.invalid("mapping must name at least one key"));
    }

    let lhs_cast = cx.lhs().cast.as_deref();
    let mut sql = cx.builder();
    for (index, (key, value)) in entries.iter().enumerate() {
        let param = ordering_param(value).ok_or_else(|| {
            cx.invalid(format!(
                "value for key '{key}' must be a non-null scalar, found {}",
                value.kind_label()
            ))
        })?;

        if index > 0 {
            sql.push_sql(" AND ");
        }
        push_extract(&mut sql, cx, lhs_cast, key, &cx.cast_for(key));
        sql.push_sql(" ").push_sql(sign).push_sql(" ").push_param(param);
    }

    Ok(sql.finish())
}

fn ordering_param(value: &Value) -> Option<Param> {
    value.scalar_kind().filter(|kind| kind.supports_ordering())?;

    Param::from_scalar(value)
}

/// Containment, chosen by operand shape.
///
/// `icontains` shares every hstore branch; only the text fallback folds case.
pub(super) fn compile_contains(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let case = if cx.op() == LookupOp::IContains {
        TextCase::Insensitive
    } else {
        TextCase::Sensitive
    };
    let lhs_cast = containment_cast(cx.lhs().cast.as_deref());

    let Operand::Value(value) = cx.rhs() else {
        return Err(cx.invalid("expected a mapping, a sequence of keys, or text"));
    };

    match value {
        Value::Map(entries) => contains_entries(cx, lhs_cast, entries),
        Value::List(keys) => contains_keys(cx, lhs_cast, keys),
        Value::Text(needle) => Ok(fallback::text_contains(cx, needle, case)),
        other if cx.lhs().serialized => {
            let needle = document::encode(other)
                .map_err(|err| cx.invalid(format!("value cannot be serialized: {err}")))?;

            Ok(fallback::text_contains(cx, &needle, case))
        }
        other => Err(cx.invalid(format!(
            "expected a mapping, a sequence of keys, or text, found {}",
            other.kind_label()
        ))),
    }
}

fn contains_entries(
    cx: &LookupContext<'_>,
    lhs_cast: Option<&str>,
    entries: &[(String, Value)],
) -> Result<CompiledFragment, LookupError> {
    let mut sql = cx.builder();

    match entries {
        // Elements may mix types, so compare as text instead of casting.
        [(key, Value::List(values))] => {
            let elements = values
                .iter()
                .map(|value| scalar_text(cx, key, value))
                .collect::<Result<Vec<_>, _>>()?;

            cx.lhs().render_with_cast(&mut sql, lhs_cast);
            sql.push_sql("->")
                .push_quoted(key)
                .push_sql(" = ANY(")
                .push_param(Param::TextArray(elements))
                .push_sql(")");
        }

        // Extract and cast the one key rather than `@>`, so typed values
        // compare with their annotated type.
        [(key, value)] => {
            let param = Param::from_scalar(value).ok_or_else(|| {
                cx.invalid(format!(
                    "value for key '{key}' must be a scalar or a sequence, found {}",
                    value.kind_label()
                ))
            })?;

            push_extract(&mut sql, cx, lhs_cast, key, &cx.cast_for(key));
            sql.push_sql(" = ").push_param(param);
        }

        _ => {
            let pairs = hstore_pairs(cx, entries)?;

            cx.lhs().render_with_cast(&mut sql, lhs_cast);
            sql.push_sql(" @> ").push_param(Param::Hstore(pairs));
        }
    }

    Ok(sql.finish())
}

fn contains_keys(
    cx: &LookupContext<'_>,
    lhs_cast: Option<&str>,
    keys: &[Value],
) -> Result<CompiledFragment, LookupError> {
    if keys.is_empty() {
        return Err(cx.invalid("sequence of keys must not be empty"));
    }

    let mut keys = keys
        .iter()
        .map(|key| {
            key.to_text().ok_or_else(|| {
                cx.invalid(format!(
                    "keys must be non-null scalars, found {}",
                    key.kind_label()
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut sql = cx.builder();
    cx.lhs().render_with_cast(&mut sql, lhs_cast);
    if keys.len() == 1 {
        sql.push_sql(" ? ").push_param(Param::Text(keys.remove(0)));
    } else {
        sql.push_sql(" ?& ")
            .push_param(Param::TextArray(keys.into_iter().map(Some).collect()));
    }

    Ok(sql.finish())
}

fn containment_cast(cast: Option<&str>) -> Option<&str> {
    match cast {
        Some(TEXT_CAST) => Some(HSTORE_CAST),
        other => other,
    }
}

/// Per-key null checks; any operand other than a key → bool mapping uses
/// the whole-column check.
pub(super) fn compile_is_null(cx: &LookupContext<'_>) -> Result<CompiledFragment, LookupError> {
    let flags = cx.value().and_then(Value::as_map).and_then(|entries| {
        entries
            .iter()
            .map(|(key, value)| match value {
                Value::Bool(is_null) => Some((key.as_str(), *is_null)),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
    });
    let Some(flags) = flags else {
        return fallback::compile_null_check(cx);
    };
    if flags.is_empty() {
        return Err(cx.invalid("mapping must name at least one key"));
    }

    let lhs_cast = cx.lhs().cast.as_deref();
    let mut sql = cx.builder();
    for (index, (key, is_null)) in flags.into_iter().enumerate() {
        if index > 0 {
            sql.push_sql(" AND ");
        }
        push_extract(&mut sql, cx, lhs_cast, key, "");
        sql.push_sql(if is_null { " IS NULL" } else { " IS NOT NULL" });
    }

    Ok(sql.finish())
}

/// `(lhs->'key')<value_cast>`; the key is written as an escaped literal.
fn push_extract(
    out: &mut FragmentBuilder,
    cx: &LookupContext<'_>,
    lhs_cast: Option<&str>,
    key: &str,
    value_cast: &str,
) {
    out.push_sql("(");
    cx.lhs().render_with_cast(out, lhs_cast);
    out.push_sql("->").push_quoted(key).push_sql(")").push_sql(value_cast);
}

/// Stringify a whole mapping for an hstore parameter.
pub(super) fn hstore_pairs(
    cx: &LookupContext<'_>,
    entries: &[(String, Value)],
) -> Result<Vec<(String, Option<String>)>, LookupError> {
    entries
        .iter()
        .map(|(key, value)| Ok((key.clone(), scalar_text(cx, key, value)?)))
        .collect()
}

// hstore values are text or NULL; nested values have no representation.
fn scalar_text(
    cx: &LookupContext<'_>,
    key: &str,
    value: &Value,
) -> Result<Option<String>, LookupError> {
    if value.is_null() {
        return Ok(None);
    }

    value.to_text().map(Some).ok_or_else(|| {
        cx.invalid(format!(
            "value for key '{key}' cannot be stored in a key/value column: {}",
            value.kind_label()
        ))
    })
}
