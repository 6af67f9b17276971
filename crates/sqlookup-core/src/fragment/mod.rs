//! Module: fragment
//! Responsibility: SQL text + bind parameter accumulation.
//! Does not own: lookup selection or operand validation.
//! Boundary: every placeholder is written together with its parameter, so a
//! finished fragment always has as many placeholders as parameters, in order.

#[cfg(test)]
mod tests;

use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// Placeholder
///
/// Positional placeholder syntax expected by the executor's driver.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `?`
    #[default]
    Question,
    /// `%s`
    Format,
}

impl Placeholder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "?",
            Self::Format => "%s",
        }
    }
}

///
/// Param
///
/// One bind parameter. Text arrays and hstore maps keep `None` for SQL NULL
/// members.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Param {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    TextArray(Vec<Option<String>>),
    Hstore(Vec<(String, Option<String>)>),
}

impl Param {
    /// Bind a scalar value with its own type; `None` for lists and maps.
    #[must_use]
    pub fn from_scalar(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(v) => Some(Self::Bool(*v)),
            Value::Int(v) => Some(Self::Int(*v)),
            Value::Uint(v) => Some(Self::Uint(*v)),
            Value::Float(v) => Some(Self::Float(*v)),
            Value::Text(v) => Some(Self::Text(v.clone())),
            Value::List(_) | Value::Map(_) => None,
        }
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

///
/// SqlExpr
///
/// Pre-rendered SQL expression with its own parameters, written with the
/// same placeholder syntax the compiler is configured for.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SqlExpr {
    pub sql: String,
    pub params: Vec<Param>,
}

impl SqlExpr {
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Expression without parameters, such as a quoted column name.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }
}

///
/// CompiledFragment
///
/// SQL text with positional placeholders plus its ordered parameters.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFragment {
    sql: String,
    params: Vec<Param>,
    placeholders: usize,
}

impl CompiledFragment {
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Number of placeholders written into `sql`.
    ///
    /// Tracked at write time; `?` also appears as an hstore operator, so
    /// the text alone is not a reliable count.
    #[must_use]
    pub const fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.params)
    }
}

///
/// FragmentBuilder
///

#[derive(Debug)]
pub(crate) struct FragmentBuilder {
    placeholder: Placeholder,
    sql: String,
    params: Vec<Param>,
    placeholders: usize,
}

impl FragmentBuilder {
    pub(crate) const fn new(placeholder: Placeholder) -> Self {
        Self {
            placeholder,
            sql: String::new(),
            params: Vec::new(),
            placeholders: 0,
        }
    }

    /// Append literal SQL text. Under `%s` placeholders a literal `%` is
    /// written as `%%`.
    pub(crate) fn push_sql(&mut self, sql: &str) -> &mut Self {
        for ch in sql.chars() {
            self.push_literal_char(ch);
        }
        self
    }

    /// Write one placeholder and bind `param` to it.
    pub(crate) fn push_param(&mut self, param: Param) -> &mut Self {
        self.sql.push_str(self.placeholder.as_str());
        self.params.push(param);
        self.placeholders += 1;
        self
    }

    /// Write comma-separated placeholders, one per parameter.
    pub(crate) fn push_param_list(&mut self, params: impl IntoIterator<Item = Param>) -> &mut Self {
        for (index, param) in params.into_iter().enumerate() {
            if index > 0 {
                self.push_sql(", ");
            }
            self.push_param(param);
        }
        self
    }

    /// Splice a pre-rendered expression; its parameters follow any already
    /// bound ones, matching the textual position of its placeholders.
    ///
    /// The expression is written verbatim: it already uses the configured
    /// placeholder syntax and escaping.
    pub(crate) fn push_expr(&mut self, expr: &SqlExpr) -> &mut Self {
        self.sql.push_str(&expr.sql);
        self.params.extend(expr.params.iter().cloned());
        self.placeholders += expr.params.len();
        self
    }

    /// Append a single-quoted SQL string literal, doubling embedded quotes.
    pub(crate) fn push_quoted(&mut self, literal: &str) -> &mut Self {
        self.sql.push('\'');
        for ch in literal.chars() {
            if ch == '\'' {
                self.sql.push('\'');
            }
            self.push_literal_char(ch);
        }
        self.sql.push('\'');
        self
    }

    fn push_literal_char(&mut self, ch: char) {
        if ch == '%' && self.placeholder == Placeholder::Format {
            self.sql.push('%');
        }
        self.sql.push(ch);
    }

    pub(crate) fn finish(self) -> CompiledFragment {
        debug_assert_eq!(self.placeholders, self.params.len());

        CompiledFragment {
            sql: self.sql,
            params: self.params,
            placeholders: self.placeholders,
        }
    }
}
