
use crate::fragment::Placeholder;
use serde::{Deserialize, Serialize};
use sqlookup_primitives::TypeTag;

///
/// CompileOptions
///
/// Host-supplied compiler settings. Every field has a default, so a partial
/// configuration table deserializes cleanly.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    pub placeholder: Placeholder,

    /// Cast type applied to keys annotated as numeric.
    pub numeric_cast: String,

    /// Cast type applied to keys annotated as boolean.
    pub boolean_cast: String,
}

impl CompileOptions {
    /// Cast suffix (`::type`) for one annotated key; empty for text.
    #[must_use]
    pub fn cast_suffix(&self, tag: TypeTag) -> String {
        match tag {
            TypeTag::Numeric => format!("::{}", self.numeric_cast),
            TypeTag::Boolean => format!("::{}", self.boolean_cast),
            TypeTag::Text => String::new(),
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            placeholder: Placeholder::default(),
            numeric_cast: "numeric".to_string(),
            boolean_cast: "boolean".to_string(),
        }
    }
}
