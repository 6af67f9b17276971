#[macro_export]
macro_rules! scalar_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Null,
                Text,
                supports_ordering = false,
                label = "null"
            ),
            (
                Bool,
                Boolean,
                supports_ordering = true,
                label = "bool"
            ),
            (
                Int,
                Numeric,
                supports_ordering = true,
                label = "int"
            ),
            (
                Uint,
                Numeric,
                supports_ordering = true,
                label = "uint"
            ),
            (
                Float,
                Numeric,
                supports_ordering = true,
                label = "float"
            ),
            (
                Text,
                Text,
                supports_ordering = true,
                label = "text"
            ),
        }
    };
}

macro_rules! scalar_kind_registry {
    ($macro:ident) => {
        $crate::scalar_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::scalar_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($scalar:ident, $tag:ident, supports_ordering = $supports_ordering:expr, label = $label:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ScalarKind::$scalar => $crate::ScalarMetadata {
                    tag: $crate::TypeTag::$tag,
                    supports_ordering: $supports_ordering,
                    label: $label,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($scalar:ident, $tag:ident, supports_ordering = $supports_ordering:expr, label = $label:expr) ),* $(,)? ) => {
        [ $( $crate::ScalarKind::$scalar ),* ]
    };
}
