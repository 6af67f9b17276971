use crate::{
    fragment::{Param, Placeholder},
    lookup::{Backend, ColumnRef, LookupCompiler, LookupOp, Predicate},
    options::CompileOptions,
    value::Value,
};
use proptest::prelude::*;

fn arb_scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::Uint),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        "[a-zA-Z0-9_%' ]{0,8}".prop_map(Value::Text),
    ]
}

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z%s']{1,4}"
}

// Placeholders a `format`-style driver would see: `%%` is a literal percent.
fn format_placeholders(sql: &str) -> usize {
    sql.replace("%%", "").matches("%s").count()
}

fn arb_map_value(leaf: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
    prop::collection::btree_map(arb_key(), leaf, 0..4)
        .prop_map(|entries| Value::Map(entries.into_iter().collect()))
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        arb_scalar_value(),
        prop::collection::vec(arb_scalar_value(), 0..4).prop_map(Value::List),
    ];

    prop_oneof![
        arb_scalar_value(),
        prop::collection::vec(arb_scalar_value(), 0..4).prop_map(Value::List),
        arb_map_value(leaf),
    ]
}

fn arb_backend() -> impl Strategy<Value = Backend> {
    prop_oneof![Just(Backend::KeyValue), Just(Backend::Document)]
}

fn arb_op() -> impl Strategy<Value = LookupOp> {
    prop::sample::select(LookupOp::ALL.to_vec())
}

fn arb_placeholder() -> impl Strategy<Value = Placeholder> {
    prop_oneof![Just(Placeholder::Question), Just(Placeholder::Format)]
}

fn column() -> ColumnRef {
    ColumnRef::new("\"t\".\"data\"")
}

proptest! {
    #[test]
    fn placeholders_match_params(
        backend in arb_backend(),
        op in arb_op(),
        value in arb_value(),
        placeholder in arb_placeholder(),
    ) {
        let options = CompileOptions { placeholder, ..CompileOptions::default() };
        let compiler = LookupCompiler::with_options(backend, options);

        if let Ok(fragment) = compiler.compile(&Predicate::new(column(), op, value)) {
            prop_assert_eq!(fragment.placeholder_count(), fragment.params().len());

            if placeholder == Placeholder::Format {
                let unescaped = fragment.sql().replace("%%", "");

                prop_assert_eq!(format_placeholders(fragment.sql()), fragment.params().len());
                prop_assert_eq!(unescaped.matches('%').count(), fragment.params().len());
            }
        }
    }

    #[test]
    fn compile_is_repeatable(backend in arb_backend(), op in arb_op(), value in arb_value()) {
        let compiler = LookupCompiler::new(backend);
        let predicate = Predicate::new(column(), op, value);

        let first = compiler.compile(&predicate).map_err(|err| err.to_string());
        let second = compiler.compile(&predicate).map_err(|err| err.to_string());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ordering_binds_values_in_mapping_order(
        entries in prop::collection::btree_map(
            arb_key(),
            prop_oneof![
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(Value::Int),
                "[a-z]{0,6}".prop_map(Value::Text),
            ],
            1..5,
        ),
    ) {
        let entries: Vec<(String, Value)> = entries.into_iter().collect();
        let expected: Vec<Param> = entries
            .iter()
            .filter_map(|(_, value)| Param::from_scalar(value))
            .collect();

        let fragment = LookupCompiler::new(Backend::KeyValue)
            .compile(&Predicate::new(column(), LookupOp::Gte, Value::Map(entries.clone())))
            .expect("orderable scalars compile");

        prop_assert_eq!(fragment.params(), expected.as_slice());
        prop_assert_eq!(fragment.sql().matches(" AND ").count(), entries.len() - 1);
    }
}
