mod property;

use crate::{
    error::LookupError,
    fragment::CompiledFragment,
    lookup::{Backend, ColumnRef, LookupCompiler, LookupOp, Operand, Predicate},
    value::Value,
};

// ---- helpers -----------------------------------------------------------

fn lhs() -> ColumnRef {
    ColumnRef::new("lhs")
}

fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::map(entries).expect("test maps use unique keys")
}

fn compile(
    backend: Backend,
    column: ColumnRef,
    op: LookupOp,
    rhs: impl Into<Operand>,
) -> Result<CompiledFragment, LookupError> {
    LookupCompiler::new(backend).compile(&Predicate::new(column, op, rhs))
}

fn kv(op: LookupOp, rhs: impl Into<Operand>) -> Result<CompiledFragment, LookupError> {
    compile(Backend::KeyValue, lhs(), op, rhs)
}

fn doc(op: LookupOp, rhs: impl Into<Operand>) -> Result<CompiledFragment, LookupError> {
    compile(Backend::Document, lhs(), op, rhs)
}

fn assert_invalid(result: Result<CompiledFragment, LookupError>, expected_op: LookupOp) {
    match result {
        Err(LookupError::InvalidOperandShape { lookup, .. }) => assert_eq!(lookup, expected_op),
        other => panic!("expected InvalidOperandShape for {expected_op}, got {other:?}"),
    }
}

fn assert_type_mismatch(result: Result<CompiledFragment, LookupError>, expected_op: LookupOp) {
    match result {
        Err(LookupError::TypeMismatch { lookup, .. }) => assert_eq!(lookup, expected_op),
        other => panic!("expected TypeMismatch for {expected_op}, got {other:?}"),
    }
}
