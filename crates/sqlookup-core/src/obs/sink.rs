//! Metrics sink boundary.
//!
//! Compiler logic MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{
    error::ErrorClass,
    lookup::{Backend, LookupOp},
    obs::metrics,
};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Compiled {
        backend: Backend,
        lookup: LookupOp,
        params: u64,
    },
    Rejected {
        backend: Backend,
        lookup: LookupOp,
        class: ErrorClass,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the global counters.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Compiled {
                backend,
                lookup,
                params,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.compiled = m.ops.compiled.saturating_add(1);
                    m.ops.params_bound = m.ops.params_bound.saturating_add(params);
                    count_backend(&mut m.ops, backend);

                    let entry = m.lookups.entry(lookup_key(backend, lookup)).or_default();
                    entry.compiled = entry.compiled.saturating_add(1);
                });
            }

            MetricsEvent::Rejected {
                backend,
                lookup,
                class,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rejected = m.ops.rejected.saturating_add(1);
                    count_backend(&mut m.ops, backend);

                    let slot = match class {
                        ErrorClass::InvalidOperand => &mut m.ops.invalid_operand,
                        ErrorClass::TypeMismatch => &mut m.ops.type_mismatch,
                        ErrorClass::Encoding => &mut m.ops.encoding,
                        ErrorClass::Unsupported => &mut m.ops.unsupported,
                    };
                    *slot = slot.saturating_add(1);

                    let entry = m.lookups.entry(lookup_key(backend, lookup)).or_default();
                    entry.rejected = entry.rejected.saturating_add(1);
                });
            }
        }
    }
}

fn count_backend(ops: &mut metrics::EventOps, backend: Backend) {
    match backend {
        Backend::KeyValue => ops.key_value_calls = ops.key_value_calls.saturating_add(1),
        Backend::Document => ops.document_calls = ops.document_calls.saturating_add(1),
    }
}

fn lookup_key(backend: Backend, lookup: LookupOp) -> String {
    format!("{backend}.{lookup}")
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a live `&dyn MetricsSink` in `with_metrics_sink`,
        //   which restores the previous slot on every exit, unwinding included.
        // - `record` is synchronous and never keeps `ptr` past this call.
        // - Only a shared reference is materialized, matching the borrow passed in.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's compile counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's compile counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - The pointer is installed only for the dynamic scope of `f`.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` dereferences synchronously and never persists the pointer.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
