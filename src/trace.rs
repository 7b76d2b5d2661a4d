//! Conditional tracing shims.
//!
//! With the `tracing` feature enabled these macros forward to `tracing`
//! spans and events; without it they compile away so the hot path carries no
//! instrumentation cost.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::DisabledSpan
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        // Evaluate the values so call sites do not trip unused warnings.
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Span stand-in used when tracing is disabled, so call sites can keep the
/// `let _guard = trace_span!(...).entered();` shape unconditionally.
#[cfg(not(feature = "tracing"))]
pub struct DisabledSpan;

#[cfg(not(feature = "tracing"))]
impl DisabledSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
