//! Optional `tracing` events; compiled out unless the `tracing` feature is on.

#[cfg(feature = "tracing")]
macro_rules! trace_op {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_op {
    ($($arg:tt)*) => {};
}

pub(crate) use trace_op;
