// src/utils/log.rs

//! Opt-in lifecycle tracing.
//!
//! The primitives in this crate stay silent unless the `debug-logging`
//! feature is enabled, in which case events go through the `log` facade
//! under the `thread_utils` target. No logger is installed here.

macro_rules! trace_event {
    ($($arg:tt)+) => {
        if cfg!(feature = "debug-logging") {
            ::log::debug!(target: "thread_utils", $($arg)+);
        }
    };
}

pub(crate) use trace_event;
