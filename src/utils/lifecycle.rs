// src/utils/lifecycle.rs

//! Thread lifecycle pieces shared by both backends.
//!
//! `exit` and cancellation are implemented by unwinding the calling thread
//! with a private payload. The entry trampoline ([`run_entry`]) catches those
//! payloads and turns them into an [`ExitStatus`], so destructors on the
//! abandoned part of the stack still run.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::utils::error::{Error, Result};

/// How a thread's entry point finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus<T> {
    /// The entry point returned this value.
    Returned(T),
    /// The thread called `exit` with this status.
    Exited(T),
    /// The thread reached a cancellation point after `kill` was requested.
    Cancelled,
    /// The entry point never ran (sequential backend).
    NotStarted,
}

impl<T> ExitStatus<T> {
    /// The value produced by a return or an explicit `exit`, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            ExitStatus::Returned(value) | ExitStatus::Exited(value) => Some(value),
            ExitStatus::Cancelled | ExitStatus::NotStarted => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ExitStatus::Returned(value) | ExitStatus::Exited(value) => Some(value),
            ExitStatus::Cancelled | ExitStatus::NotStarted => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExitStatus::Cancelled)
    }
}

/// Creation attributes for a thread.
///
/// The sequential backend accepts and ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadAttributes {
    pub name: Option<String>,
    pub stack_size: Option<usize>,
}

impl ThreadAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }
}

/// Unwind payload carrying the status passed to `exit`.
struct ExitRequest(Box<dyn Any + Send>);

/// Unwind payload raised at a cancellation point.
#[cfg(feature = "threads")]
struct CancelRequest;

/// Terminates the calling thread of control with `status`.
///
/// `resume_unwind` skips the panic hook, so no panic message is printed.
pub(crate) fn unwind_exit<S: Any + Send>(status: S) -> ! {
    panic::resume_unwind(Box::new(ExitRequest(Box::new(status))))
}

#[cfg(feature = "threads")]
pub(crate) fn unwind_cancel() -> ! {
    panic::resume_unwind(Box::new(CancelRequest))
}

/// Runs `entry(arg)` and classifies how it terminated.
pub(crate) fn run_entry<F, A, T>(entry: F, arg: A) -> Result<ExitStatus<T>>
where
    F: FnOnce(A) -> T,
    T: 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(move || entry(arg))) {
        Ok(value) => Ok(ExitStatus::Returned(value)),
        Err(payload) => classify(payload),
    }
}

fn classify<T: 'static>(payload: Box<dyn Any + Send>) -> Result<ExitStatus<T>> {
    let payload = match payload.downcast::<ExitRequest>() {
        Ok(request) => {
            let ExitRequest(status) = *request;
            return status
                .downcast::<T>()
                .map(|status| ExitStatus::Exited(*status))
                .map_err(|_| Error::ExitStatusType);
        }
        Err(other) => other,
    };
    if is_cancel_request(&*payload) {
        return Ok(ExitStatus::Cancelled);
    }
    Err(Error::from_panic(payload))
}

#[cfg(feature = "threads")]
fn is_cancel_request(payload: &(dyn Any + Send)) -> bool {
    payload.is::<CancelRequest>()
}

// Nothing raises cancellation without threads.
#[cfg(not(feature = "threads"))]
fn is_cancel_request(_payload: &(dyn Any + Send)) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct SetOnDrop<'a>(&'a Cell<bool>);

    impl Drop for SetOnDrop<'_> {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    #[test]
    fn test_returned_value() {
        let status = run_entry(|x: i32| x * 2, 21).unwrap();
        assert_eq!(status, ExitStatus::Returned(42));
    }

    #[test]
    fn test_exit_skips_rest_and_runs_destructors() {
        let dropped = Cell::new(false);
        let reached_end = Cell::new(false);
        let status = run_entry(
            |_: ()| -> u32 {
                let _guard = SetOnDrop(&dropped);
                if !reached_end.get() {
                    unwind_exit(7_u32);
                }
                reached_end.set(true);
                0
            },
            (),
        )
        .unwrap();
        assert_eq!(status, ExitStatus::Exited(7));
        assert!(dropped.get());
        assert!(!reached_end.get());
    }

    #[test]
    fn test_exit_with_wrong_type() {
        let result = run_entry(|_: ()| -> u32 { unwind_exit("not a u32") }, ());
        assert!(matches!(result, Err(Error::ExitStatusType)));
    }

    #[cfg(feature = "threads")]
    #[test]
    fn test_cancel_payload() {
        let status = run_entry(|_: ()| -> u32 { unwind_cancel() }, ()).unwrap();
        assert!(status.is_cancelled());
        assert_eq!(status.into_value(), None);
    }

    #[test]
    fn test_foreign_panic_is_reported() {
        let result = run_entry(|_: ()| -> u32 { panic!("entry failed") }, ());
        match result {
            Err(Error::Panicked(msg)) => assert_eq!(msg, "entry failed"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_attributes_builder() {
        let attrs = ThreadAttributes::new().name("worker-1").stack_size(64 * 1024);
        assert_eq!(attrs.name.as_deref(), Some("worker-1"));
        assert_eq!(attrs.stack_size, Some(64 * 1024));
        assert_eq!(ThreadAttributes::default(), ThreadAttributes::new());
    }
}
