// src/sequential/threads.rs

//! Thread lifecycle for builds without threads.
//!
//! `Thread::create` does **not** run the entry point: the work is dropped and
//! the handle reports [`ExitStatus::NotStarted`] on join. Callers that need
//! the side effects must call [`run_inline`] (or the entry point itself).

use std::any::Any;
use std::marker::PhantomData;
use std::thread::{self, ThreadId};

use crate::utils::error::Result;
use crate::utils::lifecycle::{self, ExitStatus, ThreadAttributes};
use crate::utils::log::trace_event;

/// Handle for a thread that was never started.
#[derive(Debug)]
pub struct Thread<T> {
    id: ThreadId,
    name: Option<String>,
    _result: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> Thread<T> {
    /// Drops `entry` and `arg` without running them.
    pub fn create<F, A>(entry: F, arg: A) -> Result<Self>
    where
        F: FnOnce(A) -> T + Send + 'static,
        A: Send + 'static,
    {
        Self::create_with(ThreadAttributes::default(), entry, arg)
    }

    pub fn create_with<F, A>(attributes: ThreadAttributes, entry: F, arg: A) -> Result<Self>
    where
        F: FnOnce(A) -> T + Send + 'static,
        A: Send + 'static,
    {
        drop((entry, arg));
        trace_event!(
            "threads disabled, entry point for {:?} not started",
            attributes.name
        );
        Ok(Thread {
            id: thread::current().id(),
            name: attributes.name,
            _result: PhantomData,
        })
    }

    /// Always `NotStarted`.
    pub fn join(self) -> Result<ExitStatus<T>> {
        Ok(ExitStatus::NotStarted)
    }

    pub fn kill(&self) {}

    /// The single logical thread of control, i.e. the creator.
    pub fn id(&self) -> ThreadId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        true
    }
}

/// Terminates the current entry point by unwinding to [`run_inline`].
///
/// Unlike a no-op exit, this never falls through to the code after the call,
/// so an entry point behaves the same here as on a native thread. It must
/// only be reached under `run_inline`: an entry point invoked by plain
/// function call has no trampoline above it, and the unwind propagates into
/// the caller like a panic (ending the program if nothing catches it).
pub fn exit<S: Any + Send>(status: S) -> ! {
    lifecycle::unwind_exit(status)
}

pub fn is_cancelled() -> bool {
    false
}

pub fn test_cancel() {}

/// Runs `entry(arg)` synchronously, handling `exit` like a created thread.
pub fn run_inline<F, A, T>(entry: F, arg: A) -> Result<ExitStatus<T>>
where
    F: FnOnce(A) -> T,
    T: 'static,
{
    lifecycle::run_entry(entry, arg)
}

pub fn current_id() -> ThreadId {
    thread::current().id()
}
