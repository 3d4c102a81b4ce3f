// src/native/threads.rs

//! OS thread lifecycle: create, join, cancel and self-exit.
//!
//! Threads are spawned through `std::thread::Builder`, so they are pthreads on
//! Unix and Win32 threads on Windows. Each thread runs its entry point inside
//! a trampoline that turns `exit` and cancellation into an [`ExitStatus`].
//!
//! Cancellation is cooperative. [`Thread::kill`] only raises a flag; the
//! target terminates at its next call to [`test_cancel`], unwinding its stack
//! so guards and other destructors run. There is no asynchronous kill.

use std::any::Any;
use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle, ThreadId};

use crate::utils::error::{Error, Result};
use crate::utils::lifecycle::{self, ExitStatus, ThreadAttributes};
use crate::utils::log::trace_event;

thread_local! {
    static CANCEL_FLAG: RefCell<Option<Arc<AtomicBool>>> = const { RefCell::new(None) };
}

/// A handle to a running (or finished) thread whose entry point yields `T`.
///
/// The handle is consumed by [`Thread::join`], so a thread can be joined at
/// most once. Dropping the handle without joining detaches the thread.
#[derive(Debug)]
pub struct Thread<T> {
    handle: JoinHandle<Result<ExitStatus<T>>>,
    cancel: Arc<AtomicBool>,
}

impl<T: Send + 'static> Thread<T> {
    /// Starts a new thread running `entry(arg)`.
    pub fn create<F, A>(entry: F, arg: A) -> Result<Self>
    where
        F: FnOnce(A) -> T + Send + 'static,
        A: Send + 'static,
    {
        Self::create_with(ThreadAttributes::default(), entry, arg)
    }

    /// Starts a new thread with explicit creation attributes.
    ///
    /// Fails with [`Error::Spawn`] if the OS refuses the thread; no handle
    /// exists in that case.
    pub fn create_with<F, A>(attributes: ThreadAttributes, entry: F, arg: A) -> Result<Self>
    where
        F: FnOnce(A) -> T + Send + 'static,
        A: Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let mut builder = thread::Builder::new();
        if let Some(name) = attributes.name {
            builder = builder.name(name);
        }
        if let Some(bytes) = attributes.stack_size {
            builder = builder.stack_size(bytes);
        }

        let handle = builder
            .spawn(move || {
                CANCEL_FLAG.with(|slot| *slot.borrow_mut() = Some(flag));
                lifecycle::run_entry(entry, arg)
            })
            .map_err(|source| Error::Spawn { source })?;

        trace_event!("created thread {:?}", handle.thread().id());
        Ok(Thread { handle, cancel })
    }

    /// Blocks until the thread terminates and reports how it finished.
    pub fn join(self) -> Result<ExitStatus<T>> {
        let id = self.handle.thread().id();
        let status = self.handle.join().map_err(Error::from_panic)?;
        trace_event!("joined thread {:?}", id);
        status
    }

    /// Requests cancellation. The target stops at its next [`test_cancel`].
    pub fn kill(&self) {
        trace_event!("cancellation requested for thread {:?}", self.id());
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn id(&self) -> ThreadId {
        self.handle.thread().id()
    }

    pub fn name(&self) -> Option<&str> {
        self.handle.thread().name()
    }

    /// `true` once the entry point has finished; `join` will not block.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Terminates the calling thread, making `join` report `Exited(status)`.
///
/// The rest of the caller's stack is skipped but unwound, so destructors
/// run. `status` must have the type the thread was created with, otherwise
/// `join` fails with [`Error::ExitStatusType`]. Called outside a thread
/// created here (or [`run_inline`]), the unwind propagates to the caller's
/// nearest `catch_unwind`.
pub fn exit<S: Any + Send>(status: S) -> ! {
    lifecycle::unwind_exit(status)
}

/// `true` if [`Thread::kill`] was called for the current thread.
pub fn is_cancelled() -> bool {
    CANCEL_FLAG.with(|slot| {
        slot.borrow()
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    })
}

/// Cancellation point: terminates the calling thread if cancellation was
/// requested, otherwise returns immediately.
pub fn test_cancel() {
    if is_cancelled() {
        lifecycle::unwind_cancel();
    }
}

/// Runs `entry(arg)` on the calling thread with the same `exit` and
/// cancellation handling as a created thread.
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
