//! # Thread Utilities
//!
//! A portable layer of concurrency primitives: atomic counters, pointer
//! compare-and-swap, a memory barrier, mutexes, condition variables, thread
//! lifecycle operations and processor count discovery, behind one interface.
//!
//! The backend is chosen once, at compile time:
//! - `native` (feature `threads`, on by default): OS threads and locks via the
//!   standard library, atomic instructions for counters and CAS.
//! - `sequential`: single-threaded stand-ins. Counters and CAS keep their
//!   value semantics, locking is a no-op and `Thread::create` never runs the
//!   entry point.
//!
//! The selected backend is re-exported at the crate root. The sequential
//! backend is always compiled and can be used directly as
//! [`sequential`] even when threads are enabled.
//!
//! ```
//! use thread_utils::{AtomicCounter32, ExitStatus, Thread};
//!
//! let counter = AtomicCounter32::new(0);
//! assert_eq!(counter.increment(), 1);
//!
//! let worker = Thread::create(|n: u32| n * 2, 21).unwrap();
//! match worker.join().unwrap() {
//!     ExitStatus::Returned(v) => assert_eq!(v, 42),
//!     ExitStatus::NotStarted => {} // sequential build
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

// Re-export commonly used types at the crate root
pub use utils::error::{Error, Result};

pub mod utils {
    pub mod config;
    pub mod cpu;
    pub mod error;
    pub mod lifecycle;
    pub(crate) mod log;
}

#[cfg(feature = "threads")]
pub mod native {
    pub mod atomic;
    pub mod sync;
    pub mod threads;

    pub use self::atomic::*;
    pub use self::sync::*;
    pub use self::threads::*;
}

pub mod sequential {
    pub mod atomic;
    pub mod sync;
    pub mod threads;

    pub use self::atomic::*;
    pub use self::sync::*;
    pub use self::threads::*;
}

// Backend selection
#[cfg(feature = "threads")]
pub use native::{
    AtomicCounter32, AtomicWide, Condvar, Mutex, MutexGuard, PointerCell, Thread, WideValue,
    current_id, exit, is_cancelled, memory_barrier, run_inline, test_cancel,
};
#[cfg(all(
    feature = "threads",
    target_pointer_width = "64",
    target_has_atomic = "64"
))]
pub use native::AtomicCounter64;

#[cfg(not(feature = "threads"))]
pub use sequential::{
    AtomicCounter32, AtomicWide, Condvar, Mutex, MutexGuard, PointerCell, Thread, WideValue,
    current_id, exit, is_cancelled, memory_barrier, run_inline, test_cancel,
};
#[cfg(all(
    not(feature = "threads"),
    target_pointer_width = "64",
    target_has_atomic = "64"
))]
pub use sequential::AtomicCounter64;

pub use utils::config::{Backend, BuildConfig, PlatformFamily, THREADS_ENABLED, WIDE_ATOMICS};
pub use utils::cpu::online_cpus;
pub use utils::lifecycle::{ExitStatus, ThreadAttributes};
