// src/native/sync.rs

//! Mutex and condition variable backed by the OS.
//!
//! Thin wrappers over `std::sync::{Mutex, Condvar}`, which map to futexes or
//! pthreads on Unix and SRW locks on Windows. The wrappers expose the
//! status-returning surface shared with the sequential backend.
//!
//! A holder that unwinds (a panic, `exit`, or a cancellation point) poisons
//! the std mutex. Poisoning is not reported here: the next `lock` recovers the
//! guard, matching the behaviour of an OS mutex whose holder went away.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{self, PoisonError, TryLockError};

use crate::utils::error::Result;
use crate::utils::log::trace_event;

fn recover<G>(err: PoisonError<G>) -> G {
    trace_event!("recovering guard from a poisoned mutex");
    err.into_inner()
}

/// A mutual-exclusion lock protecting a value of type `T`.
#[derive(Default)]
pub struct Mutex<T> {
    inner: sync::Mutex<T>,
}

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Mutex {
            inner: sync::Mutex::new(value),
        }
    }

    /// Status-returning constructor. The OS lock cannot fail to initialize
    /// here, so this always succeeds.
    pub fn init(value: T) -> Result<Self> {
        Ok(Self::new(value))
    }

    /// Blocks until the lock is free, then acquires it.
    ///
    /// The lock is held until the returned guard is dropped or passed to
    /// [`MutexGuard::unlock`].
    pub fn lock(&self) -> Result<MutexGuard<'_, T>> {
        let inner = self.inner.lock().unwrap_or_else(recover);
        Ok(MutexGuard { inner })
    }

    /// Acquires the lock only if it is free right now.
    pub fn try_lock(&self) -> Result<Option<MutexGuard<'_, T>>> {
        match self.inner.try_lock() {
            Ok(inner) => Ok(Some(MutexGuard { inner })),
            Err(TryLockError::Poisoned(err)) => Ok(Some(MutexGuard {
                inner: recover(err),
            })),
            Err(TryLockError::WouldBlock) => Ok(None),
        }
    }

    /// Exclusive access without locking; the borrow checker proves there is
    /// no other user.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut().unwrap_or_else(recover)
    }

    /// Releases the OS lock and returns the protected value.
    pub fn destroy(self) -> T {
        self.inner.into_inner().unwrap_or_else(recover)
    }
}

impl<T: fmt::Debug> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Ok(guard) => f.debug_struct("Mutex").field("data", &*guard).finish(),
            Err(TryLockError::Poisoned(err)) => f
                .debug_struct("Mutex")
                .field("data", &*err.into_inner())
                .finish(),
            Err(TryLockError::WouldBlock) => f.write_str("Mutex { <locked> }"),
        }
    }
}

/// Proof that the current thread holds a [`Mutex`].
///
/// Only the holder owns the guard, so only the holder can unlock.
pub struct MutexGuard<'a, T> {
    inner: sync::MutexGuard<'a, T>,
}

impl<T> MutexGuard<'_, T> {
    /// Releases the lock. Equivalent to dropping the guard.
    pub fn unlock(self) -> Result<()> {
        drop(self);
        Ok(())
    }
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for MutexGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

/// A condition variable used together with a [`Mutex`].
///
/// Wakeups may be spurious: always wait in a loop that re-checks the
/// predicate, or use [`Condvar::wait_while`].
#[derive(Debug, Default)]
pub struct Condvar {
    inner: sync::Condvar,
}

impl Condvar {
    pub const fn new() -> Self {
        Condvar {
            inner: sync::Condvar::new(),
        }
    }

    pub fn init() -> Result<Self> {
        Ok(Self::new())
    }

    /// Atomically releases the guard's mutex and blocks until woken, then
    /// reacquires the mutex before returning.
    pub fn wait<'a, T>(&self, guard: MutexGuard<'a, T>) -> Result<MutexGuard<'a, T>> {
        let inner = self.inner.wait(guard.inner).unwrap_or_else(recover);
        Ok(MutexGuard { inner })
    }

    /// Waits for as long as `condition` returns `true`.
    pub fn wait_while<'a, T, F>(
        &self,
        guard: MutexGuard<'a, T>,
        condition: F,
    ) -> Result<MutexGuard<'a, T>>
    where
        F: FnMut(&mut T) -> bool,
    {
        let inner = self
            .inner
            .wait_while(guard.inner, condition)
            .unwrap_or_else(recover);
        Ok(MutexGuard { inner })
    }

    /// Wakes at least one waiting thread, if any.
    pub fn signal(&self) {
        self.inner.notify_one();
    }

    /// Wakes every waiting thread.
    pub fn broadcast(&self) {
        self.inner.notify_all();
    }

    pub fn destroy(self) {}
}
