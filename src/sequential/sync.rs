// src/sequential/sync.rs

//! Mutex and condition variable stand-ins for builds without threads.
//!
//! There is never contention, so locking never waits. The mutex still hands
//! out a guard, claimed through `spin::Mutex::try_lock` and never spun on,
//! which keeps the exclusive-access rules of the native API and turns an
//! accidental second `lock` into [`Error::AlreadyLocked`] instead of a silent
//! alias. Both types are `Send + Sync`, so statics and `Arc`-shared state
//! written for the native backend compile unchanged.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::utils::error::{Error, Result};

#[derive(Default)]
pub struct Mutex<T> {
    value: spin::Mutex<T>,
}

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Mutex {
            value: spin::Mutex::new(value),
        }
    }

    pub fn init(value: T) -> Result<Self> {
        Ok(Self::new(value))
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, T>> {
        self.value
            .try_lock()
            .map(|inner| MutexGuard { inner })
            .ok_or(Error::AlreadyLocked)
    }

    pub fn try_lock(&self) -> Result<Option<MutexGuard<'_, T>>> {
        Ok(self.value.try_lock().map(|inner| MutexGuard { inner }))
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    pub fn destroy(self) -> T {
        self.value.into_inner()
    }
}

impl<T: fmt::Debug> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.try_lock() {
            Some(value) => f.debug_struct("Mutex").field("data", &*value).finish(),
            None => f.write_str("Mutex { <locked> }"),
        }
    }
}

pub struct MutexGuard<'a, T> {
    inner: spin::MutexGuard<'a, T>,
}

impl<T> MutexGuard<'_, T> {
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

/// Condition variable whose operations are all no-ops.
#[derive(Debug, Default)]
pub struct Condvar {
    _private: (),
}

impl Condvar {
    pub const fn new() -> Self {
        Condvar { _private: () }
    }

    pub fn init() -> Result<Self> {
        Ok(Self::new())
    }

    /// Returns the guard immediately; nobody else could signal.
    pub fn wait<'a, T>(&self, guard: MutexGuard<'a, T>) -> Result<MutexGuard<'a, T>> {
        Ok(guard)
    }

    /// Returns the guard immediately without evaluating `condition`. Looping
    /// on the predicate here could never terminate.
    pub fn wait_while<'a, T, F>(
        &self,
        guard: MutexGuard<'a, T>,
        _condition: F,
    ) -> Result<MutexGuard<'a, T>>
    where
        F: FnMut(&mut T) -> bool,
    {
        Ok(guard)
    }

    pub fn signal(&self) {}

    pub fn broadcast(&self) {}

    pub fn destroy(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_unlock() {
        let mutex = Mutex::init(vec![1]).unwrap();
        mutex.lock().unwrap().push(2);
        assert_eq!(mutex.destroy(), vec![1, 2]);
    }

    #[test]
    fn test_relock_reports_misuse() {
        let mutex = Mutex::new(0);
        let guard = mutex.lock().unwrap();
        assert!(matches!(mutex.lock(), Err(Error::AlreadyLocked)));
        assert!(mutex.try_lock().unwrap().is_none());
        guard.unlock().unwrap();
        assert!(mutex.lock().is_ok());
    }

    static SHARED: Mutex<u32> = Mutex::new(0);
    static READY: Condvar = Condvar::new();

    #[test]
    fn test_usable_from_statics() {
        let mut guard = SHARED.lock().unwrap();
        *guard += 1;
        READY.signal();
        let guard = READY.wait(guard).unwrap();
        assert_eq!(*guard, 1);
    }

    #[test]
    fn test_condvar_is_noop() {
        let mutex = Mutex::new(3);
        let condvar = Condvar::init().unwrap();
        condvar.signal();
        condvar.broadcast();
        let guard = condvar.wait(mutex.lock().unwrap()).unwrap();
        let guard = condvar.wait_while(guard, |_| true).unwrap();
        assert_eq!(*guard, 3);
        drop(guard);
        condvar.destroy();
    }
}
