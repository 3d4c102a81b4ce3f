// src/sequential/atomic.rs

//! Counters and pointer CAS for builds without thread support.
//!
//! Plain read/modify/write: each update is a separate `Relaxed` load and
//! store, never an atomic read-modify-write. The cells are `Sync` so code
//! written for the native backend (statics, `Arc`-shared counters) still
//! compiles; correctness rests on the single-threaded assumption of this
//! backend. Return values follow exactly the same conventions as the native
//! backend.

use std::fmt;
use std::ptr;
use std::sync::atomic::{AtomicI32, AtomicPtr, Ordering};

#[cfg(all(target_pointer_width = "64", target_has_atomic = "64"))]
use std::sync::atomic::AtomicI64;

/// 32-bit counter with the atomic counter interface and no atomicity.
#[derive(Debug, Default)]
pub struct AtomicCounter32 {
    value: AtomicI32,
}

impl AtomicCounter32 {
    pub const fn new(value: i32) -> Self {
        AtomicCounter32 {
            value: AtomicI32::new(value),
        }
    }

    pub fn set(&self, value: i32) {
        self.value.store(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> i32 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn increment(&self) -> i32 {
        self.add(1)
    }

    pub fn add(&self, delta: i32) -> i32 {
        let value = self.value.load(Ordering::Relaxed).wrapping_add(delta);
        self.value.store(value, Ordering::Relaxed);
        value
    }

    pub fn decrement(&self) -> i32 {
        self.add(-1)
    }

    pub fn into_inner(self) -> i32 {
        self.value.into_inner()
    }
}

#[cfg(all(target_pointer_width = "64", target_has_atomic = "64"))]
#[derive(Debug, Default)]
pub struct AtomicCounter64 {
    value: AtomicI64,
}

#[cfg(all(target_pointer_width = "64", target_has_atomic = "64"))]
impl AtomicCounter64 {
    pub const fn new(value: i64) -> Self {
        AtomicCounter64 {
            value: AtomicI64::new(value),
        }
    }

    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn add(&self, delta: i64) -> i64 {
        let value = self.value.load(Ordering::Relaxed).wrapping_add(delta);
        self.value.store(value, Ordering::Relaxed);
        value
    }

    pub fn into_inner(self) -> i64 {
        self.value.into_inner()
    }
}

#[cfg(all(target_pointer_width = "64", target_has_atomic = "64"))]
pub type AtomicWide = AtomicCounter64;
#[cfg(all(target_pointer_width = "64", target_has_atomic = "64"))]
pub type WideValue = i64;

#[cfg(not(all(target_pointer_width = "64", target_has_atomic = "64")))]
pub type AtomicWide = AtomicCounter32;
#[cfg(not(all(target_pointer_width = "64", target_has_atomic = "64")))]
pub type WideValue = i32;

/// Pointer slot with the compare-and-swap interface and no atomicity.
pub struct PointerCell<T> {
    slot: AtomicPtr<T>,
}

impl<T> PointerCell<T> {
    pub const fn new(ptr: *mut T) -> Self {
        PointerCell {
            slot: AtomicPtr::new(ptr),
        }
    }

    pub const fn null() -> Self {
        Self::new(ptr::null_mut())
    }

    pub fn load(&self) -> *mut T {
        self.slot.load(Ordering::Relaxed)
    }

    pub fn store(&self, ptr: *mut T) {
        self.slot.store(ptr, Ordering::Relaxed);
    }

    /// Returns `expected` if the slot held it and now holds `new`; returns
    /// `new` and leaves the slot alone otherwise.
    pub fn compare_and_swap(&self, expected: *mut T, new: *mut T) -> *mut T {
        if self.slot.load(Ordering::Relaxed) == expected {
            self.slot.store(new, Ordering::Relaxed);
            expected
        } else {
            new
        }
    }

    pub fn swap(&self, new: *mut T) -> *mut T {
        let previous = self.slot.load(Ordering::Relaxed);
        self.slot.store(new, Ordering::Relaxed);
        previous
    }

    pub fn into_inner(self) -> *mut T {
        self.slot.into_inner()
    }
}

impl<T> Default for PointerCell<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> fmt::Debug for PointerCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PointerCell").field(&self.load()).finish()
    }
}

/// No-op: with one thread of control there is nothing to order against.
#[inline]
pub fn memory_barrier() {}
