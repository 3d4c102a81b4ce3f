// src/native/atomic.rs

//! Atomic counters, pointer compare-and-swap and the memory barrier.
//!
//! Everything here compiles down to the target's atomic instructions through
//! `std::sync::atomic`. Read-modify-write operations use `SeqCst`, so all
//! counter and CAS operations on one cell form a single total order.

use std::fmt;
use std::ptr;
use std::sync::atomic::{self, AtomicI32, AtomicPtr, Ordering};

#[cfg(all(target_pointer_width = "64", target_has_atomic = "64"))]
use std::sync::atomic::AtomicI64;

/// A 32-bit signed counter mutated atomically.
///
/// Every mutator returns the value *after* the update, so callers can treat
/// the result as the new total (e.g. "was this the last reference?").
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

    /// Stores `value` as the current value.
    ///
    /// Meant for initialization before the counter is shared. The store is
    /// not ordered against concurrent readers.
    pub fn set(&self, value: i32) {
        self.value.store(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> i32 {
        self.value.load(Ordering::SeqCst)
    }

    /// Adds 1 and returns the new value.
    pub fn increment(&self) -> i32 {
        self.value.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Adds `delta` (which may be negative) and returns the new value.
    pub fn add(&self, delta: i32) -> i32 {
        self.value.fetch_add(delta, Ordering::SeqCst).wrapping_add(delta)
    }

    /// Subtracts 1 and returns the new value.
    pub fn decrement(&self) -> i32 {
        self.value.fetch_sub(1, Ordering::SeqCst).wrapping_sub(1)
    }

    pub fn into_inner(self) -> i32 {
        self.value.into_inner()
    }
}

/// A 64-bit signed counter mutated atomically.
///
/// Only available on targets with 64-bit pointers and native 64-bit
/// atomics. Use [`AtomicWide`] for code that must build everywhere.
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

    /// Initialization-only store, see [`AtomicCounter32::set`].
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Adds `delta` and returns the new value.
    pub fn add(&self, delta: i64) -> i64 {
        self.value.fetch_add(delta, Ordering::SeqCst).wrapping_add(delta)
    }

    pub fn into_inner(self) -> i64 {
        self.value.into_inner()
    }
}

/// The widest counter the target supports natively.
#[cfg(all(target_pointer_width = "64", target_has_atomic = "64"))]
pub type AtomicWide = AtomicCounter64;
/// Value type accepted and returned by [`AtomicWide`].
#[cfg(all(target_pointer_width = "64", target_has_atomic = "64"))]
pub type WideValue = i64;

#[cfg(not(all(target_pointer_width = "64", target_has_atomic = "64")))]
pub type AtomicWide = AtomicCounter32;
#[cfg(not(all(target_pointer_width = "64", target_has_atomic = "64")))]
pub type WideValue = i32;

/// A pointer-sized slot supporting compare-and-swap.
///
/// The cell never dereferences or frees what it points to; ownership of the
/// pointee stays with the caller.
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
        self.slot.load(Ordering::SeqCst)
    }

    /// Initialization-only store, like [`AtomicCounter32::set`].
    pub fn store(&self, ptr: *mut T) {
        self.slot.store(ptr, Ordering::Relaxed);
    }

    /// Replaces the slot with `new` if it currently holds `expected`.
    ///
    /// Returns `expected` when the swap happened and `new` when it did not,
    /// so success is `cell.compare_and_swap(old, new) == old` without a
    /// second read of the slot.
    pub fn compare_and_swap(&self, expected: *mut T, new: *mut T) -> *mut T {
        match self
            .slot
            .compare_exchange(expected, new, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => expected,
            Err(_) => new,
        }
    }

    /// Unconditionally stores `new` and returns the value it replaced.
    pub fn swap(&self, new: *mut T) -> *mut T {
        self.slot.swap(new, Ordering::SeqCst)
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

/// Full memory fence.
///
/// No load or store issued before the barrier on this thread may be observed
/// by another thread as happening after it, and vice versa.
#[inline]
pub fn memory_barrier() {
    atomic::fence(Ordering::SeqCst);
}
