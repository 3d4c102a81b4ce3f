// src/utils/cpu.rs

//! Online processor discovery.

use crate::utils::log::trace_event;

/// Returns the number of logical processors available to the current process.
///
/// Delegates to [`std::thread::available_parallelism`], which honours CPU
/// affinity masks and cgroup quotas where the OS exposes them. The result is
/// never zero: if the query fails this falls back to `1`.
///
/// The value does not change over the life of a process, so callers sizing
/// pools or sharded structures may cache it.
pub fn online_cpus() -> usize {
    match std::thread::available_parallelism() {
        Ok(count) => count.get(),
        Err(err) => {
            trace_event!("processor count unavailable ({}), assuming 1", err);
            1
        }
    }
}
