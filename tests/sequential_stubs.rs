use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use thread_utils::sequential;
use thread_utils::{Error, ExitStatus, ThreadAttributes};

// Same auto traits as the native backend, so shared state compiles on both.
static_assertions::assert_impl_all!(sequential::AtomicCounter32: Send, Sync);
static_assertions::assert_impl_all!(sequential::AtomicWide: Send, Sync);
static_assertions::assert_impl_all!(sequential::PointerCell<u8>: Send, Sync);
static_assertions::assert_impl_all!(sequential::Mutex<u8>: Send, Sync);
static_assertions::assert_impl_all!(sequential::Condvar: Send, Sync);
static_assertions::assert_impl_all!(sequential::Thread<u32>: Send);

/// Applies the same operation sequence to a counter; used to compare the
/// sequential values against the selected backend.
macro_rules! counter_trace {
    ($counter:expr) => {{
        let counter = $counter;
        counter.set(10);
        vec![
            counter.increment(),
            counter.add(-25),
            counter.decrement(),
            counter.add(i32::MAX),
            counter.increment(),
            counter.get(),
        ]
    }};
}

#[test]
fn test_counters_match_selected_backend() {
    let sequential = counter_trace!(sequential::AtomicCounter32::new(0));
    let selected = counter_trace!(thread_utils::AtomicCounter32::new(0));
    assert_eq!(sequential, selected);
}

#[test]
fn test_wide_counter_matches_selected_backend() {
    let sequential = sequential::AtomicWide::new(0);
    let selected = thread_utils::AtomicWide::new(0);
    for delta in [5, -3, 1 << 20, -(1 << 21)] {
        assert_eq!(sequential.add(delta), selected.add(delta));
    }
    assert_eq!(sequential.get(), selected.get());
}

#[test]
fn test_cas_convention_matches_selected_backend() {
    let mut a = 1_i16;
    let mut b = 2_i16;
    let mut c = 3_i16;
    let (pa, pb, pc) = (&mut a as *mut i16, &mut b as *mut i16, &mut c as *mut i16);

    let sequential = sequential::PointerCell::new(pa);
    let selected = thread_utils::PointerCell::new(pa);

    let steps = [(pa, pb), (pa, pc), (pb, pc), (pc, pa)];
    for (expected, new) in steps {
        let got = sequential.compare_and_swap(expected, new);
        assert_eq!(got, selected.compare_and_swap(expected, new));
        assert!(got == expected || got == new);
        assert_eq!(sequential.load(), selected.load());
    }
    assert_eq!(sequential.swap(pb), selected.swap(pb));
    assert_eq!(sequential.into_inner(), pb);
}

#[test]
fn test_locking_is_noop() {
    let mutex = sequential::Mutex::init(0_u32).unwrap();
    let condvar = sequential::Condvar::init().unwrap();

    let mut guard = mutex.lock().unwrap();
    *guard += 1;
    condvar.signal();
    condvar.broadcast();
    let guard = condvar.wait(guard).unwrap();
    guard.unlock().unwrap();

    assert_eq!(mutex.destroy(), 1);
    sequential::memory_barrier();
}

#[test]
fn test_relock_is_reported_not_deadlocked() {
    let mutex = sequential::Mutex::new(());
    let _held = mutex.lock().unwrap();
    let err = mutex.lock().unwrap_err();
    assert!(matches!(err, Error::AlreadyLocked));
    assert_ne!(err.status(), 0);
}

#[test]
fn test_create_drops_work() {
    let runs = Arc::new(AtomicUsize::new(0));
    let thread = sequential::Thread::create_with(
        ThreadAttributes::new().name("dropped"),
        |runs: Arc<AtomicUsize>| runs.fetch_add(1, Ordering::SeqCst),
        Arc::clone(&runs),
    )
    .unwrap();

    assert_eq!(thread.name(), Some("dropped"));
    thread.kill();
    assert_eq!(thread.join().unwrap(), ExitStatus::NotStarted);
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_run_inline_is_the_synchronous_escape_hatch() {
    let runs = Arc::new(AtomicUsize::new(0));
    let status = sequential::run_inline(
        |runs: Arc<AtomicUsize>| -> usize {
            runs.fetch_add(1, Ordering::SeqCst);
            sequential::test_cancel();
            sequential::exit(runs.load(Ordering::SeqCst))
        },
        Arc::clone(&runs),
    )
    .unwrap();

    assert_eq!(status, ExitStatus::Exited(1));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}
