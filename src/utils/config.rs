// src/utils/config.rs

//! Build-time configuration of the threading layer.
//!
//! Every choice here is fixed when the crate is compiled. The constants and
//! [`BuildConfig`] only report those choices at run time so callers can size
//! work or print diagnostics without repeating the `cfg` logic.

use std::fmt;

/// `true` when the `threads` feature selected the native backend.
pub const THREADS_ENABLED: bool = cfg!(feature = "threads");

/// `true` when the target has 64-bit pointers and native 64-bit atomics,
/// in which case `AtomicCounter64` exists and `AtomicWide` resolves to it.
pub const WIDE_ATOMICS: bool = cfg!(all(target_pointer_width = "64", target_has_atomic = "64"));

/// Which implementation backs the primitives re-exported at the crate root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// OS threads, atomic instructions and OS locks.
    Native,
    /// Single logical thread; locking is a no-op and threads never start.
    Sequential,
}

impl Backend {
    pub const fn current() -> Self {
        if THREADS_ENABLED {
            Backend::Native
        } else {
            Backend::Sequential
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Native => "native",
            Backend::Sequential => "sequential",
        }
    }
}

/// The OS threading API family the native backend runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    /// pthreads.
    Posix,
    /// Win32 threads, SRW locks and condition variables.
    Windows,
    /// Anything else the standard library supports.
    Other,
}

impl PlatformFamily {
    pub const fn current() -> Self {
        if cfg!(windows) {
            PlatformFamily::Windows
        } else if cfg!(unix) {
            PlatformFamily::Posix
        } else {
            PlatformFamily::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformFamily::Posix => "posix",
            PlatformFamily::Windows => "windows",
            PlatformFamily::Other => "other",
        }
    }
}

/// Snapshot of the compile-time selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    pub backend: Backend,
    pub wide_atomics: bool,
    pub platform: PlatformFamily,
    pub debug_logging: bool,
}

impl BuildConfig {
    pub const fn current() -> Self {
        BuildConfig {
            backend: Backend::current(),
            wide_atomics: WIDE_ATOMICS,
            platform: PlatformFamily::current(),
            debug_logging: cfg!(feature = "debug-logging"),
        }
    }

    /// Bit width of `WideValue` for this build.
    pub fn wide_bits(&self) -> u32 {
        if self.wide_atomics { 64 } else { 32 }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "backend={} platform={} wide-atomics={} ({}-bit) debug-logging={}",
            self.backend.as_str(),
            self.platform.as_str(),
            self.wide_atomics,
            self.wide_bits(),
            self.debug_logging
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_matches_feature() {
        let config = BuildConfig::current();
        assert_eq!(config.backend == Backend::Native, THREADS_ENABLED);
    }

    #[test]
    fn test_wide_atomics_match_pointer_width() {
        let config = BuildConfig::current();
        if cfg!(target_pointer_width = "32") {
            assert!(!config.wide_atomics);
            assert_eq!(config.wide_bits(), 32);
        }
        if config.wide_atomics {
            assert_eq!(std::mem::size_of::<usize>(), 8);
        }
    }

    #[test]
    fn test_platform_family() {
        let platform = PlatformFamily::current();
        if cfg!(unix) {
            assert_eq!(platform, PlatformFamily::Posix);
        }
        if cfg!(windows) {
            assert_eq!(platform, PlatformFamily::Windows);
        }
    }

    #[test]
    fn test_display_lists_every_selection() {
        let text = BuildConfig::current().to_string();
        assert!(text.contains("backend="));
        assert!(text.contains("platform="));
        assert!(text.contains("wide-atomics="));
        assert!(text.contains("debug-logging="));
    }
}
