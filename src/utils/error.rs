use std::any::Any;
use std::io;

use thiserror::Error;

/// Status reported when the OS rejected a thread without an error code.
const STATUS_SPAWN_FAILED: i32 = -1;
const STATUS_PANICKED: i32 = -2;
const STATUS_EXIT_TYPE: i32 = -3;
const STATUS_ALREADY_LOCKED: i32 = -4;

/// Main error type for the threading layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The OS refused to create a thread. The handle was never produced.
    #[error("failed to spawn thread: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },
    /// The joined thread panicked before reaching a normal exit.
    #[error("thread panicked: {0}")]
    Panicked(String),
    /// `exit` was called with a status whose type differs from the
    /// thread's declared result type.
    #[error("thread exited with a status of an unexpected type")]
    ExitStatusType,
    /// A sequential mutex was locked again while a guard for it was alive.
    #[error("mutex is already locked by this thread of control")]
    AlreadyLocked,
}

impl Error {
    /// Returns the nonzero status code for this error.
    ///
    /// Spawn failures carry the raw OS error when one is available; the
    /// remaining variants map to fixed negative codes.
    pub fn status(&self) -> i32 {
        match self {
            Error::Spawn { source } => source
                .raw_os_error()
                .filter(|code| *code != 0)
                .unwrap_or(STATUS_SPAWN_FAILED),
            Error::Panicked(_) => STATUS_PANICKED,
            Error::ExitStatusType => STATUS_EXIT_TYPE,
            Error::AlreadyLocked => STATUS_ALREADY_LOCKED,
        }
    }

    /// Builds an error from a panic payload caught at a thread boundary.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Error::Panicked(message)
    }
}

/// A specialized `Result` type for threading operations.
pub type Result<T> = std::result::Result<T, Error>;
