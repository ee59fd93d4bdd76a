//! Session lifecycle.

use std::fmt;

/// Lifecycle state of an inference session.
///
/// A session is observable only once construction has succeeded, so there
/// is no uninitialized state here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The engine handle is loaded and accepts prompts.
    Ready,
    /// The engine handle has been released.
    Released,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Released => write!(f, "released"),
        }
    }
}
