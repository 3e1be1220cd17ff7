//! Failure taxonomy shared by the adapter, resolver and navigator.

use crate::intent::{Direction, WindowHandle};

/// Everything that can go wrong while executing a single intent.
///
/// Only [`ServiceUnavailable`](DesktopError::ServiceUnavailable) during
/// startup is fatal to the process; every other occurrence is contained by
/// the [`Dispatcher`](crate::dispatcher::Dispatcher), reported, and
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesktopError {
    /// The desktop service could not be reached or rejected the call.
    #[error("desktop service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The requested index is not backed by a desktop right now.
    #[error("desktop index {index} out of range (have {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// The desktop is at the boundary in that direction.
    #[error("no adjacent desktop to the {0}")]
    NoAdjacentDesktop(Direction),

    /// No window has input focus.
    #[error("no window has input focus")]
    NoForegroundWindow,

    /// The window has no resolvable application view, or the service
    /// refused to move it.
    #[error("window {0} cannot be moved")]
    WindowNotMovable(WindowHandle),

    /// The desired end state was not reached after the fallback policy ran.
    #[error("navigation failed: {0}")]
    NavigationFailed(String),
}
