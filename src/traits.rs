//! Core traits that decouple deskshift from any specific desktop service or
//! input mechanism.
//!
//! Every concrete backend (the Windows virtual desktop service, a
//! low-level keyboard hook, a test harness, …) implements one of these
//! traits.  The [`Navigator`](crate::navigator::Navigator) only depends on
//! these abstractions.

use crate::dispatcher::IntentSender;
use crate::error::DesktopError;
use crate::intent::{Direction, WindowHandle};
use std::fmt;

/// Abstraction over the platform service that owns the ordered desktop
/// collection and the window → desktop associations.
///
/// Treated as an unreliable remote resource: every call can fail on its
/// own, and the collection may change between calls because the user can
/// add or close desktops through the OS.  Nothing here is cached.
///
/// # Contract
///
/// Implementations are **not** reentrant against each other.  The
/// [`Dispatcher`](crate::dispatcher::Dispatcher) guarantees that at most one
/// logical operation touches the service at a time; implementations do not
/// need internal locking for that purpose.
pub trait DesktopService {
    /// Borrowed handle to one desktop, valid for the duration of one intent.
    /// Compared by identity only.
    type Desktop: Clone + PartialEq + fmt::Debug;

    /// The service's notion of an application view attached to a window.
    type View;

    /// Current number of desktops.
    fn count(&self) -> Result<usize, DesktopError>;

    /// Append one desktop at the end of the collection.
    fn create_desktop(&self) -> Result<Self::Desktop, DesktopError>;

    /// Desktop at 0-based `index`; fails with
    /// [`IndexOutOfRange`](DesktopError::IndexOutOfRange) when
    /// `index >= count()` at the time of the call.
    fn desktop_at(&self, index: usize) -> Result<Self::Desktop, DesktopError>;

    /// The desktop currently shown.
    fn current_desktop(&self) -> Result<Self::Desktop, DesktopError>;

    /// Neighbour of `desktop` in `direction`; fails with
    /// [`NoAdjacentDesktop`](DesktopError::NoAdjacentDesktop) at the
    /// boundary.
    fn adjacent_desktop(
        &self,
        desktop: &Self::Desktop,
        direction: Direction,
    ) -> Result<Self::Desktop, DesktopError>;

    /// Make `desktop` the active desktop.
    fn switch_to(&self, desktop: &Self::Desktop) -> Result<(), DesktopError>;

    /// The top-level window holding input focus right now, or `None`.
    fn foreground_window(&self) -> Result<Option<WindowHandle>, DesktopError>;

    /// Resolve the application view for `window`; fails with
    /// [`WindowNotMovable`](DesktopError::WindowNotMovable) when the window
    /// has no application identity.
    fn view_for_window(&self, window: WindowHandle) -> Result<Self::View, DesktopError>;

    /// Associate `view` with `desktop`.
    fn move_window(&self, view: &Self::View, desktop: &Self::Desktop) -> Result<(), DesktopError>;
}

//  Intent Source

/// A source of [`NavigationIntent`](crate::intent::NavigationIntent)s.
///
/// Implementations observe some input mechanism (a global keyboard hook, a
/// test harness, …), classify what they see, and hand matches to the
/// provided [`IntentSender`].
///
/// # Contract
///
/// * [`run`](IntentSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Handoff is non-blocking: implementations call
///   [`IntentSender::try_send`] and never wait on the dispatcher.
/// * Implementations must never call into a [`DesktopService`].
pub trait IntentSource {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start observing input and forward every classified intent into
    /// `sink`.
    ///
    /// This method blocks the calling thread.  Run it on a dedicated thread.
    fn run(&mut self, sink: IntentSender) -> Result<(), Self::Error>;
}
