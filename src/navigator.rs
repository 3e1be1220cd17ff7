//! The navigation engine that turns intents into desktop service calls.
//!
//! [`Navigator`] owns the [`DesktopService`] and reacts to
//! [`NavigationIntent`]s by resolving preconditions through the
//! [resolver](crate::resolver) and then switching or moving.  It keeps no
//! state between intents: the desktop collection and the foreground window
//! are re-read every time.

use crate::error::DesktopError;
use crate::intent::{Direction, NavigationIntent};
use crate::resolver::{ensure_count, resolve_adjacent};
use crate::traits::DesktopService;
use log::{debug, info, warn};

/// What a successfully handled intent achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The target desktop is now current.
    Switched,
    /// The window was moved and the target desktop is now current.
    Moved,
    /// The window was moved but switching to its desktop failed.  Move and
    /// switch are not atomic; this state is accepted rather than undone.
    MovedWithoutSwitch(DesktopError),
}

/// Executes intents against a [`DesktopService`].
///
/// The navigator is generic over any [`DesktopService`] implementation,
/// making it independent of the Windows COM backend.
///
/// # Typical usage
///
/// ```ignore
/// let service = ComDesktopService::connect(&config.service)?;
/// let mut navigator = Navigator::new(service);
/// navigator.handle(NavigationIntent::MoveRelative(Direction::Right))?;
/// ```
pub struct Navigator<S: DesktopService> {
    service: S,
}

impl<S: DesktopService> Navigator<S> {
    /// Create a navigator that owns `service` exclusively.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Process a single [`NavigationIntent`] to completion.
    ///
    /// Nothing is retried and nothing is rolled back: desktops created while
    /// filling toward an index stay, and a window that moved stays moved even
    /// if the follow-up switch fails.
    pub fn handle(&mut self, intent: NavigationIntent) -> Result<Outcome, DesktopError> {
        match intent {
            NavigationIntent::SwitchTo(index) => {
                info!("switch to desktop {}", index.saturating_add(1));
                self.switch_to_index(index)
            }
            NavigationIntent::MoveTo(index) => {
                info!("move window to desktop {}", index.saturating_add(1));
                self.move_to_index(index)
            }
            NavigationIntent::MoveRelative(dir) => {
                info!("move window {}", dir);
                self.move_relative(dir)
            }
        }
    }

    fn switch_to_index(&self, index: usize) -> Result<Outcome, DesktopError> {
        let target = self.fill_and_fetch(index)?;
        self.service.switch_to(&target)?;
        Ok(Outcome::Switched)
    }

    fn move_to_index(&self, index: usize) -> Result<Outcome, DesktopError> {
        let view = self.focused_view()?;
        let target = self.fill_and_fetch(index)?;
        self.move_and_follow(&view, &target)
    }

    fn move_relative(&self, direction: Direction) -> Result<Outcome, DesktopError> {
        let view = self.focused_view()?;
        let current = self.service.current_desktop()?;
        let target = resolve_adjacent(&self.service, &current, direction)?;
        debug!("{:?} -> {:?}", current, target);
        self.move_and_follow(&view, &target)
    }

    //  Helpers

    /// Make sure a desktop exists at `index` and fetch it.
    ///
    /// If filling stalled short of `index`, the lookup fails and is reported
    /// as [`DesktopError::NavigationFailed`].
    fn fill_and_fetch(&self, index: usize) -> Result<S::Desktop, DesktopError> {
        let count = ensure_count(&self.service, index)?;
        self.service.desktop_at(index).map_err(|e| {
            DesktopError::NavigationFailed(format!(
                "desktop {} unavailable after filling to {}: {}",
                index.saturating_add(1),
                count,
                e
            ))
        })
    }

    /// Resolve the foreground window and its application view.
    fn focused_view(&self) -> Result<S::View, DesktopError> {
        let window = self
            .service
            .foreground_window()?
            .ok_or(DesktopError::NoForegroundWindow)?;
        let view = self.service.view_for_window(window)?;
        debug!("focused window {}", window);
        Ok(view)
    }

    /// Move `view` to `target`, then switch to `target`.
    fn move_and_follow(&self, view: &S::View, target: &S::Desktop) -> Result<Outcome, DesktopError> {
        self.service.move_window(view, target)?;
        match self.service.switch_to(target) {
            Ok(()) => Ok(Outcome::Moved),
            Err(e) => {
                warn!("window moved but switching failed: {}", e);
                Ok(Outcome::MovedWithoutSwitch(e))
            }
        }
    }
}
