//! Index and adjacency preconditions.
//!
//! Before an intent touches a desktop, the resolver makes sure that desktop
//! exists.  Desktops are only ever appended, one at a time, in increasing
//! order, so existing desktops keep their identity.
//!
//! The two directions are deliberately asymmetric: moving right past the
//! last desktop grows the collection by one, moving left from the first
//! desktop is a boundary.

use crate::error::DesktopError;
use crate::intent::Direction;
use crate::traits::DesktopService;
use log::{info, warn};

/// Create desktops until one exists at 0-based `target_index`.
///
/// Returns the number of desktops after filling.  The count is read once;
/// each successful creation is assumed to add exactly one desktop.  If a
/// creation fails the fill stops there and the count reached so far is
/// returned: partial progress is kept, never rolled back.
///
/// Fails only when the initial count cannot be read.
pub fn ensure_count<S: DesktopService>(
    service: &S,
    target_index: usize,
) -> Result<usize, DesktopError> {
    let mut count = service.count()?;
    while count <= target_index {
        info!("creating desktop {}", count + 1);
        if let Err(e) = service.create_desktop() {
            warn!(
                "stopped filling at {} desktop(s), wanted {}: {}",
                count,
                target_index.saturating_add(1),
                e
            );
            break;
        }
        count += 1;
    }
    Ok(count)
}

/// Resolve the neighbour of `current` in `direction`.
///
/// When there is no neighbour to the right, a new desktop is appended and
/// returned instead.  To the left the boundary error is returned as-is and
/// nothing is created.
pub fn resolve_adjacent<S: DesktopService>(
    service: &S,
    current: &S::Desktop,
    direction: Direction,
) -> Result<S::Desktop, DesktopError> {
    match service.adjacent_desktop(current, direction) {
        Err(DesktopError::NoAdjacentDesktop(Direction::Right)) => {
            info!("no desktop to the right, creating one");
            service.create_desktop()
        }
        other => other,
    }
}
