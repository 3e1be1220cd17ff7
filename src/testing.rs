//! In-memory [`DesktopService`] used by the unit tests.
//!
//! [`FakeDesktops`] models the ordered desktop collection, window → desktop
//! associations and the foreground window.  Failures can be injected per
//! operation, and an optional per-call delay plus an overlap counter let the
//! dispatcher tests prove that calls are never interleaved.

use crate::error::DesktopError;
use crate::intent::{Direction, WindowHandle};
use crate::traits::DesktopService;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Default)]
struct FakeState {
    desktops: Vec<u32>,
    next_id: u32,
    current: u32,
    windows: HashMap<WindowHandle, u32>,
    foreground: Option<WindowHandle>,
    unmovable: HashSet<WindowHandle>,
    create_budget: Option<usize>,
    fail_switch: bool,
    fail_move: bool,
    unavailable: bool,
    calls: Vec<String>,
}

/// Shared handle to a fake desktop collection.  Clones observe the same
/// state, so a test can keep one clone while the navigator owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeDesktops {
    state: Arc<Mutex<FakeState>>,
    delay: Option<Duration>,
    in_call: Arc<AtomicBool>,
    overlaps: Arc<AtomicUsize>,
}

/// Marks the fake as busy for the lifetime of one service call.
struct CallGuard<'a> {
    in_call: &'a AtomicBool,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.in_call.store(false, Ordering::SeqCst);
    }
}

impl FakeDesktops {
    /// `count` desktops, the first one current, nothing focused.
    pub fn with_desktops(count: usize) -> Self {
        let fake = Self::default();
        {
            let mut s = fake.lock();
            for _ in 0..count {
                s.next_id += 1;
                let id = s.next_id;
                s.desktops.push(id);
            }
            s.current = s.desktops.first().copied().unwrap_or(0);
        }
        fake
    }

    /// Sleep for `delay` inside every service call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Place `window` on the desktop at `index` and give it input focus.
    pub fn focus(&self, window: WindowHandle, index: usize) {
        let mut s = self.lock();
        let id = s.desktops[index];
        s.windows.insert(window, id);
        s.foreground = Some(window);
    }

    /// Drop input focus entirely.
    pub fn clear_focus(&self) {
        self.lock().foreground = None;
    }

    pub fn set_current(&self, index: usize) {
        let mut s = self.lock();
        s.current = s.desktops[index];
    }

    /// Allow only `n` more successful creations.
    pub fn limit_creations(&self, n: usize) {
        self.lock().create_budget = Some(n);
    }

    pub fn mark_unmovable(&self, window: WindowHandle) {
        self.lock().unmovable.insert(window);
    }

    pub fn fail_switches(&self) {
        self.lock().fail_switch = true;
    }

    pub fn fail_moves(&self) {
        self.lock().fail_move = true;
    }

    pub fn go_offline(&self) {
        self.lock().unavailable = true;
    }

    //  Observations

    pub fn desktop_count(&self) -> usize {
        self.lock().desktops.len()
    }

    pub fn desktop_ids(&self) -> Vec<u32> {
        self.lock().desktops.clone()
    }

    pub fn current_index(&self) -> Option<usize> {
        let s = self.lock();
        s.desktops.iter().position(|&id| id == s.current)
    }

    pub fn window_index(&self, window: WindowHandle) -> Option<usize> {
        let s = self.lock();
        let id = s.windows.get(&window)?;
        s.desktops.iter().position(|d| d == id)
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of calls that started while another call was still running.
    pub fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }

    //  Internals

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn enter(&self, call: String) -> Result<CallGuard<'_>, DesktopError> {
        if self.in_call.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        let guard = CallGuard {
            in_call: &self.in_call,
        };
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let mut s = self.lock();
        s.calls.push(call);
        if s.unavailable {
            return Err(DesktopError::ServiceUnavailable("fake is offline".into()));
        }
        Ok(guard)
    }
}

impl DesktopService for FakeDesktops {
    type Desktop = u32;
    type View = WindowHandle;

    fn count(&self) -> Result<usize, DesktopError> {
        let _g = self.enter("count".into())?;
        Ok(self.lock().desktops.len())
    }

    fn create_desktop(&self) -> Result<u32, DesktopError> {
        let _g = self.enter("create".into())?;
        let mut s = self.lock();
        match s.create_budget {
            Some(0) => {
                return Err(DesktopError::ServiceUnavailable(
                    "desktop limit reached".into(),
                ))
            }
            Some(ref mut n) => *n -= 1,
            None => {}
        }
        s.next_id += 1;
        let id = s.next_id;
        s.desktops.push(id);
        Ok(id)
    }

    fn desktop_at(&self, index: usize) -> Result<u32, DesktopError> {
        let _g = self.enter(format!("desktop_at({})", index))?;
        let s = self.lock();
        s.desktops
            .get(index)
            .copied()
            .ok_or(DesktopError::IndexOutOfRange {
                index,
                count: s.desktops.len(),
            })
    }

    fn current_desktop(&self) -> Result<u32, DesktopError> {
        let _g = self.enter("current".into())?;
        Ok(self.lock().current)
    }

    fn adjacent_desktop(&self, desktop: &u32, direction: Direction) -> Result<u32, DesktopError> {
        let _g = self.enter(format!("adjacent({}, {})", desktop, direction))?;
        let s = self.lock();
        let pos = s
            .desktops
            .iter()
            .position(|d| d == desktop)
            .ok_or_else(|| DesktopError::NavigationFailed(format!("unknown desktop {}", desktop)))?;
        let neighbour = match direction {
            Direction::Left => pos.checked_sub(1),
            Direction::Right => Some(pos + 1).filter(|&p| p < s.desktops.len()),
        };
        neighbour
            .map(|p| s.desktops[p])
            .ok_or(DesktopError::NoAdjacentDesktop(direction))
    }

    fn switch_to(&self, desktop: &u32) -> Result<(), DesktopError> {
        let _g = self.enter(format!("switch_to({})", desktop))?;
        let mut s = self.lock();
        if s.fail_switch {
            return Err(DesktopError::ServiceUnavailable("switch rejected".into()));
        }
        s.current = *desktop;
        Ok(())
    }

    fn foreground_window(&self) -> Result<Option<WindowHandle>, DesktopError> {
        let _g = self.enter("foreground".into())?;
        Ok(self.lock().foreground)
    }

    fn view_for_window(&self, window: WindowHandle) -> Result<WindowHandle, DesktopError> {
        let _g = self.enter(format!("view({})", window))?;
        if self.lock().unmovable.contains(&window) {
            return Err(DesktopError::WindowNotMovable(window));
        }
        Ok(window)
    }

    fn move_window(&self, view: &WindowHandle, desktop: &u32) -> Result<(), DesktopError> {
        let _g = self.enter(format!("move({}, {})", view, desktop))?;
        let mut s = self.lock();
        if s.fail_move {
            return Err(DesktopError::WindowNotMovable(*view));
        }
        s.windows.insert(*view, *desktop);
        Ok(())
    }
}
