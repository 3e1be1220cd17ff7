//! [`DesktopService`] implementation backed by the shell's virtual desktop
//! COM service.
//!
//! Every interface pointer the service hands out is wrapped in a `windows`
//! crate smart pointer, so it is released on every exit path, including
//! early `?` returns.  COM itself stays initialised for as long as the
//! adapter lives.

use super::com::{
    IApplicationView, IApplicationViewCollection, IVirtualDesktop,
    IVirtualDesktopManagerInternal, CLSID_IMMERSIVE_SHELL,
    CLSID_VIRTUAL_DESKTOP_MANAGER_INTERNAL,
};
use crate::config::{AdjacencyCodes, ServiceConfig};
use crate::error::DesktopError;
use crate::intent::{Direction, WindowHandle};
use crate::traits::DesktopService;
use log::debug;
use std::ffi::c_void;
use std::fmt;
use windows::core::{Interface, GUID, HRESULT};
use windows::Win32::Foundation::{BOOL, HWND};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, IServiceProvider, CLSCTX_LOCAL_SERVER,
    COINIT_APARTMENTTHREADED,
};
use windows::Win32::UI::Shell::Common::IObjectArray;
use windows::Win32::UI::WindowsAndMessaging::GetForegroundWindow;

/// Keeps COM initialised on the owning thread until dropped.
struct Apartment;

impl Apartment {
    fn enter() -> Result<Self, DesktopError> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .ok()
            .map_err(unavailable("CoInitializeEx"))?;
        Ok(Self)
    }
}

impl Drop for Apartment {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// One virtual desktop, compared by its service-assigned id.
#[derive(Clone)]
pub struct ComDesktop(IVirtualDesktop);

impl ComDesktop {
    fn id(&self) -> Option<GUID> {
        let mut id = GUID::zeroed();
        unsafe { self.0.GetID(&mut id) }.ok().ok()?;
        Some(id)
    }

    fn raw(&self) -> *mut c_void {
        self.0.as_raw()
    }
}

impl PartialEq for ComDesktop {
    fn eq(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            _ => self.raw() == other.raw(),
        }
    }
}

impl fmt::Debug for ComDesktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id() {
            Some(id) => write!(f, "Desktop({:?})", id),
            None => write!(f, "Desktop({:p})", self.raw()),
        }
    }
}

/// Application view of a window, remembering which window it came from.
pub struct ComView {
    view: IApplicationView,
    window: WindowHandle,
}

/// Shell-backed desktop service.
///
/// Must be created and used on a single thread; the dispatcher thread owns
/// it for the lifetime of the process.
pub struct ComDesktopService {
    manager: IVirtualDesktopManagerInternal,
    views: IApplicationViewCollection,
    adjacency: AdjacencyCodes,
    // Declared last so it is dropped after the interfaces above.
    _apartment: Apartment,
}

impl ComDesktopService {
    /// Initialise COM and acquire the shell's desktop manager and view
    /// collection.
    ///
    /// Failure here means the service is unreachable, which is fatal at
    /// startup.
    pub fn connect(config: &ServiceConfig) -> Result<Self, DesktopError> {
        let apartment = Apartment::enter()?;
        let shell: IServiceProvider =
            unsafe { CoCreateInstance(&CLSID_IMMERSIVE_SHELL, None, CLSCTX_LOCAL_SERVER) }
                .map_err(unavailable("ImmersiveShell"))?;
        let manager: IVirtualDesktopManagerInternal =
            unsafe { shell.QueryService(&CLSID_VIRTUAL_DESKTOP_MANAGER_INTERNAL) }
                .map_err(unavailable("IVirtualDesktopManagerInternal"))?;
        let views: IApplicationViewCollection =
            unsafe { shell.QueryService(&IApplicationViewCollection::IID) }
                .map_err(unavailable("IApplicationViewCollection"))?;
        debug!("virtual desktop service connected");
        Ok(Self {
            manager,
            views,
            adjacency: config.adjacency,
            _apartment: apartment,
        })
    }

    fn desktops(&self) -> Result<IObjectArray, DesktopError> {
        let mut array = None;
        let hr = unsafe { self.manager.GetDesktops(&mut array) };
        take("GetDesktops", hr, array)
    }

    fn collection_len(array: &IObjectArray) -> Result<usize, DesktopError> {
        let count = unsafe { array.GetCount() }.map_err(unavailable("IObjectArray::GetCount"))?;
        Ok(count as usize)
    }
}

impl DesktopService for ComDesktopService {
    type Desktop = ComDesktop;
    type View = ComView;

    fn count(&self) -> Result<usize, DesktopError> {
        Self::collection_len(&self.desktops()?)
    }

    fn create_desktop(&self) -> Result<ComDesktop, DesktopError> {
        let mut desktop = None;
        let hr = unsafe { self.manager.CreateDesktop(&mut desktop) };
        take("CreateDesktop", hr, desktop).map(ComDesktop)
    }

    fn desktop_at(&self, index: usize) -> Result<ComDesktop, DesktopError> {
        let array = self.desktops()?;
        let count = Self::collection_len(&array)?;
        if index >= count {
            return Err(DesktopError::IndexOutOfRange { index, count });
        }
        let desktop: IVirtualDesktop = unsafe { array.GetAt(index as u32) }
            .map_err(unavailable("IObjectArray::GetAt"))?;
        Ok(ComDesktop(desktop))
    }

    fn current_desktop(&self) -> Result<ComDesktop, DesktopError> {
        let mut desktop = None;
        let hr = unsafe { self.manager.GetCurrentDesktop(&mut desktop) };
        take("GetCurrentDesktop", hr, desktop).map(ComDesktop)
    }

    fn adjacent_desktop(
        &self,
        desktop: &ComDesktop,
        direction: Direction,
    ) -> Result<ComDesktop, DesktopError> {
        let code = self.adjacency.code(direction);
        let mut adjacent = None;
        let hr = unsafe { self.manager.GetAdjacentDesktop(desktop.raw(), code, &mut adjacent) };
        match (hr.ok(), adjacent) {
            (Ok(()), Some(found)) => Ok(ComDesktop(found)),
            (status, _) => {
                debug!("GetAdjacentDesktop({}) -> {:?}", code, status);
                Err(DesktopError::NoAdjacentDesktop(direction))
            }
        }
    }

    fn switch_to(&self, desktop: &ComDesktop) -> Result<(), DesktopError> {
        unsafe { self.manager.SwitchDesktop(desktop.raw()) }
            .ok()
            .map_err(unavailable("SwitchDesktop"))
    }

    fn foreground_window(&self) -> Result<Option<WindowHandle>, DesktopError> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            return Ok(None);
        }
        Ok(Some(WindowHandle(hwnd.0 as isize)))
    }

    fn view_for_window(&self, window: WindowHandle) -> Result<ComView, DesktopError> {
        let mut view = None;
        let hr = unsafe {
            self.views
                .GetViewForHwnd(HWND(window.0 as *mut c_void), &mut view)
        };
        match (hr.ok(), view) {
            (Ok(()), Some(view)) => Ok(ComView { view, window }),
            (status, _) => {
                debug!("GetViewForHwnd({}) -> {:?}", window, status);
                Err(DesktopError::WindowNotMovable(window))
            }
        }
    }

    fn move_window(&self, view: &ComView, desktop: &ComDesktop) -> Result<(), DesktopError> {
        let mut can_move = BOOL::default();
        unsafe {
            self.manager
                .CanViewMoveToDesktop(view.view.as_raw(), &mut can_move)
        }
        .ok()
        .map_err(unavailable("CanViewMoveToDesktop"))?;
        if !can_move.as_bool() {
            return Err(DesktopError::WindowNotMovable(view.window));
        }
        unsafe {
            self.manager
                .MoveViewToDesktop(view.view.as_raw(), desktop.raw())
        }
        .ok()
        .map_err(|e| {
            debug!("MoveViewToDesktop({}) -> {}", view.window, e);
            DesktopError::WindowNotMovable(view.window)
        })
    }
}

//  Helpers

fn unavailable(call: &'static str) -> impl Fn(windows::core::Error) -> DesktopError {
    move |e| DesktopError::ServiceUnavailable(format!("{}: {}", call, e))
}

/// Turn an out-parameter call into a `Result`.
fn take<T>(call: &'static str, hr: HRESULT, value: Option<T>) -> Result<T, DesktopError> {
    hr.ok().map_err(unavailable(call))?;
    value.ok_or_else(|| DesktopError::ServiceUnavailable(format!("{} returned nothing", call)))
}
