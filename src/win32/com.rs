//! Private COM interfaces of the Windows shell's virtual desktop service.
//!
//! None of these are in the public SDK.  The layouts and GUIDs match
//! Windows 11 24H2 (build 26100 and later); older builds use different
//! identifiers and vtables.  Methods are declared in vtable order even when
//! unused, because only their position matters.

#![allow(non_snake_case)]

use std::ffi::c_void;
use windows::core::{interface, IUnknown, IUnknown_Vtbl, GUID, HRESULT};
use windows::Win32::Foundation::{BOOL, HWND};
use windows::Win32::UI::Shell::Common::IObjectArray;

pub const CLSID_IMMERSIVE_SHELL: GUID = GUID::from_u128(0xC2F03A33_21F5_47FA_B4BB_156362A2F239);

pub const CLSID_VIRTUAL_DESKTOP_MANAGER_INTERNAL: GUID =
    GUID::from_u128(0xC5E0CDCA_7B6E_41B2_9FC4_D93975CC467B);

#[interface("372E1D3B-38D3-42E4-A15B-8AB2B178F513")]
pub unsafe trait IApplicationView: IUnknown {}

#[interface("3F07F4BE-B107-441A-AF0F-39D82529072C")]
pub unsafe trait IVirtualDesktop: IUnknown {
    pub unsafe fn IsViewVisible(&self, view: *mut c_void, visible: *mut BOOL) -> HRESULT;
    pub unsafe fn GetID(&self, id: *mut GUID) -> HRESULT;
    pub unsafe fn GetName(&self, name: *mut *mut c_void) -> HRESULT;
    pub unsafe fn GetWallpaperPath(&self, path: *mut *mut c_void) -> HRESULT;
    pub unsafe fn IsRemote(&self, remote: *mut BOOL) -> HRESULT;
}

#[interface("53F5CA0B-158F-4124-900C-057158060B27")]
pub unsafe trait IVirtualDesktopManagerInternal: IUnknown {
    pub unsafe fn GetCount(&self, count: *mut u32) -> HRESULT;
    pub unsafe fn MoveViewToDesktop(&self, view: *mut c_void, desktop: *mut c_void) -> HRESULT;
    pub unsafe fn CanViewMoveToDesktop(&self, view: *mut c_void, can_move: *mut BOOL) -> HRESULT;
    pub unsafe fn GetCurrentDesktop(&self, desktop: *mut Option<IVirtualDesktop>) -> HRESULT;
    pub unsafe fn GetDesktops(&self, desktops: *mut Option<IObjectArray>) -> HRESULT;
    pub unsafe fn GetAdjacentDesktop(
        &self,
        desktop: *mut c_void,
        direction: i32,
        adjacent: *mut Option<IVirtualDesktop>,
    ) -> HRESULT;
    pub unsafe fn SwitchDesktop(&self, desktop: *mut c_void) -> HRESULT;
    pub unsafe fn SwitchDesktopAndMoveForegroundView(&self, desktop: *mut c_void) -> HRESULT;
    pub unsafe fn CreateDesktop(&self, desktop: *mut Option<IVirtualDesktop>) -> HRESULT;
    pub unsafe fn MoveDesktop(&self, desktop: *mut c_void, index: i32) -> HRESULT;
    pub unsafe fn RemoveDesktop(&self, desktop: *mut c_void, fallback: *mut c_void) -> HRESULT;
    pub unsafe fn FindDesktop(&self, id: *const GUID, desktop: *mut Option<IVirtualDesktop>)
        -> HRESULT;
}

#[interface("1841C6D7-4F9D-42C0-AF41-8747538F10E5")]
pub unsafe trait IApplicationViewCollection: IUnknown {
    pub unsafe fn GetViews(&self, views: *mut Option<IObjectArray>) -> HRESULT;
    pub unsafe fn GetViewsByZOrder(&self, views: *mut Option<IObjectArray>) -> HRESULT;
    pub unsafe fn GetViewsByAppUserModelId(
        &self,
        id: *const u16,
        views: *mut Option<IObjectArray>,
    ) -> HRESULT;
    pub unsafe fn GetViewForHwnd(&self, hwnd: HWND, view: *mut Option<IApplicationView>) -> HRESULT;
    pub unsafe fn GetViewForApplication(
        &self,
        application: *mut c_void,
        view: *mut Option<IApplicationView>,
    ) -> HRESULT;
    pub unsafe fn GetViewForAppUserModelId(
        &self,
        id: *const u16,
        view: *mut Option<IApplicationView>,
    ) -> HRESULT;
    pub unsafe fn GetViewInFocus(&self, view: *mut Option<IApplicationView>) -> HRESULT;
    pub unsafe fn Unknown1(&self, view: *mut Option<IApplicationView>) -> HRESULT;
    pub unsafe fn RefreshCollection(&self) -> HRESULT;
    pub unsafe fn RegisterForApplicationViewChanges(
        &self,
        listener: *mut c_void,
        cookie: *mut u32,
    ) -> HRESULT;
    pub unsafe fn UnregisterForApplicationViewChanges(&self, cookie: u32) -> HRESULT;
}
