//! Low-level keyboard hook [`IntentSource`].
//!
//! Installs a `WH_KEYBOARD_LL` hook and pumps messages on the calling
//! thread, which is where Windows delivers the hook callbacks.  The callback
//! classifies each key-down with a fresh modifier snapshot and, on a match,
//! queues the intent without blocking and swallows the keystroke.  It never
//! touches the desktop service and never logs: a failed handoff is only
//! counted, and the dispatcher reports it.

use crate::classifier::{classify_event, KeyEvent, Modifiers};
use crate::dispatcher::IntentSender;
use crate::traits::IntentSource;
use log::{info, warn};
use std::cell::RefCell;
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, VIRTUAL_KEY, VK_LWIN, VK_MENU, VK_RWIN, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, SetWindowsHookExW, TranslateMessage,
    UnhookWindowsHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, MSG, WH_KEYBOARD_LL, WM_KEYDOWN,
    WM_SYSKEYDOWN,
};

thread_local! {
    // The hook procedure cannot capture, and it runs on the installing
    // thread, so the sink lives here for the duration of `run`.
    static SINK: RefCell<Option<IntentSender>> = const { RefCell::new(None) };
}

/// Errors that can occur while running the keyboard hook.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("failed to install keyboard hook: {0}")]
    Install(windows::core::Error),
    #[error("message loop failed: {0}")]
    MessageLoop(windows::core::Error),
}

/// System-wide keyboard tap.
#[derive(Debug, Default)]
pub struct KeyboardHook;

impl KeyboardHook {
    pub fn new() -> Self {
        Self
    }
}

/// Unhooks on drop.
struct Installed(HHOOK);

impl Drop for Installed {
    fn drop(&mut self) {
        if let Err(e) = unsafe { UnhookWindowsHookEx(self.0) } {
            warn!("failed to remove keyboard hook: {}", e);
        }
    }
}

impl IntentSource for KeyboardHook {
    type Error = HookError;

    /// Install the hook and pump messages until `WM_QUIT`.
    ///
    /// This method **blocks**.  Run it on a dedicated thread.
    fn run(&mut self, sink: IntentSender) -> Result<(), HookError> {
        SINK.with(|s| *s.borrow_mut() = Some(sink));

        let module = unsafe { GetModuleHandleW(None) }.map_err(HookError::Install)?;
        let hook = unsafe {
            SetWindowsHookExW(
                WH_KEYBOARD_LL,
                Some(keyboard_proc),
                HINSTANCE::from(module),
                0,
            )
        }
        .map_err(HookError::Install)?;
        let _installed = Installed(hook);
        info!("keyboard hook installed");

        let result = pump_messages();
        SINK.with(|s| s.borrow_mut().take());
        result
    }
}

fn pump_messages() -> Result<(), HookError> {
    let mut msg = MSG::default();
    loop {
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };
        match ret.0 {
            0 => return Ok(()),
            -1 => return Err(HookError::MessageLoop(windows::core::Error::from_win32())),
            _ => unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }
}

fn is_down(key: VIRTUAL_KEY) -> bool {
    let state = unsafe { GetAsyncKeyState(i32::from(key.0)) };
    (state as u16) & 0x8000 != 0
}

fn modifier_snapshot() -> Modifiers {
    Modifiers {
        primary: is_down(VK_LWIN) || is_down(VK_RWIN),
        shift: is_down(VK_SHIFT),
        alt: is_down(VK_MENU),
    }
}

/// Must return quickly: Windows drops hooks that stall the input queue.
unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        let message = wparam.0 as u32;
        let info = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
        let event = KeyEvent {
            key_code: info.vkCode,
            is_key_down: message == WM_KEYDOWN || message == WM_SYSKEYDOWN,
            timestamp: info.time,
        };
        if let Some(intent) = classify_event(&event, modifier_snapshot()) {
            SINK.with(|s| {
                if let Some(sink) = s.borrow().as_ref() {
                    let _ = sink.try_send(intent);
                }
            });
            return LRESULT(1);
        }
    }
    CallNextHookEx(HHOOK::default(), code, wparam, lparam)
}
