//! Windows-specific implementations.
//!
//! This module provides concrete backends for the
//! [`DesktopService`](crate::traits::DesktopService) and
//! [`IntentSource`](crate::traits::IntentSource) traits, powered by the
//! shell's virtual desktop COM service and a low-level keyboard hook.
//!
//! Nothing outside this module should reference Win32 directly.

mod com;
pub mod hook;
pub mod instance;
pub mod service;
