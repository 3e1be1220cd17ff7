//! **deskshift** — keyboard-driven virtual desktop navigation.
//!
//! Global shortcuts switch the visible virtual desktop by index, or carry the
//! focused window to another desktop and follow it.  Desktops are created on
//! demand: asking for desktop 6 when only 3 exist appends the missing ones,
//! and moving a window right from the last desktop appends a new one.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::DesktopService`] — abstracts the platform's desktop
//!   collection so the navigation logic is not coupled to any specific OS
//!   service.
//! * [`traits::IntentSource`] — abstracts the input mechanism that produces
//!   intents (a global keyboard hook, a test harness, …).
//!
//! Input is classified on the OS callback thread by [`classifier`], handed
//! over a FIFO to the [`dispatcher::Dispatcher`], and executed one intent at
//! a time by the [`navigator::Navigator`] with help from [`resolver`].
//!
//! Concrete Windows implementations live in `win32` (compiled on Windows
//! only).

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod intent;
pub mod logging;
pub mod navigator;
pub mod resolver;
pub mod traits;

#[cfg(windows)]
pub mod win32;

#[cfg(test)]
pub(crate) mod testing;
