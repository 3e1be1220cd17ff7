//! Entry point for the **deskshift** daemon.
//!
//! Acquires the desktop service on the main thread, spawns the keyboard
//! hook on a background thread, and executes intents on the main thread
//! until the hook shuts down.

#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use deskshift::config::{self, Config};
use deskshift::logging;
use std::fs::File;
use std::path::Path;

//  Main

fn main() {
    let dir = config::user_config_dir();
    logging::init(dir.as_deref().and_then(log_file));
    let config = match &dir {
        Some(dir) => Config::load_or_default(&dir.join("config.json")),
        None => {
            log::info!("no per-user config directory, using defaults");
            Config::default()
        }
    };
    run(config);
}

/// Release builds on Windows have no console, so they log to a file.
fn log_file(dir: &Path) -> Option<File> {
    if !cfg!(all(windows, not(debug_assertions))) {
        return None;
    }
    logging::open_log_file(dir).ok()
}

#[cfg(windows)]
fn run(config: Config) {
    use deskshift::dispatcher::{intent_channel, Dispatcher};
    use deskshift::navigator::Navigator;
    use deskshift::win32::instance::SingleInstance;
    use deskshift::win32::service::ComDesktopService;
    use log::{error, info};

    let _instance = match SingleInstance::acquire("Local\\deskshift-single-instance") {
        Ok(Some(guard)) => guard,
        Ok(None) => {
            info!("deskshift is already running");
            return;
        }
        Err(e) => {
            error!("failed to create instance mutex: {}", e);
            std::process::exit(1);
        }
    };

    let service = match ComDesktopService::connect(&config.service) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to acquire the virtual desktop service: {}", e);
            std::process::exit(1);
        }
    };

    log_shortcuts();

    let (tx, rx) = intent_channel(config.dispatcher.queue_capacity);
    spawn_intent_sources(tx);

    let mut dispatcher = Dispatcher::new(Navigator::new(service));
    dispatcher.run(rx);
}

#[cfg(not(windows))]
fn run(_config: Config) {
    log::error!("deskshift needs the Windows virtual desktop service");
    std::process::exit(1);
}

//  Helpers

#[cfg(windows)]
fn log_shortcuts() {
    use log::info;

    info!("deskshift running:");
    info!("  [Win + 1..9]         switch to desktop");
    info!("  [Win + Alt + 1..9]   move window and switch");
    info!("  [Win + Shift + </>]  move window left/right (creates on the right)");
}

#[cfg(windows)]
fn spawn_intent_sources(tx: deskshift::dispatcher::IntentSender) {
    use deskshift::traits::IntentSource;
    use deskshift::win32::hook::KeyboardHook;
    use log::error;

    std::thread::spawn(move || {
        let mut source = KeyboardHook::new();
        if let Err(e) = source.run(tx) {
            error!("keyboard hook error: {}", e);
        }
    });
}
