//! Logger setup.
//!
//! `RUST_LOG` still controls filtering, but without it the daemon logs at
//! `info` so failed intents are visible.  Release builds on Windows run
//! without a console, so the caller can hand in a file to log to instead of
//! stderr.

use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the log file inside the config directory.
pub const LOG_FILE_NAME: &str = "deskshift.log";

/// Install the global logger, writing to `log_file` when given.
pub fn init(log_file: Option<File>) {
    if let Err(e) = builder(Env::default(), log_file).try_init() {
        eprintln!("logger already initialised: {}", e);
    }
}

/// Open (appending) the log file in `dir`, creating the directory first.
pub fn open_log_file(dir: &Path) -> std::io::Result<File> {
    std::fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}

fn builder(env: Env<'_>, log_file: Option<File>) -> Builder {
    let mut builder = Builder::from_env(env.default_filter_or(DEFAULT_FILTER));
    if let Some(file) = log_file {
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata, Record};

    // A variable nobody sets, so the default filter applies.
    fn quiet_env() -> Env<'static> {
        Env::new().filter("DESKSHIFT_TEST_FILTER_UNSET")
    }

    fn enabled(logger: &env_logger::Logger, level: Level) -> bool {
        logger.enabled(&Metadata::builder().level(level).target("deskshift").build())
    }

    #[test]
    fn info_is_enabled_by_default() {
        let logger = builder(quiet_env(), None).build();
        assert!(enabled(&logger, Level::Warn));
        assert!(enabled(&logger, Level::Info));
        assert!(!enabled(&logger, Level::Debug));
    }

    #[test]
    fn records_go_to_the_log_file() {
        let dir = std::env::temp_dir().join(format!("deskshift-log-{}", std::process::id()));
        let file = open_log_file(&dir).unwrap();
        let logger = builder(quiet_env(), Some(file)).build();

        logger.log(
            &Record::builder()
                .args(format_args!("switch to desktop 4: desktop service unavailable"))
                .level(Level::Warn)
                .target("deskshift")
                .build(),
        );
        logger.flush();

        let written = std::fs::read_to_string(dir.join(LOG_FILE_NAME)).unwrap();
        assert!(written.contains("switch to desktop 4: desktop service unavailable"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
