//! Process-wide file logger for the running log.
//!
//! Records go through the `log` facade and are appended to a single file as
//! `[timestamp: level: module]: message`.

use std::path::Path;

use log::LevelFilter;
use log4rs::{
    Config, Handle,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

use crate::config::create_directories;
use crate::errors::ConfigError;

/// Directory and file name of the running log.
pub const LOGS_DIR: &str = "logs";
pub const RUNNING_LOG_FILE: &str = "running_logs.log";

/// Line layout of the running log.
pub const LOG_PATTERN: &str = "[{d(%Y-%m-%d %H:%M:%S,%3f)}: {l}: {M}]: {m}{n}";

const APPENDER: &str = "running_logs";

/// Installs the global logger appending to `file_path` at `info` level.
///
/// The parent directory is created first. Fails if a logger is already set.
pub fn install_file_logger(file_path: &Path) -> Result<Handle, ConfigError> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_directories(&[parent])?;
    }

    let appender = FileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(file_path)
        .map_err(|e| ConfigError::Logging(format!("{}: {e}", file_path.display())))?;

    let config = Config::builder()
        .appender(Appender::builder().build(APPENDER, Box::new(appender)))
        .build(Root::builder().appender(APPENDER).build(LevelFilter::Info))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    let handle = log4rs::init_config(config).map_err(|e| ConfigError::Logging(e.to_string()))?;
    update_panic_hook();

    Ok(handle)
}

/// Panics are written to the running log before the default hook runs.
fn update_panic_hook() {
    let hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        log::error!("PANIC => {}", info);
        hook(info);
    }));
}
