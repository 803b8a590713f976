//! Process-wide logger
//!
//! A single shared [`Logger`] for applications that do not want to pass one
//! around. It is built on first use from the default configuration unless
//! [`init`] installed one earlier. [`set_path`] and [`set_days`] reconfigure
//! the default channel; its writers are rebuilt on the next write.
//!
//! ```no_run
//! use rust_log_facade::{global, LoggingConfig};
//!
//! global::init(LoggingConfig::new().with_default("app"));
//! global::info("service started");
//! global::set_days(30);
//! global::warning("retention changed");
//! ```

use crate::core::{
    ChannelConfig, Driver, LogContext, LogLevel, Logger, LoggingConfig, Result, ToLogLevel,
};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    GLOBAL.get_or_init(|| RwLock::new(Arc::new(Logger::default())))
}

/// Install a logger built from `config`, replacing any previous one
pub fn init(config: LoggingConfig) -> Arc<Logger> {
    install(Logger::new(config))
}

/// Install an already built logger
pub fn install(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    *slot().write() = Arc::clone(&logger);
    logger
}

/// The shared logger, built with the default configuration on first use
pub fn logger() -> Arc<Logger> {
    Arc::clone(&slot().read())
}

/// Write the default channel's log file to `path` from now on
///
/// A stack default channel has no file of its own; the call is refused with a
/// warning on stderr and the logger is left as it was.
pub fn set_path(path: impl Into<PathBuf>) {
    let path = path.into();
    reconfigure_default_channel("path", |record| record.path = Some(path));
}

/// Keep `days` dated files for the default channel
///
/// A default channel using the `single` driver switches to `daily`, since
/// retention only applies to rotated files. A stack default channel is
/// refused like in [`set_path`].
pub fn set_days(days: usize) {
    reconfigure_default_channel("days", |record| {
        if record.driver() == Driver::Single {
            record.driver = Some(Driver::Daily.as_str().to_string());
        }
        record.days = Some(days);
    });
}

fn reconfigure_default_channel(setting: &str, update: impl FnOnce(&mut ChannelConfig)) {
    let mut current = slot().write();
    let mut config = current.config().clone();
    let channel = config.default_channel().to_string();

    let mut record = config.channel_or_default(&channel);
    if record.driver() == Driver::Stack {
        eprintln!(
            "[LOGGER WARNING] Cannot set {} on stack channel '{}'; set it on its member channels",
            setting, channel
        );
        return;
    }
    update(&mut record);
    config.channels.insert(channel, record);

    let rebuilt = current.reconfigured(config);
    *current = Arc::new(rebuilt);
}

pub fn write<L: ToLogLevel>(
    level: L,
    message: impl Into<String>,
    context: LogContext,
    channel: Option<&str>,
) -> Result<()> {
    logger().write(level, message, context, channel)
}

/// Make `name` the current channel of the shared logger
pub fn channel(name: &str) -> Result<()> {
    logger().channel(name).map(|_| ())
}

pub fn log<L: ToLogLevel>(level: L, message: impl Into<String>) {
    logger().log(level, message);
}

pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message);
}

pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message);
}

pub fn notice(message: impl Into<String>) {
    log(LogLevel::Notice, message);
}

pub fn warning(message: impl Into<String>) {
    log(LogLevel::Warning, message);
}

pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message);
}

pub fn critical(message: impl Into<String>) {
    log(LogLevel::Critical, message);
}

pub fn alert(message: impl Into<String>) {
    log(LogLevel::Alert, message);
}

pub fn emergency(message: impl Into<String>) {
    log(LogLevel::Emergency, message);
}
