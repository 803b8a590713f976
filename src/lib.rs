//! # Rust Log Facade
//!
//! A configuration-driven logging facade. Application code writes to named
//! channels; each channel is resolved once, from configuration, into a set of
//! physical writers and cached for later writes.
//!
//! ## Features
//!
//! - **Channels**: `single` file, `daily` rotated file, `stderr`, `syslog` and
//!   `stack` (a channel aggregating the writers of other channels)
//! - **Fail-open**: unknown levels, drivers and broken configuration fall back
//!   to sensible defaults instead of failing the caller
//! - **Events**: optional observers notified before and after each write
//! - **Thread Safe**: channels are built once even under concurrent first use
//!
//! ## Example
//!
//! ```
//! use rust_log_facade::prelude::*;
//!
//! let dir = std::env::temp_dir().join("rust_log_facade_doc");
//! let config = LoggingConfig::new()
//!     .with_default("app")
//!     .with_storage_path(&dir)
//!     .with_console_mirror(ConsoleMirror::Never)
//!     .with_channel("app", ChannelConfig::stack(["file", "errors"]))
//!     .with_channel("file", ChannelConfig::daily(7).with_level("info"))
//!     .with_channel("errors", ChannelConfig::stderr().with_level("error"));
//!
//! let logger = Logger::new(config);
//! logger.info("application started");
//! logger.write("error", "disk almost full", LogContext::new().with_field("free_mb", 12), None)?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{DailyFileAppender, FileAppender, StderrAppender, SyslogAppender};
    pub use crate::core::{
        Appender, ChannelConfig, ChannelRegistry, ConsoleMirror, Driver, EventDispatcher,
        FieldValue, LineFormatter, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder,
        LoggerError, LoggingConfig, NoopDispatcher, Result, SinkHandle, TimestampFormat,
        ToLogLevel, WRITING_EVENT, WRITTEN_EVENT,
    };
}

pub use appenders::{DailyFileAppender, FileAppender, StderrAppender, SyslogAppender};
pub use core::{
    Appender, ChannelBuilder, ChannelConfig, ChannelRegistry, ConsoleMirror, Driver,
    EventDispatcher, FieldValue, LeveledAppender, LineFormatter, LogContext, LogEntry, LogLevel,
    Logger, LoggerBuilder, LoggerError, LoggingConfig, NoopDispatcher, Result, SinkHandle,
    TimestampFormat, ToLogLevel, WriterRef, DEFAULT_CHANNEL, DEFAULT_RETENTION_DAYS,
    DEFAULT_STORAGE_PATH, DEFAULT_SYSLOG_FACILITY, WRITING_EVENT, WRITTEN_EVENT,
};
