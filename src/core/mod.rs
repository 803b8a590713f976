//! Core logger types and traits

pub mod appender;
pub mod builder;
pub mod config;
pub mod error;
pub mod events;
pub mod formatter;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod registry;
pub mod sink;
pub mod timestamp;

pub use appender::Appender;
pub use builder::ChannelBuilder;
pub use config::{
    ChannelConfig, ConsoleMirror, Driver, LoggingConfig, DEFAULT_CHANNEL, DEFAULT_RETENTION_DAYS,
    DEFAULT_STORAGE_PATH, DEFAULT_SYSLOG_FACILITY,
};
pub use error::{LoggerError, Result};
pub use events::{EventDispatcher, NoopDispatcher, WRITING_EVENT, WRITTEN_EVENT};
pub use formatter::LineFormatter;
pub use log_context::{FieldValue, LogContext};
pub use log_entry::LogEntry;
pub use log_level::{LogLevel, ToLogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use registry::ChannelRegistry;
pub use sink::{LeveledAppender, SinkHandle, WriterRef};
pub use timestamp::TimestampFormat;
