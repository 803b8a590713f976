//! Appender implementations

pub mod daily;
pub mod file;
pub mod stderr;
pub mod syslog;

pub use daily::DailyFileAppender;
pub use file::FileAppender;
pub use stderr::StderrAppender;
pub use syslog::SyslogAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
