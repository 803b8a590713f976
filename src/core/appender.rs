//! Appender trait for physical log destinations

use super::{error::Result, log_level::LogLevel};

/// A physical writer that persists already-rendered lines
pub trait Appender: Send + Sync {
    fn append(&mut self, line: &str, level: LogLevel) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
