//! Standard error appender

use crate::core::{Appender, LogLevel, Result};
use std::io::{self, Write};

/// Writes rendered lines to the process's standard error stream
#[derive(Debug, Default)]
pub struct StderrAppender;

impl StderrAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Appender for StderrAppender {
    fn append(&mut self, line: &str, _level: LogLevel) -> Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stderr"
    }
}
