//! Resolved channel sinks
//!
//! A [`SinkHandle`] is what a channel name resolves to: a display name, the
//! driver that built it and an ordered list of [`WriterRef`]s. Stack sinks hold
//! clones of their members' writer references, so one physical writer can be
//! reachable from several handles while being opened and closed exactly once.

use super::{
    appender::Appender,
    config::Driver,
    error::{LoggerError, Result},
    formatter::LineFormatter,
    log_entry::LogEntry,
    log_level::LogLevel,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A physical writer together with its own minimum level
///
/// The mutex serializes appends, so lines from concurrent writers never
/// interleave inside one destination.
pub struct LeveledAppender {
    min_level: LogLevel,
    appender: Mutex<Box<dyn Appender>>,
}

pub type WriterRef = Arc<LeveledAppender>;

impl LeveledAppender {
    pub fn new(appender: Box<dyn Appender>, min_level: LogLevel) -> Self {
        Self {
            min_level,
            appender: Mutex::new(appender),
        }
    }

    pub fn shared(appender: impl Appender + 'static, min_level: LogLevel) -> WriterRef {
        Arc::new(Self::new(Box::new(appender), min_level))
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn appender_name(&self) -> String {
        self.appender.lock().name().to_string()
    }

    /// Write one rendered line, dropping it silently below the minimum level
    ///
    /// Returns whether the line reached the appender.
    pub fn write(&self, line: &str, level: LogLevel) -> Result<bool> {
        if !self.accepts(level) {
            return Ok(false);
        }
        let mut appender = self.appender.lock();
        appender.append(line, level)?;
        Ok(true)
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }
}

impl fmt::Debug for LeveledAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeveledAppender")
            .field("min_level", &self.min_level)
            .field("appender", &self.appender_name())
            .finish()
    }
}

/// A channel's resolved, ready-to-write sink
#[derive(Debug)]
pub struct SinkHandle {
    name: String,
    driver: Driver,
    min_level: LogLevel,
    writers: Vec<WriterRef>,
    members: Vec<String>,
    formatter: Arc<LineFormatter>,
}

impl SinkHandle {
    pub fn new(
        name: impl Into<String>,
        driver: Driver,
        min_level: LogLevel,
        formatter: Arc<LineFormatter>,
    ) -> Self {
        Self {
            name: name.into(),
            driver,
            min_level,
            writers: Vec::new(),
            members: Vec::new(),
            formatter,
        }
    }

    /// Attach a writer this handle constructed
    pub fn push_writer(&mut self, writer: WriterRef) {
        self.writers.push(writer);
    }

    /// Re-export every writer of a member channel, in order
    pub fn push_member(&mut self, member: &str, handle: &SinkHandle) {
        self.members.push(member.to_string());
        self.writers.extend(handle.writers.iter().cloned());
    }

    /// Name printed in rendered lines
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn writers(&self) -> &[WriterRef] {
        &self.writers
    }

    /// Member channels of a stack sink (empty for every other driver)
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn formatter(&self) -> &LineFormatter {
        &self.formatter
    }

    /// Render the entry once and hand it to every writer
    ///
    /// Every writer is attempted even when an earlier one fails; the first
    /// failure is returned. Returns how many writers accepted the entry.
    pub fn emit(&self, entry: &LogEntry) -> Result<usize> {
        if !self.writers.iter().any(|w| w.accepts(entry.level)) {
            return Ok(0);
        }

        let line = self.formatter.format(entry);
        let mut written = 0;
        let mut first_error: Option<LoggerError> = None;

        for writer in &self.writers {
            match writer.write(&line, entry.level) {
                Ok(true) => written += 1,
                Ok(false) => {}
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(written),
        }
    }

    pub fn flush(&self) -> Result<()> {
        for writer in &self.writers {
            writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Appender that records lines in memory
    pub(crate) struct MemoryAppender {
        pub(crate) lines: Arc<Mutex<Vec<String>>>,
        pub(crate) fail: bool,
    }

    impl MemoryAppender {
        pub(crate) fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
            let lines = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    lines: Arc::clone(&lines),
                    fail: false,
                },
                lines,
            )
        }

        pub(crate) fn failing() -> Self {
            Self {
                lines: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }
        }
    }

    impl Appender for MemoryAppender {
        fn append(&mut self, line: &str, _level: LogLevel) -> Result<()> {
            if self.fail {
                return Err(LoggerError::writer("disk full"));
            }
            self.lines.lock().push(line.to_string());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    fn handle() -> SinkHandle {
        SinkHandle::new("app", Driver::Single, LogLevel::Debug, LineFormatter::new().shared())
    }

    #[test]
    fn test_writer_filters_below_its_own_level() {
        let (appender, lines) = MemoryAppender::new();
        let writer = LeveledAppender::shared(appender, LogLevel::Warning);

        assert!(!writer.write("debug line\n", LogLevel::Debug).unwrap());
        assert!(writer.write("error line\n", LogLevel::Error).unwrap());
        assert_eq!(lines.lock().as_slice(), ["error line\n"]);
    }

    #[test]
    fn test_emit_renders_with_handle_name() {
        let (appender, lines) = MemoryAppender::new();
        let mut sink = handle();
        sink.push_writer(LeveledAppender::shared(appender, LogLevel::Debug));

        let written = sink
            .emit(&LogEntry::new(sink.name(), LogLevel::Info, "hello"))
            .unwrap();
        assert_eq!(written, 1);
        assert!(lines.lock()[0].contains("app.INFO: hello [] []"));
    }

    #[test]
    fn test_emit_attempts_all_writers_and_reports_first_error() {
        let (appender, lines) = MemoryAppender::new();
        let mut sink = handle();
        sink.push_writer(LeveledAppender::shared(MemoryAppender::failing(), LogLevel::Debug));
        sink.push_writer(LeveledAppender::shared(appender, LogLevel::Debug));

        let result = sink.emit(&LogEntry::new("app", LogLevel::Error, "boom"));
        assert!(matches!(result, Err(LoggerError::WriterError(_))));
        assert_eq!(lines.lock().len(), 1);
    }

    #[test]
    fn test_push_member_shares_writer_references() {
        let (appender, _) = MemoryAppender::new();
        let mut child = handle();
        child.push_writer(LeveledAppender::shared(appender, LogLevel::Info));

        let mut stack = SinkHandle::new(
            "stack",
            Driver::Stack,
            LogLevel::Debug,
            LineFormatter::new().shared(),
        );
        stack.push_member("app", &child);

        assert_eq!(stack.members(), ["app".to_string()]);
        assert!(Arc::ptr_eq(&stack.writers()[0], &child.writers()[0]));
    }
}
