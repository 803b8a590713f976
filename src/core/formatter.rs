//! Line formatter shared by every writer
//!
//! Renders one entry as
//! `[<timestamp>] <channel>.<LEVEL>: <message> <context> <extra>` followed by a newline.

use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::log_context::LogContext;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFormatter {
    timestamp_format: TimestampFormat,
}

impl LineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Wrap this formatter in an Arc for sharing across channels
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Render the parts of one line
    ///
    /// Pure: the same inputs always give the same line.
    pub fn render<Tz>(
        &self,
        timestamp: &DateTime<Tz>,
        channel: &str,
        level: LogLevel,
        message: &str,
        context: &LogContext,
        extra: &LogContext,
    ) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format!(
            "[{}] {}.{}: {} {} {}\n",
            self.timestamp_format.format(timestamp),
            channel,
            level.to_str(),
            sanitize_message(message),
            context.to_inline(),
            extra.to_inline(),
        )
    }

    pub fn format(&self, entry: &LogEntry) -> String {
        self.render(
            &entry.timestamp,
            &entry.channel,
            entry.level,
            &entry.message,
            &entry.context,
            &entry.extra,
        )
    }
}

/// Escape line breaks and tabs so a message can never forge extra log lines
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
