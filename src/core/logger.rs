//! Logging facade
//!
//! [`Logger`] is the public write API. Each write resolves its target channel
//! (explicit argument, else the channel most recently built or selected, else
//! the configured default), notifies the event dispatcher, hands the entry to
//! the channel's writers and, in an interactive session, mirrors the raw
//! message to standard output.

use super::{
    config::{ConsoleMirror, LoggingConfig},
    error::Result,
    events::{dispatch_quietly, EventDispatcher, NoopDispatcher, WRITING_EVENT, WRITTEN_EVENT},
    formatter::LineFormatter,
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::{LogLevel, ToLogLevel},
    registry::ChannelRegistry,
    sink::SinkHandle,
    timestamp::TimestampFormat,
};
use chrono::{Local, SecondsFormat, Utc};
use serde_json::json;
use std::io::IsTerminal;
use std::sync::Arc;

pub struct Logger {
    registry: ChannelRegistry,
    dispatcher: Arc<dyn EventDispatcher>,
    mirror_to_stdout: bool,
}

impl Logger {
    #[must_use]
    pub fn new(config: LoggingConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_log_facade::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .config(LoggingConfig::new().with_default("errors"))
    ///     .dispatcher(NoopDispatcher)
    ///     .build();
    /// assert_eq!(logger.default_channel(), "errors");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &LoggingConfig {
        self.registry.config()
    }

    pub fn default_channel(&self) -> &str {
        self.registry.config().default_channel()
    }

    /// Channel a write without an explicit channel goes to
    pub fn current_channel(&self) -> String {
        self.registry
            .last_resolved()
            .unwrap_or_else(|| self.default_channel().to_string())
    }

    pub fn mirrors_to_stdout(&self) -> bool {
        self.mirror_to_stdout
    }

    /// Resolve a channel's sink, building it on first use
    pub fn get(&self, channel: &str) -> Result<Arc<SinkHandle>> {
        self.registry.get(channel)
    }

    /// Make `name` the ambient channel for writes that name none
    ///
    /// Returns `self` so a write can be chained:
    ///
    /// ```no_run
    /// # use rust_log_facade::prelude::*;
    /// # let logger = Logger::new(LoggingConfig::new());
    /// logger.channel("audit")?.info("user deleted");
    /// # Ok::<(), LoggerError>(())
    /// ```
    pub fn channel(&self, name: &str) -> Result<&Self> {
        self.registry.get(name)?;
        self.registry.set_last_resolved(name);
        Ok(self)
    }

    /// Drop cached sinks so they are rebuilt on next use
    pub fn invalidate(&self, channel: Option<&str>) {
        self.registry.invalidate(channel);
    }

    pub fn flush(&self) -> Result<()> {
        self.registry.flush()
    }

    /// New facade over `config` with this one's dispatcher, formatter,
    /// console mirror and current channel. Cached sinks do not carry over.
    #[must_use]
    pub fn reconfigured(&self, config: LoggingConfig) -> Logger {
        let registry = ChannelRegistry::with_formatter(config, self.registry.formatter().clone());
        if let Some(channel) = self.registry.last_resolved() {
            registry.set_last_resolved(channel);
        }

        Logger {
            registry,
            dispatcher: Arc::clone(&self.dispatcher),
            mirror_to_stdout: self.mirror_to_stdout,
        }
    }

    /// Write one message
    ///
    /// Writer failures are returned once every writer of the channel has been
    /// tried; the console mirror and the `logging.written` event are skipped
    /// for a failed write. The mirror ignores channel levels, so a message
    /// filtered out by every writer is still echoed. Dispatcher failures are
    /// ignored.
    pub fn write<L: ToLogLevel>(
        &self,
        level: L,
        message: impl Into<String>,
        context: LogContext,
        channel: Option<&str>,
    ) -> Result<()> {
        let channel = match channel {
            Some(name) => name.to_string(),
            None => self.current_channel(),
        };
        let sink = self.registry.get(&channel)?;
        let level = level.to_log_level();
        let message = message.into();

        let mut payload = json!({
            "channel": channel,
            "level": level.to_str(),
            "message": message,
            "context": context.to_json_value(),
        });
        dispatch_quietly(self.dispatcher.as_ref(), WRITING_EVENT, &payload);

        let entry = LogEntry::new(sink.name(), level, message).with_context(context);
        sink.emit(&entry)?;

        if self.mirror_to_stdout {
            println!(
                "[{}] {}",
                TimestampFormat::Standard.format(&Local::now()),
                entry.message
            );
        }

        payload["time"] = json!(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false));
        dispatch_quietly(self.dispatcher.as_ref(), WRITTEN_EVENT, &payload);
        Ok(())
    }

    pub fn log<L: ToLogLevel>(&self, level: L, message: impl Into<String>) {
        self.log_with_context(level, message, LogContext::new());
    }

    /// Log with structured context fields
    pub fn log_with_context<L: ToLogLevel>(
        &self,
        level: L,
        message: impl Into<String>,
        context: LogContext,
    ) {
        if let Err(e) = self.write(level, message, context, None) {
            eprintln!("[LOGGER ERROR] Failed to write log entry: {}", e);
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn notice(&self, message: impl Into<String>) {
        self.log(LogLevel::Notice, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    #[inline]
    pub fn alert(&self, message: impl Into<String>) {
        self.log(LogLevel::Alert, message);
    }

    #[inline]
    pub fn emergency(&self, message: impl Into<String>) {
        self.log(LogLevel::Emergency, message);
    }

    /// Helper for structured info logging
    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    /// Helper for structured error logging
    pub fn error_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Error, message, context);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    config: LoggingConfig,
    formatter: LineFormatter,
    dispatcher: Arc<dyn EventDispatcher>,
    mirror_to_stdout: Option<bool>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggingConfig::default(),
            formatter: LineFormatter::new(),
            dispatcher: Arc::new(NoopDispatcher),
            mirror_to_stdout: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggingConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Receive `logging.writing` / `logging.written` notifications
    #[must_use = "builder methods return a new value"]
    pub fn dispatcher<D: EventDispatcher + 'static>(mut self, dispatcher: D) -> Self {
        self.dispatcher = Arc::new(dispatcher);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_dispatcher(mut self, dispatcher: Arc<dyn EventDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Override the configured console mirror
    #[must_use = "builder methods return a new value"]
    pub fn mirror_to_stdout(mut self, enabled: bool) -> Self {
        self.mirror_to_stdout = Some(enabled);
        self
    }

    pub fn build(self) -> Logger {
        let mirror_to_stdout = self
            .mirror_to_stdout
            .unwrap_or_else(|| match self.config.console_mirror {
                ConsoleMirror::Always => true,
                ConsoleMirror::Never => false,
                ConsoleMirror::Auto => std::io::stdout().is_terminal(),
            });

        Logger {
            registry: ChannelRegistry::with_formatter(self.config, self.formatter),
            dispatcher: self.dispatcher,
            mirror_to_stdout,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
