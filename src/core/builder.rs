//! Channel construction
//!
//! Turns one channel's configuration record into a [`SinkHandle`]. Stack
//! members are resolved through a callback supplied by the registry, so
//! members are built (and cached) before the stack that aggregates them.

use super::{
    config::{ChannelConfig, Driver, LoggingConfig, DEFAULT_SYSLOG_FACILITY},
    error::Result,
    formatter::LineFormatter,
    log_level::LogLevel,
    sink::{LeveledAppender, SinkHandle},
};
use crate::appenders::{DailyFileAppender, FileAppender, StderrAppender, SyslogAppender};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

pub struct ChannelBuilder<'a> {
    config: &'a LoggingConfig,
    formatter: &'a Arc<LineFormatter>,
}

impl<'a> ChannelBuilder<'a> {
    pub fn new(config: &'a LoggingConfig, formatter: &'a Arc<LineFormatter>) -> Self {
        Self { config, formatter }
    }

    /// Build the sink for `channel`
    ///
    /// `resolve_member` returns the (cached) sink of a stack member.
    pub fn build(
        &self,
        channel: &str,
        record: &ChannelConfig,
        resolve_member: &mut dyn FnMut(&str) -> Result<Arc<SinkHandle>>,
    ) -> Result<SinkHandle> {
        let name = record.name.clone().unwrap_or_else(|| channel.to_string());
        let level = record
            .level
            .as_deref()
            .map(LogLevel::normalize)
            .unwrap_or_else(|| self.config.default_level());
        let driver = record.driver();

        let mut handle = SinkHandle::new(&name, driver, level, Arc::clone(self.formatter));

        match driver {
            Driver::Stack => {
                let members = record
                    .channels
                    .clone()
                    .unwrap_or_else(|| self.config.implicit_stack_members());
                for member in &members {
                    let member_handle = resolve_member(member)?;
                    handle.push_member(member, &member_handle);
                }
            }
            Driver::Daily => {
                let path = self.resolve_path(record.path.as_ref(), &name);
                let appender = DailyFileAppender::new(path, record.retention_days());
                handle.push_writer(LeveledAppender::shared(appender, level));
            }
            Driver::Stderr => {
                handle.push_writer(LeveledAppender::shared(StderrAppender::new(), level));
            }
            Driver::Syslog => {
                let ident = record.ident.as_deref().unwrap_or(&name);
                let facility = record
                    .facility
                    .as_deref()
                    .unwrap_or(DEFAULT_SYSLOG_FACILITY);
                let appender = SyslogAppender::new(ident, facility);
                handle.push_writer(LeveledAppender::shared(appender, level));
            }
            Driver::Single => {
                let path = self.resolve_path(record.path.as_ref(), &name);
                handle.push_writer(LeveledAppender::shared(FileAppender::new(path), level));
            }
        }

        Ok(handle)
    }

    /// Explicit path if configured, else `<logs dir>/<name>.log`
    ///
    /// Creates the logs directory when needed. A failure here is ignored; the
    /// writer reports it on its first append.
    pub fn resolve_path(&self, path: Option<&PathBuf>, name: &str) -> PathBuf {
        if let Some(path) = path {
            return path.clone();
        }

        let logs_dir = self.config.logs_dir();
        if !logs_dir.is_dir() {
            let _ = fs::create_dir_all(&logs_dir);
        }
        logs_dir.join(format!("{}.log", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use tempfile::tempdir;

    fn no_members(name: &str) -> Result<Arc<SinkHandle>> {
        Err(LoggerError::other(format!("unexpected member {}", name)))
    }

    #[test]
    fn test_single_defaults_to_logs_dir() {
        let dir = tempdir().unwrap();
        let config = LoggingConfig::new().with_storage_path(dir.path());
        let formatter = LineFormatter::new().shared();
        let builder = ChannelBuilder::new(&config, &formatter);

        let path = builder.resolve_path(None, "app");
        assert_eq!(path, dir.path().join("logs").join("app.log"));
        assert!(dir.path().join("logs").is_dir());
    }

    #[test]
    fn test_explicit_path_is_kept() {
        let config = LoggingConfig::new();
        let formatter = LineFormatter::new().shared();
        let builder = ChannelBuilder::new(&config, &formatter);
        let explicit = PathBuf::from("/tmp/custom.log");
        assert_eq!(builder.resolve_path(Some(&explicit), "app"), explicit);
    }

    #[test]
    fn test_level_falls_back_to_root_level() {
        let dir = tempdir().unwrap();
        let config = LoggingConfig::new()
            .with_storage_path(dir.path())
            .with_level("notice");
        let formatter = LineFormatter::new().shared();
        let builder = ChannelBuilder::new(&config, &formatter);

        let handle = builder
            .build("app", &ChannelConfig::single(), &mut no_members)
            .unwrap();
        assert_eq!(handle.min_level(), LogLevel::Notice);
        assert_eq!(handle.writers()[0].min_level(), LogLevel::Notice);
    }

    #[test]
    fn test_driver_writers() {
        let dir = tempdir().unwrap();
        let config = LoggingConfig::new().with_storage_path(dir.path());
        let formatter = LineFormatter::new().shared();
        let builder = ChannelBuilder::new(&config, &formatter);

        for (record, expected) in [
            (ChannelConfig::single(), "file"),
            (ChannelConfig::daily(7), "daily"),
            (ChannelConfig::stderr(), "stderr"),
            (ChannelConfig::syslog().with_ident("svc"), "syslog"),
        ] {
            let handle = builder.build("chan", &record, &mut no_members).unwrap();
            assert_eq!(handle.writers().len(), 1);
            assert_eq!(handle.writers()[0].appender_name(), expected);
        }
    }

    #[test]
    fn test_name_override_is_used_for_handle() {
        let dir = tempdir().unwrap();
        let config = LoggingConfig::new().with_storage_path(dir.path());
        let formatter = LineFormatter::new().shared();
        let builder = ChannelBuilder::new(&config, &formatter);

        let record = ChannelConfig::single().with_name("billing");
        let handle = builder.build("payments", &record, &mut no_members).unwrap();
        assert_eq!(handle.name(), "billing");
    }

    #[test]
    fn test_stack_resolves_members_in_order() {
        let dir = tempdir().unwrap();
        let config = LoggingConfig::new().with_storage_path(dir.path());
        let formatter = LineFormatter::new().shared();
        let builder = ChannelBuilder::new(&config, &formatter);

        let mut requested = Vec::new();
        let mut resolve = |member: &str| -> Result<Arc<SinkHandle>> {
            requested.push(member.to_string());
            let handle = builder.build(member, &ChannelConfig::stderr(), &mut no_members)?;
            Ok(Arc::new(handle))
        };

        let handle = builder
            .build("all", &ChannelConfig::stack(["b", "a"]), &mut resolve)
            .unwrap();
        assert_eq!(requested, vec!["b", "a"]);
        assert_eq!(handle.members(), ["b".to_string(), "a".to_string()]);
        assert_eq!(handle.writers().len(), 2);
    }
}
