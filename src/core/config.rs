//! Logging configuration tree
//!
//! Every field is optional. Missing keys fall back to documented defaults and
//! malformed files fall back to the empty configuration, so configuration
//! problems never stop an application from logging.
//!
//! ```
//! use rust_log_facade::{ChannelConfig, LoggingConfig};
//!
//! let config = LoggingConfig::from_json_str(r#"{
//!     "default": "app",
//!     "level": "info",
//!     "channels": {
//!         "app": { "driver": "stack", "channels": ["file", "errors"] },
//!         "file": { "driver": "daily", "days": 7 },
//!         "errors": { "driver": "stderr", "level": "error" }
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(config.default_channel(), "app");
//! assert_eq!(config.channel("file").unwrap().retention_days(), 7);
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_CHANNEL: &str = "stack";
pub const DEFAULT_STORAGE_PATH: &str = "storage";
pub const DEFAULT_RETENTION_DAYS: usize = 14;
pub const DEFAULT_SYSLOG_FACILITY: &str = "user";

/// Strategy used to build a channel's writers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Driver {
    #[default]
    Single,
    Stack,
    Daily,
    Stderr,
    Syslog,
}

impl Driver {
    /// Parse a driver name; unknown names behave like `single`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "stack" => Driver::Stack,
            "daily" => Driver::Daily,
            "stderr" => Driver::Stderr,
            "syslog" => Driver::Syslog,
            _ => Driver::Single,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Single => "single",
            Driver::Stack => "stack",
            Driver::Daily => "daily",
            Driver::Stderr => "stderr",
            Driver::Syslog => "syslog",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When the facade mirrors raw messages to standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleMirror {
    /// Mirror when standard output is an interactive terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// One channel's configuration record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Name printed in rendered lines; defaults to the channel key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Retention window of the daily driver
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<usize>,
    /// Members of the stack driver, in write order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ident: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
}

impl ChannelConfig {
    pub fn with_driver(driver: Driver) -> Self {
        Self {
            driver: Some(driver.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn single() -> Self {
        Self::with_driver(Driver::Single)
    }

    pub fn daily(days: usize) -> Self {
        Self {
            days: Some(days),
            ..Self::with_driver(Driver::Daily)
        }
    }

    pub fn stderr() -> Self {
        Self::with_driver(Driver::Stderr)
    }

    pub fn syslog() -> Self {
        Self::with_driver(Driver::Syslog)
    }

    pub fn stack<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channels: Some(members.into_iter().map(Into::into).collect()),
            ..Self::with_driver(Driver::Stack)
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_days(mut self, days: usize) -> Self {
        self.days = Some(days);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_ident(mut self, ident: impl Into<String>) -> Self {
        self.ident = Some(ident.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = Some(facility.into());
        self
    }

    /// Driver of this channel; missing or unknown names mean `single`
    pub fn driver(&self) -> Driver {
        self.driver.as_deref().map(Driver::parse).unwrap_or_default()
    }

    pub fn retention_days(&self) -> usize {
        self.days.unwrap_or(DEFAULT_RETENTION_DAYS)
    }
}

/// Root of the logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Channel used when a write names none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Minimum level for channels that set none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Storage root; default log files live in `<storage_path>/logs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    pub console_mirror: ConsoleMirror,
    pub channels: BTreeMap<String, ChannelConfig>,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document
    ///
    /// Malformed JSON is a `JsonError`; well-formed JSON of the wrong shape
    /// (a `channels` list instead of a mapping, say) is `InvalidConfiguration`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| LoggerError::config("logging", e.to_string()))
    }

    /// Load a JSON configuration file, falling back to the empty configuration
    ///
    /// A missing, unreadable or malformed file is reported on stderr and never
    /// returned as an error.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "[LOGGER WARNING] Using default logging configuration, could not load '{}': {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logging configuration",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&text)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_default(mut self, channel: impl Into<String>) -> Self {
        self.default = Some(channel.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console_mirror(mut self, mirror: ConsoleMirror) -> Self {
        self.console_mirror = mirror;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_channel(mut self, name: impl Into<String>, channel: ChannelConfig) -> Self {
        self.channels.insert(name.into(), channel);
        self
    }

    pub fn default_channel(&self) -> &str {
        self.default.as_deref().unwrap_or(DEFAULT_CHANNEL)
    }

    /// Global minimum level, normalized
    pub fn default_level(&self) -> LogLevel {
        self.level
            .as_deref()
            .map(LogLevel::normalize)
            .unwrap_or(LogLevel::Debug)
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelConfig> {
        self.channels.get(name)
    }

    /// Configuration for `name`, or the implicit single-file record for
    /// channels that are not configured
    pub fn channel_or_default(&self, name: &str) -> ChannelConfig {
        self.channels.get(name).cloned().unwrap_or_else(|| ChannelConfig {
            level: Some(self.default_level().as_config_str().to_string()),
            ..ChannelConfig::single()
        })
    }

    /// Members of a stack that lists none: every configured non-stack
    /// channel, in name order
    pub fn implicit_stack_members(&self) -> Vec<String> {
        self.channels
            .iter()
            .filter(|(_, channel)| channel.driver() != Driver::Stack)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn storage_path(&self) -> &Path {
        self.storage_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STORAGE_PATH))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.storage_path().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.default_channel(), "stack");
        assert_eq!(config.default_level(), LogLevel::Debug);
        assert_eq!(config.logs_dir(), PathBuf::from("storage").join("logs"));
        assert_eq!(config.console_mirror, ConsoleMirror::Auto);
    }

    #[test]
    fn test_driver_parse_fails_open() {
        assert_eq!(Driver::parse("DAILY"), Driver::Daily);
        assert_eq!(Driver::parse("foo"), Driver::Single);
        assert_eq!(ChannelConfig::default().driver(), Driver::Single);
    }

    #[test]
    fn test_json_config() {
        let config = LoggingConfig::from_json_str(
            r#"{
                "default": "app",
                "level": "WARNING",
                "console_mirror": "never",
                "channels": {
                    "app": { "driver": "single", "level": "info", "path": "/tmp/app.log" },
                    "sys": { "driver": "syslog", "ident": "myapp", "facility": "local0" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.default_channel(), "app");
        assert_eq!(config.default_level(), LogLevel::Warning);
        assert_eq!(config.console_mirror, ConsoleMirror::Never);
        let app = config.channel("app").unwrap();
        assert_eq!(app.path.as_deref(), Some(Path::new("/tmp/app.log")));
        assert_eq!(config.channel("sys").unwrap().driver(), Driver::Syslog);
    }

    #[test]
    fn test_malformed_json_is_an_error_but_load_fails_open() {
        assert!(matches!(
            LoggingConfig::from_json_str("{ not json"),
            Err(LoggerError::JsonError(_))
        ));
        assert!(matches!(
            LoggingConfig::from_json_str(r#"{"channels": ["app"]}"#),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(LoggingConfig::load(&path), LoggingConfig::default());
        assert_eq!(
            LoggingConfig::load(dir.path().join("missing.json")),
            LoggingConfig::default()
        );
    }

    #[test]
    fn test_unconfigured_channel_uses_root_level() {
        let config = LoggingConfig::new().with_level("error");
        let channel = config.channel_or_default("audit");
        assert_eq!(channel.driver(), Driver::Single);
        assert_eq!(channel.level.as_deref(), Some("error"));
        assert_eq!(channel.path, None);
    }

    #[test]
    fn test_implicit_stack_members_skip_stacks() {
        let config = LoggingConfig::new()
            .with_channel("b", ChannelConfig::single())
            .with_channel("a", ChannelConfig::stderr())
            .with_channel("all", ChannelConfig::with_driver(Driver::Stack));
        assert_eq!(config.implicit_stack_members(), vec!["a", "b"]);
    }

    #[test]
    fn test_retention_default() {
        assert_eq!(ChannelConfig::daily(3).retention_days(), 3);
        assert_eq!(ChannelConfig::default().retention_days(), 14);
    }
}
