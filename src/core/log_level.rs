//! Log level definitions
//!
//! Eight ordered severities, from `Debug` up to `Emergency`. Level strings coming
//! from configuration or call sites go through [`LogLevel::normalize`], which
//! never fails: anything unrecognized becomes `Debug`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Notice = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    Alert = 6,
    Emergency = 7,
}

impl LogLevel {
    /// All levels, least severe first
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Alert,
        LogLevel::Emergency,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
            LogLevel::Emergency => "EMERGENCY",
        }
    }

    /// Lower-case name, as written in configuration files
    pub fn as_config_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Alert => "alert",
            LogLevel::Emergency => "emergency",
        }
    }

    /// Normalize an arbitrary level name
    ///
    /// Case-insensitive and total: the lower-cased input must be one of the
    /// eight level names, anything else (aliases and padded names included)
    /// resolves to `Debug` instead of failing.
    ///
    /// ```
    /// use rust_log_facade::LogLevel;
    ///
    /// assert_eq!(LogLevel::normalize("WARNING"), LogLevel::Warning);
    /// assert_eq!(LogLevel::normalize("warn"), LogLevel::Debug);
    /// assert_eq!(LogLevel::normalize("verbose"), LogLevel::Debug);
    /// ```
    pub fn normalize(input: &str) -> Self {
        let lowered = input.to_lowercase();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_config_str() == lowered)
            .unwrap_or(LogLevel::Debug)
    }

    /// RFC 5424 numeric severity (0 = emergency, 7 = debug)
    pub fn syslog_code(&self) -> u8 {
        7 - *self as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "notice" => Ok(LogLevel::Notice),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" | "err" => Ok(LogLevel::Error),
            "critical" | "crit" => Ok(LogLevel::Critical),
            "alert" => Ok(LogLevel::Alert),
            "emergency" | "emerg" => Ok(LogLevel::Emergency),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Anything the write path accepts as a level
pub trait ToLogLevel {
    fn to_log_level(&self) -> LogLevel;
}

impl ToLogLevel for LogLevel {
    fn to_log_level(&self) -> LogLevel {
        *self
    }
}

impl ToLogLevel for str {
    fn to_log_level(&self) -> LogLevel {
        LogLevel::normalize(self)
    }
}

impl ToLogLevel for &str {
    fn to_log_level(&self) -> LogLevel {
        LogLevel::normalize(self)
    }
}

impl ToLogLevel for String {
    fn to_log_level(&self) -> LogLevel {
        LogLevel::normalize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        for pair in LogLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(LogLevel::default(), LogLevel::Debug);
    }

    #[test]
    fn test_normalize_is_case_insensitive() {
        assert_eq!(LogLevel::normalize("Info"), LogLevel::Info);
        assert_eq!(LogLevel::normalize("CRITICAL"), LogLevel::Critical);
        assert_eq!(LogLevel::normalize("eMeRgEnCy"), LogLevel::Emergency);
    }

    #[test]
    fn test_normalize_is_an_exact_name_match() {
        assert_eq!(LogLevel::normalize("warn"), LogLevel::Debug);
        assert_eq!(LogLevel::normalize("err"), LogLevel::Debug);
        assert_eq!(LogLevel::normalize(" info "), LogLevel::Debug);
        // aliases stay available through strict parsing
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!(" info ".parse::<LogLevel>(), Ok(LogLevel::Info));
    }

    #[test]
    fn test_normalize_unknown_falls_back_to_debug() {
        assert_eq!(LogLevel::normalize(""), LogLevel::Debug);
        assert_eq!(LogLevel::normalize("fatal"), LogLevel::Debug);
        assert_eq!(LogLevel::normalize("inf0"), LogLevel::Debug);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert!("fatal".parse::<LogLevel>().is_err());
        assert_eq!("emerg".parse::<LogLevel>(), Ok(LogLevel::Emergency));
    }

    #[test]
    fn test_to_log_level_conversions() {
        assert_eq!(LogLevel::Alert.to_log_level(), LogLevel::Alert);
        assert_eq!("error".to_log_level(), LogLevel::Error);
        assert_eq!(String::from("Warning").to_log_level(), LogLevel::Warning);
    }

    #[test]
    fn test_syslog_codes() {
        assert_eq!(LogLevel::Emergency.syslog_code(), 0);
        assert_eq!(LogLevel::Warning.syslog_code(), 4);
        assert_eq!(LogLevel::Debug.syslog_code(), 7);
    }

    #[test]
    fn test_serde_uses_config_names() {
        let json = serde_json::to_string(&LogLevel::Notice).unwrap();
        assert_eq!(json, "\"notice\"");
        let level: LogLevel = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(level, LogLevel::Critical);
    }
}
