//! Syslog appender
//!
//! Sends RFC 3164 messages to the local syslog daemon, falling back to UDP on
//! the well-known port when no local socket is available. The connection is
//! made on the first append.

use crate::core::{Appender, LogLevel, LoggerError, Result};
use fasyslog::format::SyslogContext;
use fasyslog::sender::SyslogSender;
use fasyslog::{Facility, Severity};
use std::io;

#[cfg(unix)]
const LOCAL_SOCKETS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

pub struct SyslogAppender {
    ident: String,
    facility: String,
    context: SyslogContext,
    sender: Option<SyslogSender>,
}

impl SyslogAppender {
    /// Create an appender tagging messages with `ident`
    ///
    /// Unknown facility names fall back to `user`.
    pub fn new(ident: impl Into<String>, facility: &str) -> Self {
        let ident = ident.into();
        let mut context = SyslogContext::default();
        context
            .appname(ident.clone())
            .facility(parse_facility(facility));

        Self {
            ident,
            facility: facility.trim().to_lowercase(),
            context,
            sender: None,
        }
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Facility name as configured
    pub fn facility(&self) -> &str {
        &self.facility
    }

    pub fn is_connected(&self) -> bool {
        self.sender.is_some()
    }

    fn connect() -> io::Result<SyslogSender> {
        #[cfg(unix)]
        {
            for path in LOCAL_SOCKETS {
                if let Ok(sender) = fasyslog::sender::unix(path) {
                    return Ok(sender);
                }
            }
        }
        fasyslog::sender::udp_well_known().map(SyslogSender::Udp)
    }

    fn sender(&mut self) -> Result<&mut SyslogSender> {
        if self.sender.is_none() {
            let sender = Self::connect()
                .map_err(|e| LoggerError::syslog(&self.ident, format!("Failed to connect: {}", e)))?;
            self.sender = Some(sender);
        }
        self.sender
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Syslog sender not initialized"))
    }
}

pub(crate) fn parse_facility(name: &str) -> Facility {
    match name.trim().to_lowercase().as_str() {
        "mail" => Facility::MAIL,
        "daemon" => Facility::DAEMON,
        "auth" => Facility::AUTH,
        "syslog" => Facility::SYSLOG,
        "cron" => Facility::CRON,
        "authpriv" => Facility::AUTHPRIV,
        "local0" => Facility::LOCAL0,
        "local1" => Facility::LOCAL1,
        "local2" => Facility::LOCAL2,
        "local3" => Facility::LOCAL3,
        "local4" => Facility::LOCAL4,
        "local5" => Facility::LOCAL5,
        "local6" => Facility::LOCAL6,
        "local7" => Facility::LOCAL7,
        _ => Facility::USER,
    }
}

pub(crate) fn severity(level: LogLevel) -> Severity {
    match level {
        LogLevel::Debug => Severity::DEBUG,
        LogLevel::Info => Severity::INFORMATIONAL,
        LogLevel::Notice => Severity::NOTICE,
        LogLevel::Warning => Severity::WARNING,
        LogLevel::Error => Severity::ERROR,
        LogLevel::Critical => Severity::CRITICAL,
        LogLevel::Alert => Severity::ALERT,
        LogLevel::Emergency => Severity::EMERGENCY,
    }
}

impl Appender for SyslogAppender {
    fn append(&mut self, line: &str, level: LogLevel) -> Result<()> {
        let message = self
            .context
            .format_rfc3164(severity(level), Some(line.trim_end()))
            .to_string();
        let ident = self.ident.clone();
        self.sender()?
            .send_formatted(message.as_bytes())
            .map_err(|e| LoggerError::syslog(ident, format!("Failed to send: {}", e)))
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut sender) = self.sender {
            sender.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connects_lazily() {
        let appender = SyslogAppender::new("myapp", "local3");
        assert!(!appender.is_connected());
        assert_eq!(appender.ident(), "myapp");
        assert_eq!(appender.facility(), "local3");
        assert_eq!(appender.name(), "syslog");
    }

    #[test]
    fn test_facility_names() {
        assert!(matches!(parse_facility("LOCAL0"), Facility::LOCAL0));
        assert!(matches!(parse_facility("daemon"), Facility::DAEMON));
        assert!(matches!(parse_facility("user"), Facility::USER));
        assert!(matches!(parse_facility("nonsense"), Facility::USER));
    }

    #[test]
    fn test_severity_mapping() {
        assert!(matches!(severity(LogLevel::Debug), Severity::DEBUG));
        assert!(matches!(severity(LogLevel::Info), Severity::INFORMATIONAL));
        assert!(matches!(severity(LogLevel::Warning), Severity::WARNING));
        assert!(matches!(severity(LogLevel::Emergency), Severity::EMERGENCY));
    }
}
