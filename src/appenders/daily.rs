//! Daily rotating file appender
//!
//! Writes to one file per local calendar day, named after the configured path
//! with the date inserted before the extension (`app.log` becomes
//! `app-2025-01-08.log`). When a new day's file is opened, dated files beyond
//! the retention window are removed, oldest first.
//!
//! # Examples
//!
//! ```no_run
//! use rust_log_facade::appenders::DailyFileAppender;
//!
//! // Keep the last 7 days of logs
//! let appender = DailyFileAppender::new("/var/log/app.log", 7);
//! ```

use super::file::open_append;
use crate::core::{Appender, LogLevel, LoggerError, Result};
use chrono::{Local, NaiveDate};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct DailyFileAppender {
    base_path: PathBuf,
    /// Number of dated files to keep; 0 keeps everything
    max_files: usize,
    writer: Option<BufWriter<File>>,
    current_date: Option<NaiveDate>,
}

impl DailyFileAppender {
    pub fn new(path: impl Into<PathBuf>, max_files: usize) -> Self {
        Self {
            base_path: path.into(),
            max_files,
            writer: None,
            current_date: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// File that receives entries written on `date`
    pub fn dated_path(&self, date: NaiveDate) -> PathBuf {
        let (stem, extension) = self.name_parts();
        let date = date.format(DATE_FORMAT);
        let file_name = match extension {
            Some(ext) => format!("{}-{}.{}", stem, date, ext),
            None => format!("{}-{}", stem, date),
        };
        self.base_path.with_file_name(file_name)
    }

    fn name_parts(&self) -> (String, Option<String>) {
        let stem = self
            .base_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("app")
            .to_string();
        let extension = self
            .base_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_string);
        (stem, extension)
    }

    /// Date encoded in a sibling file name, if it is one of ours
    fn date_of(&self, file_name: &str) -> Option<NaiveDate> {
        let (stem, extension) = self.name_parts();
        let rest = file_name.strip_prefix(&stem)?.strip_prefix('-')?;
        let date = match extension {
            Some(ext) => rest.strip_suffix(&ext)?.strip_suffix('.')?,
            None => rest,
        };
        NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
    }

    /// Dated log files next to the base path, newest first
    pub fn dated_files(&self) -> Vec<(NaiveDate, PathBuf)> {
        let dir = match self.base_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut files: Vec<(NaiveDate, PathBuf)> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name();
                let date = self.date_of(name.to_str()?)?;
                Some((date, e.path()))
            })
            .collect();
        files.sort_by(|a, b| b.0.cmp(&a.0));
        files
    }

    /// Remove dated files outside the retention window
    fn prune(&self) {
        if self.max_files == 0 {
            return;
        }
        for (_, path) in self.dated_files().into_iter().skip(self.max_files) {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!(
                    "[LOGGER WARNING] Failed to remove expired log file {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    fn open_for(&mut self, date: NaiveDate) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let file = open_append(&self.dated_path(date))?;
        self.writer = Some(BufWriter::new(file));
        self.current_date = Some(date);
        self.prune();
        Ok(())
    }

    fn write_for_date(&mut self, line: &str, date: NaiveDate) -> Result<()> {
        if self.current_date != Some(date) || self.writer.is_none() {
            self.open_for(date)?;
        }

        let path = self.dated_path(date);
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Writer not initialized"))?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to write log entry: {}", e),
                )
            })
    }
}

impl Appender for DailyFileAppender {
    fn append(&mut self, line: &str, _level: LogLevel) -> Result<()> {
        self.write_for_date(line, Local::now().date_naive())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "daily"
    }
}

impl Drop for DailyFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
