//! Channel registry
//!
//! Maps channel names to their resolved [`SinkHandle`]s. Channels are built on
//! first use and cached for the lifetime of the registry unless explicitly
//! invalidated. Builds are serialized, so at most one handle is ever built for
//! a name and readers never observe a half-built sink.

use super::{
    builder::ChannelBuilder,
    config::LoggingConfig,
    error::{LoggerError, Result},
    formatter::LineFormatter,
    sink::SinkHandle,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub struct ChannelRegistry {
    config: Arc<LoggingConfig>,
    formatter: Arc<LineFormatter>,
    channels: RwLock<HashMap<String, Arc<SinkHandle>>>,
    last_resolved: RwLock<Option<String>>,
    /// Held for the whole of a (possibly recursive) build
    build_lock: Mutex<()>,
}

impl ChannelRegistry {
    pub fn new(config: LoggingConfig) -> Self {
        Self::with_formatter(config, LineFormatter::new())
    }

    pub fn with_formatter(config: LoggingConfig, formatter: LineFormatter) -> Self {
        Self {
            config: Arc::new(config),
            formatter: formatter.shared(),
            channels: RwLock::new(HashMap::new()),
            last_resolved: RwLock::new(None),
            build_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    pub fn formatter(&self) -> &LineFormatter {
        &self.formatter
    }

    /// Resolve a channel, building and caching it on first use
    ///
    /// Repeated calls return the same `Arc` until the channel is invalidated.
    /// Fails only when a stack channel contains itself.
    pub fn get(&self, channel: &str) -> Result<Arc<SinkHandle>> {
        if let Some(handle) = self.cached(channel) {
            return Ok(handle);
        }

        let _guard = self.build_lock.lock();
        let mut chain = Vec::new();
        self.resolve(channel, &mut chain)
    }

    fn cached(&self, channel: &str) -> Option<Arc<SinkHandle>> {
        self.channels.read().get(channel).cloned()
    }

    /// Caller holds `build_lock`; `chain` lists the channels being built
    fn resolve(&self, channel: &str, chain: &mut Vec<String>) -> Result<Arc<SinkHandle>> {
        if let Some(handle) = self.cached(channel) {
            return Ok(handle);
        }
        if chain.iter().any(|c| c == channel) {
            return Err(LoggerError::channel_cycle(chain, channel));
        }

        chain.push(channel.to_string());
        let record = self.config.channel_or_default(channel);
        let builder = ChannelBuilder::new(&self.config, &self.formatter);
        let built = builder.build(channel, &record, &mut |member| self.resolve(member, chain));
        chain.pop();

        let handle = Arc::new(built?);
        self.channels
            .write()
            .insert(channel.to_string(), Arc::clone(&handle));
        *self.last_resolved.write() = Some(channel.to_string());
        Ok(handle)
    }

    /// Drop cached handles so the next `get` rebuilds them
    ///
    /// With a name, the channel and every cached stack aggregating it
    /// (directly or transitively) are dropped; without one, everything is.
    pub fn invalidate(&self, channel: Option<&str>) {
        let mut channels = self.channels.write();
        let Some(channel) = channel else {
            channels.clear();
            return;
        };

        let mut removed: HashSet<String> = HashSet::new();
        removed.insert(channel.to_string());
        loop {
            let dependents: Vec<String> = channels
                .iter()
                .filter(|(name, handle)| {
                    !removed.contains(*name) && handle.members().iter().any(|m| removed.contains(m))
                })
                .map(|(name, _)| name.clone())
                .collect();
            if dependents.is_empty() {
                break;
            }
            removed.extend(dependents);
        }

        for name in &removed {
            channels.remove(name);
        }
    }

    pub fn is_cached(&self, channel: &str) -> bool {
        self.channels.read().contains_key(channel)
    }

    /// Names of every cached channel, sorted
    pub fn cached_channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Channel most recently built or selected
    pub fn last_resolved(&self) -> Option<String> {
        self.last_resolved.read().clone()
    }

    pub fn set_last_resolved(&self, channel: impl Into<String>) {
        *self.last_resolved.write() = Some(channel.into());
    }

    /// Flush every cached channel's writers
    pub fn flush(&self) -> Result<()> {
        let handles: Vec<Arc<SinkHandle>> = self.channels.read().values().cloned().collect();
        for handle in handles {
            handle.flush()?;
        }
        Ok(())
    }
}
