//! Leveled script logger
//!
//! A per-module logging context passed explicitly to whatever needs it; there
//! is no process-wide logger instance. Entries below the minimum level are
//! dropped, everything else is retained in a bounded history (for in-game
//! inspection) and forwarded to `tracing` for the usual subscriber pipeline.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warn,
    Error,
}

impl LogLevel {
    /// Short tag used when rendering an entry
    pub fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Success => "OK",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// One retained log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Host time the entry was recorded
    pub at_ms: u64,
    pub level: LogLevel,
    pub module: String,
    pub message: String,
}

impl LogEntry {
    /// Render the entry the way the console output does
    pub fn render(&self) -> String {
        format!("[{}] [{}] {}", self.level.tag(), self.module, self.message)
    }
}

/// Per-level counts of recorded entries
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LogStats {
    pub debug: u64,
    pub info: u64,
    pub success: u64,
    pub warn: u64,
    pub error: u64,
}

impl LogStats {
    /// Total entries recorded across levels
    pub fn total(&self) -> u64 {
        self.debug + self.info + self.success + self.warn + self.error
    }
}

/// Explicit logging context for one script module
#[derive(Debug, Clone)]
pub struct ScriptLogger {
    module: String,
    min_level: LogLevel,
    history: VecDeque<LogEntry>,
    history_cap: usize,
    stats: LogStats,
}

impl ScriptLogger {
    /// Default retained history length
    pub const DEFAULT_HISTORY: usize = 100;

    /// Create a logger for `module` with the given minimum level
    pub fn new(module: impl Into<String>, min_level: LogLevel) -> Self {
        Self {
            module: module.into(),
            min_level,
            history: VecDeque::with_capacity(Self::DEFAULT_HISTORY),
            history_cap: Self::DEFAULT_HISTORY,
            stats: LogStats::default(),
        }
    }

    /// Change the minimum level
    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Change how many entries are retained
    pub fn set_history_cap(&mut self, cap: usize) {
        self.history_cap = cap;
        while self.history.len() > cap {
            self.history.pop_front();
        }
    }

    pub fn debug(&mut self, now_ms: u64, message: impl Into<String>) {
        self.record(now_ms, LogLevel::Debug, message.into());
    }

    pub fn info(&mut self, now_ms: u64, message: impl Into<String>) {
        self.record(now_ms, LogLevel::Info, message.into());
    }

    pub fn success(&mut self, now_ms: u64, message: impl Into<String>) {
        self.record(now_ms, LogLevel::Success, message.into());
    }

    pub fn warn(&mut self, now_ms: u64, message: impl Into<String>) {
        self.record(now_ms, LogLevel::Warn, message.into());
    }

    pub fn error(&mut self, now_ms: u64, message: impl Into<String>) {
        self.record(now_ms, LogLevel::Error, message.into());
    }

    fn record(&mut self, now_ms: u64, level: LogLevel, message: String) {
        if level < self.min_level {
            return;
        }

        match level {
            LogLevel::Debug => {
                self.stats.debug += 1;
                tracing::debug!(module = %self.module, "{message}");
            }
            LogLevel::Info => {
                self.stats.info += 1;
                tracing::info!(module = %self.module, "{message}");
            }
            LogLevel::Success => {
                self.stats.success += 1;
                tracing::info!(module = %self.module, "{message}");
            }
            LogLevel::Warn => {
                self.stats.warn += 1;
                tracing::warn!(module = %self.module, "{message}");
            }
            LogLevel::Error => {
                self.stats.error += 1;
                tracing::error!(module = %self.module, "{message}");
            }
        }

        if self.history.len() == self.history_cap {
            self.history.pop_front();
        }
        self.history.push_back(LogEntry {
            at_ms: now_ms,
            level,
            module: self.module.clone(),
            message,
        });
    }

    /// Retained entries, oldest first
    pub fn history(&self) -> impl Iterator<Item = &LogEntry> {
        self.history.iter()
    }

    /// Retained entries at exactly `level`
    pub fn by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.history.iter().filter(|e| e.level == level).collect()
    }

    /// Retained error entries
    pub fn errors(&self) -> Vec<&LogEntry> {
        self.by_level(LogLevel::Error)
    }

    /// Per-level counters since construction (includes evicted entries)
    pub fn stats(&self) -> LogStats {
        self.stats
    }

    /// Drop the retained history; counters are kept
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
