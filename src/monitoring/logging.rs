//! Structured diagnostics for the plugin handler.
//!
//! Registry events are emitted through `tracing`. Problems the registry
//! reports without failing (rejected configurations, callback failures under
//! a continue policy) are also kept in a bounded [`Diagnostics`] buffer so
//! callers can inspect them after the fact.

use crate::core::{now, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    /// Informational
    Info = 0,
    /// Warning
    Warn = 1,
    /// Error
    Error = 2,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "INFO"),
            DiagnosticLevel::Warn => write!(f, "WARN"),
            DiagnosticLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A single reported diagnostic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// When it was reported
    pub timestamp: Timestamp,
    /// Severity
    pub level: DiagnosticLevel,
    /// Plugin the diagnostic concerns, if known
    pub plugin: Option<String>,
    /// Message
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(level: DiagnosticLevel, message: &str) -> Self {
        Self {
            timestamp: now(),
            level,
            plugin: None,
            message: message.to_string(),
        }
    }

    /// Attach the plugin name.
    pub fn with_plugin(mut self, plugin: &str) -> Self {
        self.plugin = Some(plugin.to_string());
        self
    }

    /// Format as text.
    pub fn to_text(&self) -> String {
        match &self.plugin {
            Some(plugin) => format!(
                "{} {} [{}] {}",
                self.timestamp, self.level, plugin, self.message
            ),
            None => format!("{} {} {}", self.timestamp, self.level, self.message),
        }
    }
}

/// Bounded buffer of reported diagnostics.
#[derive(Clone, Debug)]
pub struct Diagnostics {
    entries: VecDeque<Diagnostic>,
    capacity: usize,
}

impl Diagnostics {
    /// Create a buffer holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Record a diagnostic, forwarding it to `tracing`.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        let plugin = diagnostic.plugin.as_deref().unwrap_or("-");
        match diagnostic.level {
            DiagnosticLevel::Info => tracing::info!(plugin, "{}", diagnostic.message),
            DiagnosticLevel::Warn => tracing::warn!(plugin, "{}", diagnostic.message),
            DiagnosticLevel::Error => tracing::error!(plugin, "{}", diagnostic.message),
        }

        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(diagnostic);
    }

    /// Shorthand for an error-level report.
    pub fn error(&mut self, plugin: Option<&str>, message: &str) {
        let mut diagnostic = Diagnostic::new(DiagnosticLevel::Error, message);
        if let Some(plugin) = plugin {
            diagnostic = diagnostic.with_plugin(plugin);
        }
        self.report(diagnostic);
    }

    /// Iterate over buffered diagnostics, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics at or above a level.
    pub fn at_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.entries.iter().filter(|d| d.level >= min_level).collect()
    }

    /// Most recent diagnostic.
    pub fn last(&self) -> Option<&Diagnostic> {
        self.entries.back()
    }

    /// Number of buffered diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Install a global `tracing` fmt subscriber at the given level.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing(level: tracing::Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}
