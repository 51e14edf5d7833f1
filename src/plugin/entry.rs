//! Registry entry types and operation outcomes.

use crate::core::{Timestamp, ValidationError};
use crate::plugin::config::Callback;
use serde::{Deserialize, Serialize};

/// A registered plugin.
#[derive(Clone, Debug)]
pub struct PluginEntry {
    pub(crate) name: String,
    pub(crate) callback: Callback,
    pub(crate) upgradeable: bool,
    pub(crate) is_upgraded: bool,
    pub(crate) registered_at: Timestamp,
}

impl PluginEntry {
    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initialization callback.
    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Whether bulk upgrades re-run this plugin.
    pub fn upgradeable(&self) -> bool {
        self.upgradeable
    }

    /// Whether the callback has completed at least once.
    pub fn is_upgraded(&self) -> bool {
        self.is_upgraded
    }

    /// Registration time.
    pub fn registered_at(&self) -> Timestamp {
        self.registered_at
    }
}

/// Snapshot of a plugin taken the first time it was upgraded.
#[derive(Clone, Debug)]
pub struct UpgradedEntry {
    pub(crate) name: String,
    pub(crate) callback: Callback,
    pub(crate) upgradeable: bool,
    pub(crate) upgraded_at: Timestamp,
}

impl UpgradedEntry {
    pub(crate) fn snapshot(entry: &PluginEntry, upgraded_at: Timestamp) -> Self {
        Self {
            name: entry.name.clone(),
            callback: entry.callback.clone(),
            upgradeable: entry.upgradeable,
            upgraded_at,
        }
    }

    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Callback as it was at first upgrade.
    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Upgradeable flag as it was at first upgrade.
    pub fn upgradeable(&self) -> bool {
        self.upgradeable
    }

    /// Time of first upgrade.
    pub fn upgraded_at(&self) -> Timestamp {
        self.upgraded_at
    }
}

/// Outcome of a registration attempt that did not fail fatally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    /// Plugin stored
    Registered,
    /// Configuration rejected; nothing stored
    Rejected(ValidationError),
}

impl Registration {
    /// Whether the plugin was stored.
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered)
    }
}

/// A callback failure recorded during a bulk upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeFailure {
    /// Plugin name
    pub plugin: String,
    /// Error message
    pub message: String,
}

/// Summary of a bulk upgrade pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeReport {
    /// Plugins whose callback completed, in registry order
    pub invoked: Vec<String>,
    /// Plugins whose callback failed
    pub failed: Vec<UpgradeFailure>,
}

impl UpgradeReport {
    /// Whether every attempted callback succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
