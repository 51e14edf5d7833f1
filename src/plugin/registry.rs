//! Plugin registry.
//!
//! Tracks registered plugins and the subset that has been upgraded. Both
//! collections keep insertion order and names are unique across them.
//!
//! Every mutating operation takes `&mut self`, so a callback cannot reach
//! back into the registry while the registry is iterating.

use crate::core::{now, Error, Result, ValidationError};
use crate::monitoring::Diagnostics;
use crate::plugin::config::{loosely_true, Callback, FailurePolicy, PluginConfig, RegistryConfig};
use crate::plugin::entry::{
    PluginEntry, Registration, UpgradeFailure, UpgradeReport, UpgradedEntry,
};
use tracing::{debug, info, warn};

/// Registry of plugins and their upgrade state.
#[derive(Debug)]
pub struct PluginRegistry {
    /// Registered plugins
    registered: Vec<PluginEntry>,
    /// Snapshots of upgraded plugins
    upgraded: Vec<UpgradedEntry>,
    /// Reported diagnostics
    diagnostics: Diagnostics,
    /// Settings
    config: RegistryConfig,
}

impl PluginRegistry {
    /// Create a new registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            registered: Vec::new(),
            upgraded: Vec::new(),
            diagnostics: Diagnostics::new(config.diagnostics_capacity),
            config,
        }
    }

    /// Register a plugin.
    ///
    /// An incomplete config is reported and returned as
    /// [`Registration::Rejected`]. A duplicate name is fatal and returns
    /// [`Error::AlreadyRegistered`]. Neither case changes the registry.
    pub fn register(&mut self, config: PluginConfig) -> Result<Registration> {
        let upgradeable = config.is_upgradeable();
        let Some(name) = config.plugin else {
            return Ok(self.reject(ValidationError::InvalidName, None));
        };
        let Some(callback) = config.callback else {
            return Ok(self.reject(ValidationError::InvalidCallback, Some(&name)));
        };

        self.insert(name, callback, upgradeable)
    }

    /// Register a plugin described by a JSON manifest.
    ///
    /// Recognizes `plugin` and `upgradeable`; other keys are ignored.
    pub fn register_value(
        &mut self,
        manifest: &serde_json::Value,
        callback: Option<Callback>,
    ) -> Result<Registration> {
        let Some(fields) = manifest.as_object() else {
            return Ok(self.reject(ValidationError::InvalidConfig, None));
        };
        let Some(name) = fields.get("plugin").and_then(|v| v.as_str()) else {
            return Ok(self.reject(ValidationError::InvalidName, None));
        };
        let Some(callback) = callback else {
            return Ok(self.reject(ValidationError::InvalidCallback, Some(name)));
        };

        let upgradeable = loosely_true(fields.get("upgradeable"));
        self.insert(name.to_string(), callback, upgradeable)
    }

    fn reject(&mut self, error: ValidationError, plugin: Option<&str>) -> Registration {
        self.diagnostics.error(plugin, &error.to_string());
        Registration::Rejected(error)
    }

    fn insert(&mut self, name: String, callback: Callback, upgradeable: bool) -> Result<Registration> {
        if self.is_registered(&name) {
            warn!(plugin = %name, "Duplicate plugin registration");
            return Err(Error::AlreadyRegistered(name));
        }

        info!(plugin = %name, upgradeable, "Registered plugin");
        self.registered.push(PluginEntry {
            name,
            callback,
            upgradeable,
            is_upgraded: false,
            registered_at: now(),
        });
        Ok(Registration::Registered)
    }

    /// Upgrade a single plugin.
    ///
    /// Returns `Ok(false)` if no plugin has that name.
    pub fn upgrade(&mut self, name: &str) -> Result<bool> {
        match self.position(name) {
            Some(index) => {
                self.upgrade_at(index)?;
                Ok(true)
            }
            None => {
                debug!(plugin = %name, "Upgrade skipped, plugin not registered");
                Ok(false)
            }
        }
    }

    /// Upgrade every plugin that is upgradeable, plus non-upgradeable
    /// plugins that have not been upgraded yet.
    pub fn upgrade_all(&mut self) -> Result<UpgradeReport> {
        self.upgrade_where(|entry| entry.upgradeable || !entry.is_upgraded)
    }

    /// Upgrade every registered plugin regardless of state.
    pub fn upgrade_all_force(&mut self) -> Result<UpgradeReport> {
        self.upgrade_where(|_| true)
    }

    fn upgrade_where<F>(&mut self, eligible: F) -> Result<UpgradeReport>
    where
        F: Fn(&PluginEntry) -> bool,
    {
        let mut report = UpgradeReport::default();

        for index in 0..self.registered.len() {
            if !eligible(&self.registered[index]) {
                continue;
            }

            match self.upgrade_at(index) {
                Ok(()) => report.invoked.push(self.registered[index].name.clone()),
                Err(e) => match self.config.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => report.failed.push(UpgradeFailure {
                        plugin: self.registered[index].name.clone(),
                        message: e.to_string(),
                    }),
                },
            }
        }

        debug!(
            invoked = report.invoked.len(),
            failed = report.failed.len(),
            "Bulk upgrade finished"
        );
        Ok(report)
    }

    /// Run the callback, then mark the entry and snapshot it once.
    ///
    /// A failing callback leaves the entry untouched.
    fn upgrade_at(&mut self, index: usize) -> Result<()> {
        let entry = &mut self.registered[index];

        if let Err(source) = entry.callback.invoke() {
            let plugin = entry.name.clone();
            self.diagnostics
                .error(Some(&plugin), &format!("Plugin callback failed: {}", source));
            return Err(Error::CallbackFailed { plugin, source });
        }
        entry.is_upgraded = true;
        debug!(plugin = %entry.name, "Upgraded plugin");

        if self.upgraded.iter().any(|u| u.name == entry.name) {
            return Ok(());
        }
        self.upgraded.push(UpgradedEntry::snapshot(entry, now()));
        Ok(())
    }

    /// Remove a plugin from both collections.
    ///
    /// Returns `false` if no plugin has that name.
    pub fn destroy(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.destroy_at(index);
                true
            }
            None => false,
        }
    }

    /// Remove every plugin.
    pub fn destroy_all(&mut self) {
        let count = self.registered.len();
        for _ in 0..count {
            self.destroy_at(0);
        }
    }

    fn destroy_at(&mut self, index: usize) {
        let entry = self.registered.remove(index);

        if entry.is_upgraded {
            if let Some(pos) = self.upgraded.iter().position(|u| u.name == entry.name) {
                self.upgraded.remove(pos);
            }
        }
        info!(plugin = %entry.name, "Destroyed plugin");
    }

    /// All registered plugins in registration order.
    ///
    /// This is a live view of the registry, not a copy.
    pub fn all_registered(&self) -> &[PluginEntry] {
        &self.registered
    }

    /// All upgraded plugin snapshots in first-upgrade order.
    pub fn all_upgraded(&self) -> &[UpgradedEntry] {
        &self.upgraded
    }

    /// Whether a plugin is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Whether a plugin has been upgraded.
    pub fn is_upgraded(&self, name: &str) -> bool {
        self.upgraded.iter().any(|u| u.name == name)
    }

    /// Get a registered plugin by name.
    pub fn get(&self, name: &str) -> Option<&PluginEntry> {
        self.registered.iter().find(|e| e.name == name)
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether no plugin is registered.
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Number of upgraded plugins.
    pub fn upgraded_count(&self) -> usize {
        self.upgraded.len()
    }

    /// Reported diagnostics.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Registry settings.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.registered.iter().position(|e| e.name == name)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
