//! Host load-event hook.
//!
//! The host signals once that its initial load has completed; at that point
//! every eligible plugin is upgraded.

use crate::core::Result;
use crate::plugin::entry::UpgradeReport;
use crate::plugin::registry::PluginRegistry;

/// One-shot trigger that runs [`PluginRegistry::upgrade_all`] on load.
#[derive(Clone, Debug, Default)]
pub struct LoadHook {
    fired: bool,
}

impl LoadHook {
    /// Create an unfired hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the load event.
    ///
    /// Upgrades the registry the first time it is called and returns the
    /// report; later calls return `Ok(None)`. The hook counts as fired even
    /// if the upgrade pass fails.
    pub fn fire(&mut self, registry: &mut PluginRegistry) -> Result<Option<UpgradeReport>> {
        if self.fired {
            tracing::debug!("Load hook already fired");
            return Ok(None);
        }
        self.fired = true;

        tracing::info!(plugins = registry.len(), "Host load complete, upgrading plugins");
        registry.upgrade_all().map(Some)
    }

    /// Whether the load event has been handled.
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
