//! Plugin Module
//!
//! Provides the plugin handler:
//! - Plugin and registry configuration
//! - Plugin registry with upgrade tracking
//! - Host load-event hook

pub mod config;
pub mod entry;
pub mod hook;
pub mod registry;

pub use config::{Callback, CallbackResult, FailurePolicy, PluginConfig, RegistryConfig};
pub use entry::{PluginEntry, Registration, UpgradeFailure, UpgradeReport, UpgradedEntry};
pub use hook::LoadHook;
pub use registry::PluginRegistry;
