//! Plugin and registry configuration.
//!
//! Defines the callback capability, the per-plugin registration config and
//! the registry-wide settings.

use crate::core::{CallbackError, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result returned by a plugin callback.
pub type CallbackResult = std::result::Result<(), CallbackError>;

/// Zero-argument initialization procedure attached to a plugin.
///
/// Cloning shares the underlying closure.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn() -> CallbackResult + Send + Sync>);

impl Callback {
    /// Wrap an infallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(move || {
            f();
            Ok(())
        }))
    }

    /// Wrap a closure that may fail.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn() -> CallbackResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the callback.
    pub fn invoke(&self) -> CallbackResult {
        (self.0)()
    }

    /// Whether two callbacks share the same closure.
    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Registration input for a single plugin.
///
/// Fields are optional so incomplete configurations can be rejected through
/// the validation channel rather than at compile time.
#[derive(Clone, Debug, Default)]
pub struct PluginConfig {
    /// Unique plugin name
    pub plugin: Option<String>,
    /// Initialization callback
    pub callback: Option<Callback>,
    /// Whether bulk upgrades may re-run the callback; defaults to `true`
    pub upgradeable: Option<bool>,
}

impl PluginConfig {
    /// Create a config with a name and callback.
    pub fn new(plugin: &str, callback: Callback) -> Self {
        Self {
            plugin: Some(plugin.to_string()),
            callback: Some(callback),
            upgradeable: None,
        }
    }

    /// Set upgradeable.
    pub fn with_upgradeable(mut self, upgradeable: bool) -> Self {
        self.upgradeable = Some(upgradeable);
        self
    }

    /// Resolved upgradeable flag.
    pub fn is_upgradeable(&self) -> bool {
        self.upgradeable.unwrap_or(true)
    }
}

/// Loose truthiness of a manifest `upgradeable` value.
///
/// Absent means `true`; otherwise only values loosely equal to `true`
/// (`true`, `1`, a string spelling `1`) count.
pub(crate) fn loosely_true(value: Option<&serde_json::Value>) -> bool {
    use serde_json::Value;

    match value {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok() == Some(1.0),
        Some(_) => false,
    }
}

/// How bulk upgrades react to a failing callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure and return it
    #[default]
    Abort,
    /// Keep going and collect failures in the report
    Continue,
}

/// Registry-wide settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Bulk upgrade failure handling
    pub failure_policy: FailurePolicy,
    /// Maximum buffered diagnostics
    pub diagnostics_capacity: usize,
}

impl RegistryConfig {
    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfiguration(e.to_string()))
    }

    /// Set failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Abort,
            diagnostics_capacity: 1000,
        }
    }
}
