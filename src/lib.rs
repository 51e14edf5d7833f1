//! # Plugin Handler
//!
//! A basic handler for registering and upgrading plugins:
//! - **Register**: store a named initialization callback without running it
//! - **Upgrade**: run the callback and remember that it ran
//! - **Destroy**: forget a plugin and its upgrade state
//!
//! ## Quick Start
//!
//! ```rust
//! use plugin_handler::plugin::{Callback, LoadHook, PluginConfig, PluginRegistry};
//!
//! let mut registry = PluginRegistry::default();
//! registry
//!     .register(PluginConfig::new("tooltip", Callback::new(|| println!("tooltip ready"))))
//!     .unwrap();
//!
//! // Host finished loading.
//! let mut hook = LoadHook::new();
//! hook.fire(&mut registry).unwrap();
//! assert!(registry.is_upgraded("tooltip"));
//! ```

pub mod core;
pub mod monitoring;
pub mod plugin;

pub use crate::core::error::{Error, Result, ValidationError};
pub use plugin::{Callback, PluginConfig, PluginRegistry};
