//! Core utilities and common types for the plugin handler.

pub mod error;
pub mod types;

pub use error::{CallbackError, Error, Result, ValidationError};
pub use types::*;
