//! Error types for the plugin handler.

use thiserror::Error;

/// Result type alias for plugin handler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by a failing plugin callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal errors raised by the registry.
///
/// These propagate to the caller. Recoverable configuration problems are
/// reported through [`ValidationError`] instead.
#[derive(Error, Debug)]
pub enum Error {
    // Registration errors
    #[error("The {0} plugin is already registered.")]
    AlreadyRegistered(String),

    // Upgrade errors
    #[error("Plugin {plugin} callback failed: {source}")]
    CallbackFailed {
        plugin: String,
        #[source]
        source: CallbackError,
    },

    // Configuration errors
    #[error("Invalid registry configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Reported (non-fatal) reasons a plugin configuration was rejected.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please, register a valid plugin.")]
    InvalidConfig,

    #[error("Please, register a valid plugin name.")]
    InvalidName,

    #[error("Please, register a valid function as plugin callback.")]
    InvalidCallback,
}
