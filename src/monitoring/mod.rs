//! Monitoring Module
//!
//! Provides observability for the plugin handler:
//! - Structured logging via `tracing`
//! - Bounded diagnostics buffer

pub mod logging;

pub use logging::{init_tracing, Diagnostic, DiagnosticLevel, Diagnostics};
