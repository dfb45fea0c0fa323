//! Observability module
//!
//! Structured logging for `cfgguard`. Logs go to stderr so stdout stays
//! reserved for command output.

pub mod logging;

pub use logging::{LogFormat, init_logging};
