//! Command-line interface
//!
//! Argument parsing and command handlers for the `cfgguard` binary.

pub mod args;
pub mod commands;
