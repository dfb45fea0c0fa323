//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod show;
pub mod validate;
pub mod version;

use crate::cli::args::{Cli, Commands, ShowArgs};
use crate::error::CfgGuardError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// Running without a subcommand behaves like `show` with default arguments.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), CfgGuardError> {
    match cli.command {
        None => show::run(&ShowArgs::default()),
        Some(Commands::Show(args)) => show::run(&args),
        Some(Commands::Validate(args)) => validate::run(&args),
        Some(Commands::Version(args)) => version::run(&args),
    }
}
