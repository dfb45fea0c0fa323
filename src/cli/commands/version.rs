//! Version information display
//!
//! Prints version metadata in human or JSON format.

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::CfgGuardError;

/// Print version information.
///
/// # Errors
///
/// Returns a JSON error if the version document cannot be serialized.
pub fn run(args: &VersionArgs) -> Result<(), CfgGuardError> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => println!("{name} {version}"),
        OutputFormat::Json => {
            let doc = serde_json::json!({ "name": name, "version": version });
            println!("{}", serde_json::to_string(&doc)?);
        }
    }
    Ok(())
}
