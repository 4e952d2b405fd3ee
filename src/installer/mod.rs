//! Installing the environment tool from a remote script.
//!
//! [`run_installer`] downloads the platform's install script through a
//! [`ScriptFetcher`] and runs it through a [`ProcessRunner`]. Neither the
//! download nor the script is verified; the URL is trusted configuration.

pub mod fetch;
pub mod script_host;

pub use fetch::{HttpFetcher, MockFetcher, ScriptFetcher};
pub use script_host::ScriptHost;

use crate::error::Result;
use crate::shell::{CommandResult, ProcessRunner};

/// Download the script at `url` and run it in `host`.
///
/// A failed download is an error; a script that runs and exits non-zero is
/// an `Ok` failure result for the caller to judge.
pub fn run_installer(
    url: &str,
    host: ScriptHost,
    fetcher: &dyn ScriptFetcher,
    runner: &dyn ProcessRunner,
) -> Result<CommandResult> {
    let script = fetcher.fetch(url)?;
    tracing::info!("Running installer from {} ({} bytes)", url, script.len());
    runner.run(&host.spec(&script))
}
