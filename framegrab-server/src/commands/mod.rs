//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `extract` command.
/// This command runs one batch and prints the result as JSON.
pub mod extract;

/// Module containing the implementation of the `serve` command.
pub mod serve;

use framegrab_core::{CoreConfig, check_dependency};

/// Warns about missing ffmpeg/ffprobe binaries without failing.
///
/// Requests would still fail individually with a dependency error, but the
/// operator sees the problem at startup.
pub(crate) fn warn_missing_tools(config: &CoreConfig) {
    for tool in [&config.ffprobe_path, &config.ffmpeg_path] {
        if let Err(e) = check_dependency(tool) {
            log::warn!("{e}");
        }
    }
}
