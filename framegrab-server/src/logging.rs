// ============================================================================
// framegrab-server/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console or Console + File Logging
//
// The binary uses the standard `log` facade. Without a log directory,
// `env_logger` writes to stderr and honours RUST_LOG:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug: Per-command and state transition details
//
// With a log directory, log4rs is installed instead so every record also
// lands in a timestamped file.
//
// AI-ASSISTANT-INFO: Logger initialization for the framegrab binary

use framegrab_core::CoreResult;
use framegrab_core::file_logging::{log_file_path, setup_file_logging};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Installs the global logger.
///
/// Returns the log file path when file logging was configured.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CoreResult<Option<PathBuf>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match log_dir {
        Some(dir) => {
            let log_file = log_file_path(dir);
            setup_file_logging(&log_file, level)?;
            log::debug!("Logging to {}", log_file.display());
            Ok(Some(log_file))
        }
        None => {
            let default_filter = level.to_string().to_lowercase();
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(default_filter),
            )
            .format_timestamp_secs()
            .init();
            Ok(None)
        }
    }
}
