//! File logging setup backed by log4rs.
//!
//! Used by long-running services that need a persistent record of every
//! batch. Records go to stderr and to a timestamped file in the log directory.

use crate::error::{CoreError, CoreResult};
use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::path::{Path, PathBuf};

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}";
const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l:<5})} {m}{n}";

/// Path of a new log file inside `log_dir`, named after the current local time.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    log_dir.join(format!("framegrab_{stamp}.log"))
}

/// Installs the global logger, writing to stderr and to `log_file`.
///
/// Fails if the file cannot be created or a logger is already installed.
pub fn setup_file_logging(log_file: &Path, log_level: LevelFilter) -> CoreResult<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(log_file)?;

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .build(
            Root::builder()
                .appender("file")
                .appender("console")
                .build(log_level),
        )
        .map_err(|e| CoreError::Config(format!("Invalid logging configuration: {e}")))?;

    log4rs::init_config(config)
        .map_err(|e| CoreError::Config(format!("Failed to install logger: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_shape() {
        let path = log_file_path(Path::new("/var/log/framegrab"));
        assert_eq!(path.parent(), Some(Path::new("/var/log/framegrab")));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("framegrab_"));
        assert!(name.ends_with(".log"));
        // framegrab_YYYYMMDD_HHMMSS.log
        assert_eq!(name.len(), "framegrab_".len() + 15 + ".log".len());
    }
}
