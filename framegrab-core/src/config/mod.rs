//! Configuration structures and constants for the framegrab-core library.
//!
//! This module provides the configuration for the extraction pipeline:
//! external tool locations, the output directory, the protocol whitelist
//! handed to ffprobe/ffmpeg and the per-invocation timeouts.

mod builder;

use crate::error::{CoreError, CoreResult};
use crate::output_paths::validate_output_format;
use std::path::PathBuf;
use std::time::Duration;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default ffmpeg binary, resolved through `PATH`.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Default ffprobe binary, resolved through `PATH`.
pub const DEFAULT_FFPROBE_PATH: &str = "ffprobe";

/// Default directory for extracted frames, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "extracted_frames";

/// Transport protocols ffprobe/ffmpeg may use to open the source.
///
/// Enough to fetch HLS playlists and segments over plain or encrypted HTTP;
/// every other protocol handler (pipe, concat, subfile, ...) stays disabled
/// for URLs supplied by callers.
pub const DEFAULT_PROTOCOL_WHITELIST: [&str; 6] = ["file", "http", "https", "tcp", "tls", "crypto"];

/// Default limit for one ffprobe invocation.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 60;

/// Default limit for one ffmpeg frame extraction.
pub const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 120;

/// Main configuration structure for the framegrab-core library.
///
/// All fields have sensible defaults. The builder provides a fluent way to
/// override them.
///
/// # Examples
///
/// ```rust
/// use framegrab_core::config::CoreConfigBuilder;
/// use std::time::Duration;
///
/// let config = CoreConfigBuilder::new()
///     .output_dir("/var/lib/framegrab/frames")
///     .probe_timeout(Some(Duration::from_secs(30)))
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// ffmpeg binary used for seek-and-decode
    pub ffmpeg_path: PathBuf,

    /// ffprobe binary used for duration probing
    pub ffprobe_path: PathBuf,

    /// Directory where extracted frames are written
    pub output_dir: PathBuf,

    /// Output format used when a request does not name one
    pub default_output_format: String,

    /// Protocols passed to `-protocol_whitelist`
    pub protocol_whitelist: Vec<String>,

    /// Limit for one probe; `None` waits indefinitely
    pub probe_timeout: Option<Duration>,

    /// Limit for one frame extraction; `None` waits indefinitely
    pub extract_timeout: Option<Duration>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            default_output_format: crate::models::DEFAULT_OUTPUT_FORMAT.to_string(),
            protocol_whitelist: DEFAULT_PROTOCOL_WHITELIST
                .iter()
                .map(|p| p.to_string())
                .collect(),
            probe_timeout: Some(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS)),
            extract_timeout: Some(Duration::from_secs(DEFAULT_EXTRACT_TIMEOUT_SECS)),
        }
    }
}

impl CoreConfig {
    /// The whitelist in the comma-separated form ffmpeg expects.
    pub fn protocol_whitelist_arg(&self) -> String {
        self.protocol_whitelist.join(",")
    }

    /// Checks the configuration for values that would make every request fail.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffmpeg path must not be empty".to_string()));
        }
        if self.ffprobe_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffprobe path must not be empty".to_string()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(CoreError::Config("output directory must not be empty".to_string()));
        }
        if self.protocol_whitelist.is_empty() {
            return Err(CoreError::Config(
                "protocol whitelist must contain at least one protocol".to_string(),
            ));
        }
        if let Some(bad) = self
            .protocol_whitelist
            .iter()
            .find(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()))
        {
            return Err(CoreError::Config(format!(
                "invalid protocol name in whitelist: '{bad}'"
            )));
        }
        validate_output_format(&self.default_output_format)
            .map_err(|e| CoreError::Config(format!("default output format: {e}")))?;
        Ok(())
    }
}

/// Converts a timeout given in whole seconds, where zero means "no limit".
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.protocol_whitelist_arg(), "file,http,https,tcp,tls,crypto");
        assert_eq!(config.output_dir, PathBuf::from("extracted_frames"));
        assert_eq!(config.default_output_format, "jpg");
    }

    #[test]
    fn test_validate_rejects_bad_whitelist() {
        let mut config = CoreConfig::default();
        config.protocol_whitelist = vec![];
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.protocol_whitelist = vec!["http".to_string(), "pipe,concat".to_string()];
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_default_format() {
        let mut config = CoreConfig::default();
        config.default_output_format = "../jpg".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_timeout_from_secs() {
        assert_eq!(timeout_from_secs(0), None);
        assert_eq!(timeout_from_secs(15), Some(Duration::from_secs(15)));
    }
}
