// ============================================================================
// framegrab-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// This module implements the builder pattern for the CoreConfig structure,
// providing a fluent API for creating and configuring CoreConfig instances.
// Unset fields keep the defaults from `CoreConfig::default()`.
//
// AI-ASSISTANT-INFO: Builder pattern implementation for CoreConfig

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ---- Internal crate imports ----
use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use framegrab_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .ffmpeg_path("/usr/local/bin/ffmpeg")
///     .ffprobe_path("/usr/local/bin/ffprobe")
///     .output_dir("frames")
///     .default_output_format("png")
///     .extract_timeout(None)
///     .build();
/// assert_eq!(config.default_output_format, "png");
/// assert!(config.extract_timeout.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ffmpeg binary.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = path.into();
        self
    }

    /// Sets the ffprobe binary.
    pub fn ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffprobe_path = path.into();
        self
    }

    /// Sets the directory extracted frames are written to.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Sets the output format used when a request does not name one.
    pub fn default_output_format(mut self, format: impl Into<String>) -> Self {
        self.config.default_output_format = format.into();
        self
    }

    /// Replaces the protocol whitelist.
    pub fn protocol_whitelist<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.protocol_whitelist = protocols.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the probe timeout; `None` disables it.
    pub fn probe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    /// Sets the per-frame extraction timeout; `None` disables it.
    pub fn extract_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.extract_timeout = timeout;
        self
    }

    /// Builds the CoreConfig. Call `validate()` on the result before use.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}
