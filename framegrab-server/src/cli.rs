// framegrab-server/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use framegrab_core::config::{
    CoreConfig, CoreConfigBuilder, DEFAULT_EXTRACT_TIMEOUT_SECS, DEFAULT_FFMPEG_PATH,
    DEFAULT_FFPROBE_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_PROBE_TIMEOUT_SECS, timeout_from_secs,
};
use std::net::SocketAddr;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Framegrab: still frame extraction from streaming video",
    long_about = "Extracts still frames from remote playlists or media URLs at given timestamps using ffprobe and ffmpeg."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Optional: Directory for log files. Logs go to stderr only when unset.
    #[arg(long, global = true, value_name = "LOG_DIR", env = "FRAMEGRAB_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs the HTTP extraction service
    Serve(ServeArgs),
    /// Extracts frames once and prints the batch result as JSON
    Extract(ExtractArgs),
}

/// Tool and output settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// Directory where extracted frames are written
    #[arg(long, value_name = "DIR", env = "FRAMEGRAB_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// ffmpeg binary
    #[arg(long, value_name = "PATH", env = "FRAMEGRAB_FFMPEG", default_value = DEFAULT_FFMPEG_PATH)]
    pub ffmpeg: PathBuf,

    /// ffprobe binary
    #[arg(long, value_name = "PATH", env = "FRAMEGRAB_FFPROBE", default_value = DEFAULT_FFPROBE_PATH)]
    pub ffprobe: PathBuf,

    /// Seconds before a duration probe is killed (0 disables the limit)
    #[arg(long, value_name = "SECONDS", env = "FRAMEGRAB_PROBE_TIMEOUT", default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    pub probe_timeout: u64,

    /// Seconds before a single frame extraction is killed (0 disables the limit)
    #[arg(long, value_name = "SECONDS", env = "FRAMEGRAB_EXTRACT_TIMEOUT", default_value_t = DEFAULT_EXTRACT_TIMEOUT_SECS)]
    pub extract_timeout: u64,
}

impl ToolArgs {
    pub fn to_core_config(&self) -> CoreConfig {
        CoreConfigBuilder::new()
            .output_dir(&self.output_dir)
            .ffmpeg_path(&self.ffmpeg)
            .ffprobe_path(&self.ffprobe)
            .probe_timeout(timeout_from_secs(self.probe_timeout))
            .extract_timeout(timeout_from_secs(self.extract_timeout))
            .build()
    }
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, value_name = "ADDR", env = "FRAMEGRAB_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub tools: ToolArgs,
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Playlist or media URL
    #[arg(short, long, required = true, value_name = "URL")]
    pub url: String,

    /// Comma-separated timestamps in seconds (e.g., 5,10.5,30)
    #[arg(
        short,
        long,
        required = true,
        value_delimiter = ',',
        allow_hyphen_values = true,
        value_name = "SECONDS"
    )]
    pub timestamps: Vec<f64>,

    /// Output image format, used as the file extension (default: jpg)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Also write one JSON object per batch event to stderr
    #[arg(long, default_value_t = false)]
    pub events_json: bool,

    #[command(flatten)]
    pub tools: ToolArgs,
}
