// ============================================================================
// framegrab-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with External CLI Tools and File System
//
// This module encapsulates interactions with ffprobe and ffmpeg, as well as
// the file system queries needed to verify extracted frames. It provides
// abstractions through traits and concrete implementations so the pipeline
// can be exercised without spawning real processes.
//
// KEY COMPONENTS:
// - ProcessRunner: executes a command and returns exit code, stdout, stderr
// - FileMetadataProvider: directory creation and file size queries
// - Duration probing (ffprobe_executor) and frame extraction (ffmpeg_executor)
// - Dependency checking
// - Test doubles (mocks)
//
// AI-ASSISTANT-INFO: External tool interactions and abstractions for ffmpeg/ffprobe

// ---- Internal crate imports ----
use crate::cancellation::CancellationToken;
use crate::error::{CoreResult, command_start_error};

// ---- Standard library imports ----
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Frame extraction with ffmpeg
pub mod ffmpeg_executor;

/// Duration probing with ffprobe
pub mod ffprobe_executor;

/// Test doubles for the process runner
pub mod mocks;

/// Process runner backed by std::process
pub mod process;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{build_extract_command, extract_frame};
pub use ffprobe_executor::{build_probe_command, parse_duration, probe_duration};
pub use process::StdProcessRunner;

// ============================================================================
// PROCESS EXECUTION ABSTRACTION
// ============================================================================

/// A program and its arguments, independent of how it is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Captures the program and arguments of a configured `Command`.
    pub fn from_command(cmd: &Command) -> Self {
        Self {
            program: PathBuf::from(cmd.get_program()),
            args: cmd
                .get_args()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// The program's file name, e.g. "ffmpeg" for "/usr/bin/ffmpeg".
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }

    /// Index of the first argument equal to `arg`.
    pub fn position_of(&self, arg: &str) -> Option<usize> {
        self.args.iter().position(|a| a == arg)
    }

    /// The argument following the first occurrence of `flag`.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.position_of(flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Limits applied to one process run.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    pub timeout: Option<Duration>,
    pub cancel: CancellationToken,
}

impl RunControl {
    pub fn new(timeout: Option<Duration>, cancel: CancellationToken) -> Self {
        Self { timeout, cancel }
    }
}

/// Trait representing something that can execute an external command.
///
/// A non-zero exit code is reported through `ProcessOutput`, not as an error;
/// errors are reserved for processes that could not be started, that timed
/// out, or that were cancelled.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec, control: &RunControl) -> CoreResult<ProcessOutput>;
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs `<program> -version` and discards its output.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(program: &Path) -> CoreResult<()> {
    let result = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", program.display());
            Ok(())
        }
        Err(e) => {
            log::warn!("Dependency '{}' is not usable: {}", program.display(), e);
            Err(command_start_error(program.display().to_string(), e))
        }
    }
}

// ============================================================================
// FILE METADATA ACCESS
// ============================================================================

/// Trait for abstracting the file system operations the pipeline needs.
pub trait FileMetadataProvider: Send + Sync {
    /// Creates `dir` and its parents if they do not exist yet.
    fn ensure_dir(&self, dir: &Path) -> CoreResult<()>;

    /// Gets the size of the file at the given path in bytes.
    fn get_size(&self, path: &Path) -> CoreResult<u64>;
}

/// Standard implementation of FileMetadataProvider using the standard library.
#[derive(Debug, Clone, Default)]
pub struct StdFsMetadataProvider;

impl FileMetadataProvider for StdFsMetadataProvider {
    fn ensure_dir(&self, dir: &Path) -> CoreResult<()> {
        std::fs::create_dir_all(dir)?;
        Ok(())
    }

    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        Ok(std::fs::metadata(path)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_lookup() {
        let spec = CommandSpec::new("/usr/bin/ffmpeg").args(["-y", "-ss", "00:00:05.000", "-i", "in"]);
        assert_eq!(spec.program_name(), "ffmpeg");
        assert_eq!(spec.position_of("-ss"), Some(1));
        assert_eq!(spec.value_of("-ss"), Some("00:00:05.000"));
        assert_eq!(spec.value_of("-i"), Some("in"));
        assert_eq!(spec.value_of("-missing"), None);
        assert_eq!(spec.to_string(), "/usr/bin/ffmpeg -y -ss 00:00:05.000 -i in");
    }

    #[test]
    fn test_command_spec_from_command() {
        let mut cmd = Command::new("ffprobe");
        cmd.args(["-v", "error"]);
        let spec = CommandSpec::from_command(&cmd);
        assert_eq!(spec, CommandSpec::new("ffprobe").args(["-v", "error"]));
    }

    #[test]
    fn test_std_fs_metadata_provider() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let provider = StdFsMetadataProvider;

        provider.ensure_dir(&nested).unwrap();
        // Idempotent
        provider.ensure_dir(&nested).unwrap();

        let file = nested.join("frame.jpg");
        assert!(provider.get_size(&file).is_err());
        std::fs::write(&file, b"abc").unwrap();
        assert_eq!(provider.get_size(&file).unwrap(), 3);
    }

    #[test]
    fn test_check_dependency_missing_binary() {
        let result = check_dependency(Path::new("framegrab-definitely-not-a-real-binary"));
        assert!(matches!(
            result,
            Err(crate::error::CoreError::DependencyNotFound(_))
        ));
    }
}
