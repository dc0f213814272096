// framegrab-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

//! Test doubles for [`ProcessRunner`].
//!
//! `MockProcessRunner` answers commands from an ordered list of expectations
//! instead of spawning processes. Each expectation is consumed by the first
//! call it matches, and every call is recorded for later assertions.

use super::{CommandSpec, ProcessOutput, ProcessRunner, RunControl};
use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Represents an expected command call and its mock result.
pub struct MockExpectation {
    program: String,
    arg_pattern: Option<String>,
    output: ProcessOutput,
    error: Option<CoreError>,
    /// Bytes written to the command's last argument (the output path)
    dummy_output_bytes: Option<usize>,
    cancel: Option<CancellationToken>,
}

impl MockExpectation {
    /// Expects a call to `program` (matched by file name), exiting 0 with no output.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            arg_pattern: None,
            output: ProcessOutput {
                exit_code: Some(0),
                ..Default::default()
            },
            error: None,
            dummy_output_bytes: None,
            cancel: None,
        }
    }

    /// An ffprobe call reporting `duration` seconds in ffprobe's JSON shape.
    pub fn ffprobe_duration(duration: f64) -> Self {
        Self::new("ffprobe").stdout(format!(
            "{{\n    \"format\": {{\n        \"duration\": \"{duration:.6}\"\n    }}\n}}\n"
        ))
    }

    /// Only match calls where some argument contains `pattern`.
    pub fn matching(mut self, pattern: &str) -> Self {
        self.arg_pattern = Some(pattern.to_string());
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.output.exit_code = Some(code);
        self
    }

    pub fn stdout(mut self, stdout: impl Into<String>) -> Self {
        self.output.stdout = stdout.into();
        self
    }

    pub fn stderr(mut self, stderr: impl Into<String>) -> Self {
        self.output.stderr = stderr.into();
        self
    }

    /// Writes a file of `bytes` bytes to the command's last argument.
    pub fn writes_output(mut self, bytes: usize) -> Self {
        self.dummy_output_bytes = Some(bytes);
        self
    }

    /// Returns `err` instead of an output.
    pub fn fails_with(mut self, err: CoreError) -> Self {
        self.error = Some(err);
        self
    }

    /// Cancels `token` during the call and reports the process as killed.
    pub fn cancels(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn matches(&self, spec: &CommandSpec) -> bool {
        spec.program_name() == self.program
            && self
                .arg_pattern
                .as_ref()
                .is_none_or(|p| spec.args.iter().any(|a| a.contains(p.as_str())))
    }
}

/// Mock implementation of ProcessRunner supporting multiple expectations.
#[derive(Clone, Default)]
pub struct MockProcessRunner {
    expectations: Arc<Mutex<Vec<MockExpectation>>>,
    received_calls: Arc<Mutex<Vec<CommandSpec>>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(&self, expectation: MockExpectation) {
        self.expectations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(expectation);
    }

    /// All commands received so far, in call order.
    pub fn received_calls(&self) -> Vec<CommandSpec> {
        self.received_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Commands received for `program` (matched by file name).
    pub fn calls_to(&self, program: &str) -> Vec<CommandSpec> {
        self.received_calls()
            .into_iter()
            .filter(|c| c.program_name() == program)
            .collect()
    }

    /// Number of expectations not yet consumed.
    pub fn pending_expectations(&self) -> usize {
        self.expectations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl ProcessRunner for MockProcessRunner {
    fn run(&self, spec: &CommandSpec, control: &RunControl) -> CoreResult<ProcessOutput> {
        self.received_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(spec.clone());

        if control.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        let expectation = {
            let mut expectations = self.expectations.lock().unwrap_or_else(|e| e.into_inner());
            expectations
                .iter()
                .position(|exp| exp.matches(spec))
                .map(|index| expectations.remove(index))
        };

        let Some(expectation) = expectation else {
            log::error!("MockProcessRunner: no expectation matched command: {}", spec);
            return Err(CoreError::CommandStart(
                spec.program_name(),
                io::Error::other(format!("MockProcessRunner: unexpected command: {spec}")),
            ));
        };

        log::debug!("MockProcessRunner: matched expectation for '{}'", expectation.program);

        if let Some(bytes) = expectation.dummy_output_bytes {
            if let Some(path) = spec.args.last().map(PathBuf::from) {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, vec![0xFFu8; bytes])?;
            }
        }

        if let Some(token) = expectation.cancel {
            token.cancel();
            return Err(CoreError::Cancelled);
        }

        match expectation.error {
            Some(err) => Err(err),
            None => Ok(expectation.output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expectations_are_consumed_in_order() {
        let runner = MockProcessRunner::new();
        runner.add_expectation(MockExpectation::new("ffmpeg").exit_code(1));
        runner.add_expectation(MockExpectation::new("ffmpeg").exit_code(0));

        let spec = CommandSpec::new("/opt/bin/ffmpeg").arg("-y");
        let control = RunControl::default();
        assert_eq!(runner.run(&spec, &control).unwrap().exit_code, Some(1));
        assert_eq!(runner.run(&spec, &control).unwrap().exit_code, Some(0));
        assert!(runner.run(&spec, &control).is_err());
        assert_eq!(runner.calls_to("ffmpeg").len(), 3);
        assert_eq!(runner.pending_expectations(), 0);
    }

    #[test]
    fn test_pattern_matching() {
        let runner = MockProcessRunner::new();
        runner.add_expectation(MockExpectation::new("ffmpeg").matching("00:00:07").exit_code(7));
        runner.add_expectation(MockExpectation::new("ffmpeg").exit_code(0));

        let control = RunControl::default();
        let first = CommandSpec::new("ffmpeg").args(["-ss", "00:00:01.000"]);
        assert_eq!(runner.run(&first, &control).unwrap().exit_code, Some(0));
        let second = CommandSpec::new("ffmpeg").args(["-ss", "00:00:07.000"]);
        assert_eq!(runner.run(&second, &control).unwrap().exit_code, Some(7));
    }

    #[test]
    fn test_ffprobe_duration_output_parses() {
        let runner = MockProcessRunner::new();
        runner.add_expectation(MockExpectation::ffprobe_duration(10.0));
        let output = runner
            .run(&CommandSpec::new("ffprobe"), &RunControl::default())
            .unwrap();
        assert_eq!(
            crate::external::parse_duration(&output.stdout).unwrap(),
            10.0
        );
    }
}
