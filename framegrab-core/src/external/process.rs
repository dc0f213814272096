// ============================================================================
// framegrab-core/src/external/process.rs
// ============================================================================
//
// PROCESS RUNNER: std::process Implementation of ProcessRunner
//
// Spawns the command with piped stdout/stderr, drains both pipes on reader
// threads so a chatty child cannot block on a full pipe, and polls the child
// until it exits, the timeout elapses, or the cancellation token fires. In the
// latter two cases the child is killed and reaped.
//
// AI-ASSISTANT-INFO: Blocking process execution with timeout and cancellation

use super::{CommandSpec, ProcessOutput, ProcessRunner, RunControl};
use crate::error::{CoreError, CoreResult, command_start_error};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a running child is polled
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Concrete implementation of `ProcessRunner` using `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct StdProcessRunner;

impl StdProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::debug!("Failed to kill child process {}: {}", child.id(), e);
    }
    let _ = child.wait();
}

impl ProcessRunner for StdProcessRunner {
    fn run(&self, spec: &CommandSpec, control: &RunControl) -> CoreResult<ProcessOutput> {
        if control.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        log::debug!("Executing command: {}", spec);

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| command_start_error(spec.program_name(), e))?;

        let stdout_handle = child.stdout.take().map(drain);
        let stderr_handle = child.stderr.take().map(drain);

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if control.cancel.is_cancelled() {
                        log::debug!("Cancelling {} (pid {})", spec.program_name(), child.id());
                        kill_and_reap(&mut child);
                        collect(stdout_handle);
                        collect(stderr_handle);
                        return Err(CoreError::Cancelled);
                    }
                    if let Some(timeout) = control.timeout {
                        if start.elapsed() >= timeout {
                            log::warn!(
                                "{} exceeded its {:?} timeout, killing pid {}",
                                spec.program_name(),
                                timeout,
                                child.id()
                            );
                            kill_and_reap(&mut child);
                            collect(stdout_handle);
                            return Err(CoreError::CommandTimeout {
                                command: spec.program_name(),
                                timeout,
                                stderr: collect(stderr_handle),
                            });
                        }
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    kill_and_reap(&mut child);
                    return Err(CoreError::Io(e));
                }
            }
        };

        let output = ProcessOutput {
            exit_code: status.code(),
            stdout: collect(stdout_handle),
            stderr: collect(stderr_handle),
        };
        log::debug!(
            "{} exited with {:?} after {:.2}s",
            spec.program_name(),
            output.exit_code,
            start.elapsed().as_secs_f64()
        );
        Ok(output)
    }
}
