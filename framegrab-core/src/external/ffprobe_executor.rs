//! FFprobe integration for duration discovery
//!
//! This module builds the ffprobe invocation used to read the container
//! duration of a (possibly remote) media resource and parses its JSON output.
//! Exactly one process is spawned per probe and failures are never retried.
use super::{CommandSpec, ProcessRunner, RunControl};
use crate::cancellation::CancellationToken;
use crate::config::CoreConfig;
use crate::error::{CoreResult, ProbeError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<Value>,
}

/// Builds the ffprobe command that prints `format.duration` as JSON.
pub fn build_probe_command(config: &CoreConfig, url: &str) -> CommandSpec {
    CommandSpec::new(&config.ffprobe_path)
        .args(["-v", "error"])
        .args(["-show_entries", "format=duration"])
        .args(["-of", "json"])
        .arg("-protocol_whitelist")
        .arg(config.protocol_whitelist_arg())
        .arg(url)
}

/// Extracts the duration in seconds from ffprobe's JSON output.
///
/// ffprobe reports the duration as a decimal string; a bare JSON number is
/// accepted as well.
pub fn parse_duration(stdout: &str) -> Result<f64, ProbeError> {
    let parsed: ProbeOutput =
        serde_json::from_str(stdout).map_err(|e| ProbeError::InvalidOutput(e.to_string()))?;

    let raw = parsed
        .format
        .and_then(|f| f.duration)
        .ok_or(ProbeError::MissingDuration)?;

    let duration = match &raw {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
    .ok_or_else(|| ProbeError::InvalidDuration(raw.to_string()))?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(ProbeError::InvalidDuration(raw.to_string()));
    }
    Ok(duration)
}

/// Probes `url` for its total duration in seconds.
///
/// # Returns
///
/// * `Ok(f64)` - The duration reported by ffprobe
/// * `Err(CoreError::Probe)` - ffprobe failed or its output had no usable duration
/// * `Err(CoreError)` - ffprobe could not be started, timed out, or was cancelled
pub fn probe_duration<R: ProcessRunner + ?Sized>(
    runner: &R,
    config: &CoreConfig,
    url: &str,
    cancel: &CancellationToken,
) -> CoreResult<f64> {
    let spec = build_probe_command(config, url);
    log::debug!("Probing duration of {}", url);

    let control = RunControl::new(config.probe_timeout, cancel.clone());
    let output = runner.run(&spec, &control)?;

    if !output.success() {
        log::error!(
            "ffprobe exited with {:?} for {}: {}",
            output.exit_code,
            url,
            output.stderr.trim()
        );
        return Err(ProbeError::ToolFailed {
            exit_code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        }
        .into());
    }

    let duration = parse_duration(&output.stdout)?;
    log::debug!("Duration of {} is {:.3}s", url, duration);
    Ok(duration)
}
