// ============================================================================
// framegrab-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Single Frame Seek-and-Decode
//
// This module builds and runs the ffmpeg invocation that writes one still
// frame at a given timestamp, then verifies the result on disk.
//
// KEY COMPONENTS:
// - build_extract_command: ffmpeg argument construction via ffmpeg-sidecar
// - extract_frame: run + post-condition check (exit code, file exists, size > 0)
//
// ARGUMENT ORDER:
// `-ss` is placed before `-i` so ffmpeg seeks on the input side, jumping to
// the nearest preceding keyframe instead of decoding the stream from the
// start and discarding frames.
//
// AI-ASSISTANT-INFO: FFmpeg frame extraction and output verification

use super::{CommandSpec, FileMetadataProvider, ProcessRunner, RunControl};
use crate::cancellation::CancellationToken;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::models::{ExtractedFrame, ExtractionFailure, FailureReason, FrameStatus};
use crate::utils::{format_bytes, format_timecode};
use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::Path;

/// Pixel format forced on every output image
pub const OUTPUT_PIXEL_FORMAT: &str = "rgb24";

/// Builds the ffmpeg command extracting one frame at `timestamp` into `output_path`.
pub fn build_extract_command(
    config: &CoreConfig,
    url: &str,
    timestamp: f64,
    output_path: &Path,
) -> CommandSpec {
    // new_with_path already starts the arguments with `-loglevel level+info`,
    // so every stderr line carries its level prefix
    let mut cmd = FfmpegCommand::new_with_path(&config.ffmpeg_path);

    cmd.arg("-hide_banner");
    cmd.arg("-y"); // Overwrite unconditionally
    cmd.arg("-protocol_whitelist");
    cmd.arg(config.protocol_whitelist_arg());
    // Input-side seek: must come before -i
    cmd.arg("-ss");
    cmd.arg(format_timecode(timestamp));
    cmd.input(url);
    cmd.arg("-vframes");
    cmd.arg("1");
    cmd.arg("-vf");
    cmd.arg(format!("format={OUTPUT_PIXEL_FORMAT}"));
    cmd.arg("-pix_fmt");
    cmd.arg(OUTPUT_PIXEL_FORMAT);
    cmd.output(output_path.to_string_lossy().as_ref());

    CommandSpec::from_command(cmd.as_inner())
}

/// Extracts a single frame and verifies it.
///
/// The frame counts as extracted only if ffmpeg exited successfully AND the
/// output file exists with a non-zero size; some failed seeks leave an empty
/// file behind while others exit cleanly without writing anything.
///
/// # Returns
///
/// * `Ok(Ok(ExtractedFrame))` - The frame was written and verified
/// * `Ok(Err(ExtractionFailure))` - This timestamp failed; the batch may continue
/// * `Err(CoreError::Cancelled)` - The batch was cancelled while ffmpeg ran
pub fn extract_frame<R, F>(
    runner: &R,
    fs: &F,
    config: &CoreConfig,
    url: &str,
    timestamp: f64,
    output_path: &Path,
    cancel: &CancellationToken,
) -> CoreResult<Result<ExtractedFrame, ExtractionFailure>>
where
    R: ProcessRunner + ?Sized,
    F: FileMetadataProvider + ?Sized,
{
    let spec = build_extract_command(config, url, timestamp, output_path);
    let control = RunControl::new(config.extract_timeout, cancel.clone());

    let failure = |reason: FailureReason, diagnostics: String| ExtractionFailure {
        timestamp,
        output_path: output_path.to_path_buf(),
        reason,
        diagnostics,
    };

    let output = match runner.run(&spec, &control) {
        Ok(output) => output,
        Err(CoreError::Cancelled) => return Err(CoreError::Cancelled),
        Err(CoreError::CommandTimeout { stderr, .. }) => {
            return Ok(Err(failure(FailureReason::TimedOut, stderr)));
        }
        Err(e) => {
            return Ok(Err(failure(FailureReason::ProcessError(e.to_string()), String::new())));
        }
    };

    if !output.success() {
        return Ok(Err(failure(
            FailureReason::NonZeroExit(output.exit_code),
            output.stderr,
        )));
    }

    match fs.get_size(output_path) {
        Ok(size) if size > 0 => {
            log::debug!(
                "Verified frame at {:.3}s: {} ({})",
                timestamp,
                output_path.display(),
                format_bytes(size)
            );
            Ok(Ok(ExtractedFrame {
                file_path: output_path.to_path_buf(),
                requested_timestamp: timestamp,
                status: FrameStatus::Success,
            }))
        }
        Ok(_) => Ok(Err(failure(FailureReason::EmptyOutput, output.stderr))),
        Err(_) => Ok(Err(failure(FailureReason::MissingOutput, output.stderr))),
    }
}
