// framegrab-server/src/commands/extract.rs
//
// Implements the `extract` command: one batch against real ffprobe/ffmpeg,
// result printed to stdout as pretty JSON.
//
// Exit codes:
// - 0: at least one frame was extracted
// - 1: the batch failed (invalid request, probe failure, internal error)
// - 2: the batch completed but produced no frame

use crate::cli::ExtractArgs;
use framegrab_core::{
    BatchProcessor, CancellationToken, EventDispatcher, ExtractionRequest, JsonEventHandler,
    StdFsMetadataProvider, StdProcessRunner,
};
use std::process::ExitCode;
use std::sync::Arc;

/// Exit code for a batch that finished without extracting anything
pub const NO_FRAMES_EXIT_CODE: u8 = 2;

pub fn run_extract(args: ExtractArgs) -> anyhow::Result<ExitCode> {
    let config = args.tools.to_core_config();
    config.validate()?;

    let output_format = args
        .format
        .unwrap_or_else(|| config.default_output_format.clone());
    let request = ExtractionRequest::new(args.url, args.timestamps).with_output_format(output_format);

    let mut events = EventDispatcher::with_logging();
    if args.events_json {
        events.add_handler(Arc::new(JsonEventHandler::new()));
    }

    let processor = BatchProcessor::new(
        config,
        Arc::new(StdProcessRunner::new()),
        Arc::new(StdFsMetadataProvider),
        events,
    );

    let result = processor.process(&request, &CancellationToken::new())?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(NO_FRAMES_EXIT_CODE))
    }
}
