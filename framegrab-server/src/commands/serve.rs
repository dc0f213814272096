// framegrab-server/src/commands/serve.rs
//
// Implements the `serve` command: validates the configuration, builds the
// shared batch processor and runs the HTTP service on a tokio runtime.

use crate::cli::ServeArgs;
use crate::server::{self, AppState};
use anyhow::Context;
use framegrab_core::BatchProcessor;

pub fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.tools.to_core_config();
    config.validate()?;
    super::warn_missing_tools(&config);

    log::info!(
        "Frames will be written to {} (probe timeout: {:?}, extract timeout: {:?})",
        config.output_dir.display(),
        config.probe_timeout,
        config.extract_timeout
    );

    let state = AppState::new(BatchProcessor::with_system_tools(config));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(server::serve(args.bind, state))
        .with_context(|| format!("HTTP server on {} failed", args.bind))?;

    log::info!("Server stopped");
    Ok(())
}
