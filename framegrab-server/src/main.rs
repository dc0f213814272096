// framegrab-server/src/main.rs
//
// Entry point for the `framegrab` binary. Parses the command line, installs
// the logger and dispatches to the selected command.

use clap::Parser;
use framegrab_server::logging::init_logging;
use framegrab_server::{Cli, Commands, run_extract, run_serve};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_dir.as_deref()) {
        eprintln!("Error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Serve(args) => run_serve(args).map(|()| ExitCode::SUCCESS),
        Commands::Extract(args) => run_extract(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
