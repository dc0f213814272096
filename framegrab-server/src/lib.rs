// framegrab-server/src/lib.rs
//
// Library portion of the Framegrab server application.
// Contains argument definitions, command logic and the HTTP service.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod server;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ExtractArgs, ServeArgs};
pub use commands::extract::run_extract;
pub use commands::serve::run_serve;
pub use server::{AppState, router};
