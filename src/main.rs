//! tilesnap - keyboard-driven window snapping
//!
//! Binary entry point. Parses the command line, sets up logging and runs
//! the selected command on the tokio runtime.

use tilesnap::{cli::run_cli, Result};

#[tokio::main]
async fn main() -> Result<()> {
    run_cli().await
}
