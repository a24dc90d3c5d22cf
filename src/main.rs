//! Gazelle command-line entry point.

use gazelle_cli::cli::{self, Cli};
use gazelle_cli::core::user_friendly_error;

use clap::Parser;

fn main() {
    let cli = Cli::parse();
    cli::init_logging(&cli.build_config());

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        // Convert to user-friendly error with context and suggestions
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
