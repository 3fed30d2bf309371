//! CLI module providing command-line interface functionality
//!
//! This module handles argument parsing and routing to the appropriate
//! handlers while maintaining separation of concerns.

pub mod commands;
pub mod context;
pub mod handlers;

use anyhow::Result;
use clap::Parser;

pub use commands::{Cli, Commands, SendArgs};
pub use context::CliContext;
pub use handlers::CommandHandler;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and execute the requested command
    pub async fn run() -> Result<()> {
        let cli = Cli::parse();

        let context = CliContext::new(cli.config.clone(), cli.verbose)?;
        context.init_logging()?;

        let handler = CommandHandler::new(context);

        // `send` with its defaults when called without subcommand
        let command = cli
            .command
            .unwrap_or_else(|| Commands::Send(SendArgs::default()));

        handler.handle_command(command).await
    }
}
