//! Command handlers for all CLI operations
//!
//! Each command gets a small handler borrowing the [`CliContext`], keeping
//! argument parsing apart from the dispatch logic.

mod devices;
mod send;

pub use devices::DevicesHandler;
pub use send::SendHandler;

use super::{CliContext, Commands};
use anyhow::Result;

/// Routes parsed commands to their handlers
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    /// Create a new command handler instance with the provided context
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    /// Route commands to their appropriate handlers
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Send(args) => SendHandler::new(&self.context).handle_send(args).await,
            Commands::Devices => DevicesHandler::new(&self.context).handle_list(),
        }
    }
}
