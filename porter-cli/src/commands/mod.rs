//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod import;
mod token;

pub use import::ImportCommands;
pub use token::TokenCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job token encoding
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
    /// Import authorization
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// Check that the web service is up
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Token { command } => token::handle_token_command(command),
        Commands::Import { command } => import::handle_import_command(command, config).await,
        Commands::Health => import::health(config).await,
    }
}
