//! Porter CLI
//!
//! Command-line interface for the Porter web service and job tokens.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "porter")]
#[command(about = "Porter data portability CLI", long_about = None)]
struct Cli {
    /// Porter web service URL
    #[arg(long, env = "PORTER_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Cookie the web service reads the job token from
    #[arg(long, env = "PORTER_ID_COOKIE", default_value = "encoded_id")]
    id_cookie: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.url,
        id_cookie: cli.id_cookie,
    };

    handle_command(cli.command, &config).await
}
