//! Import command handlers
//!
//! Drives the import authorization step against a running web service.

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use porter_client::{ClientError, ImportSetupResponse};
use porter_core::token;
use uuid::Uuid;

use crate::config::Config;

/// Import subcommands
#[derive(Subcommand)]
pub enum ImportCommands {
    /// Start import authorization for a job and print the consent URL
    Setup {
        /// Job token (as stored in the browser cookie)
        #[arg(long, conflicts_with = "job_id", required_unless_present = "job_id")]
        token: Option<String>,

        /// Job ID; encoded to a token locally
        #[arg(long)]
        job_id: Option<Uuid>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

/// Handle import commands
pub async fn handle_import_command(command: ImportCommands, config: &Config) -> Result<()> {
    match command {
        ImportCommands::Setup {
            token,
            job_id,
            json,
        } => {
            let job_token = match (token, job_id) {
                (Some(token), _) => token,
                (None, Some(job_id)) => token::encode(job_id),
                (None, None) => bail!("either --token or --job-id is required"),
            };
            setup(config, &job_token, json).await
        }
    }
}

async fn setup(config: &Config, job_token: &str, json: bool) -> Result<()> {
    let client = config.client();

    match client.import_setup(job_token).await {
        Ok(setup) if json => {
            println!("{}", serde_json::to_string_pretty(&setup)?);
            Ok(())
        }
        Ok(setup) => {
            print_setup(&setup);
            Ok(())
        }
        Err(err) => {
            print_error(&err);
            Err(err.into())
        }
    }
}

/// Check the web service health
pub async fn health(config: &Config) -> Result<()> {
    let status = config.client().health().await?;

    println!(
        "{} {} ({} import capabilities)",
        "●".green(),
        status.status.bold(),
        status.capabilities
    );
    Ok(())
}

fn print_setup(setup: &ImportSetupResponse) {
    println!("{}", "Import authorization started".green().bold());
    println!("  {}: {}", "Data type".bold(), setup.data_type);
    println!(
        "  {}: {} {} {}",
        "Transfer".bold(),
        setup.export_service,
        "→".dimmed(),
        setup.import_service
    );
    println!("  {}: {}", "Authorize at".bold(), setup.import_auth_url.cyan());
}

fn print_error(err: &ClientError) {
    match err {
        ClientError::ApiError {
            code,
            reason: Some(reason),
            message,
            ..
        } => eprintln!("{} {} ({}): {}", "✗".red(), code.red(), reason, message),
        ClientError::ApiError { code, message, .. } => {
            eprintln!("{} {}: {}", "✗".red(), code.red(), message)
        }
        other => eprintln!("{} {}", "✗".red(), other),
    }
}
