//! Token command handlers
//!
//! Converts between job ids and the tokens handed to browsers and
//! authorization providers.

use anyhow::{Context, Result};
use clap::Subcommand;
use porter_core::token;
use uuid::Uuid;

/// Token subcommands
#[derive(Subcommand)]
pub enum TokenCommands {
    /// Encode a job id as a token
    Encode {
        /// Job ID
        job_id: Uuid,
    },
    /// Decode a token back to its job id
    Decode {
        /// Job token
        token: String,
    },
}

/// Handle token commands
pub fn handle_token_command(command: TokenCommands) -> Result<()> {
    match command {
        TokenCommands::Encode { job_id } => println!("{}", token::encode(job_id)),
        TokenCommands::Decode { token } => println!("{}", decode(&token)?),
    }
    Ok(())
}

fn decode(job_token: &str) -> Result<Uuid> {
    token::decode(job_token).with_context(|| format!("Cannot decode job token '{}'", job_token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reports_token() {
        let err = decode("%%").unwrap_err();
        assert!(format!("{:#}", err).contains("'%%'"));
    }

    #[test]
    fn test_decode_encoded() {
        let id = Uuid::new_v4();
        assert_eq!(decode(&token::encode(id)).unwrap(), id);
    }
}
