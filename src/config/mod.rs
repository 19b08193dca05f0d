pub mod seed;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "voucher-print")]
#[command(about = "Voucher selection and print service for captive portals")]
pub struct CliConfig {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Port to listen on
    #[arg(long, default_value = "8470")]
    pub port: u16,

    /// TOML seed file with portals, rolls and voucher codes
    #[arg(long, default_value = "vouchers.toml")]
    pub seed: String,

    /// Base URL of an external portal directory; overrides seed-file portals
    #[arg(long)]
    pub directory_url: Option<String>,

    /// Emit JSON logs instead of the compact console format
    #[arg(long)]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("bind_address", &self.bind_address)?;
        validate_range("port", self.port, 1, 65535)?;
        validate_non_empty_string("seed", &self.seed)?;
        if let Some(url) = &self.directory_url {
            validate_url("directory_url", url)?;
        }
        Ok(())
    }
}
