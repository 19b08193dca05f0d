use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::adapters::memory::{MemoryDirectory, MemoryVoucherStore};
use crate::domain::model::{Portal, Roll, Voucher, VoucherId};
use crate::utils::error::{Result, VoucherError};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};

/// Seed data: the portals, rolls and voucher codes the service starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub portals: Vec<PortalSeed>,
    #[serde(default)]
    pub rolls: Vec<RollSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSeed {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub allow_printing: Vec<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollSeed {
    pub id: u64,
    pub name: String,
    /// Codes listed directly in the file.
    #[serde(default)]
    pub codes: Vec<String>,
    /// Additional codes generated as `{prefix}-{number}`.
    pub generate: Option<GenerateSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSeed {
    pub count: u32,
    pub prefix: String,
}

impl RollSeed {
    /// Explicit codes followed by generated ones.
    pub fn all_codes(&self) -> Vec<String> {
        let mut codes = self.codes.clone();
        if let Some(generate) = &self.generate {
            for n in 1..=generate.count {
                codes.push(format!("{}-{:05}", generate.prefix, n));
            }
        }
        codes
    }
}

impl SeedConfig {
    /// Loads seed data from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VoucherError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses seed data from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR_NAME}` references with environment values, leaving
    /// unknown variables as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Materializes the in-memory store and portal directory. Voucher ids
    /// are assigned sequentially across all rolls, in file order.
    pub fn build(&self) -> (MemoryVoucherStore, MemoryDirectory) {
        let portals: Vec<Portal> = self
            .portals
            .iter()
            .map(|p| Portal {
                id: p.id,
                name: p.name.clone(),
                active: p.active,
                allow_printing: p.allow_printing.clone(),
            })
            .collect();

        let mut rolls = Vec::new();
        let mut vouchers = Vec::new();
        let mut next_id: VoucherId = 1;
        for roll_seed in &self.rolls {
            rolls.push(Roll {
                id: roll_seed.id,
                name: roll_seed.name.clone(),
            });
            for code in roll_seed.all_codes() {
                vouchers.push(Voucher {
                    id: next_id,
                    roll: roll_seed.id,
                    code,
                    printed_at: None,
                    printed_by: None,
                });
                next_id += 1;
            }
        }

        (
            MemoryVoucherStore::with_data(rolls, vouchers),
            MemoryDirectory::new(portals),
        )
    }
}

impl Validate for SeedConfig {
    fn validate(&self) -> Result<()> {
        let mut portal_ids = HashSet::new();
        for portal in &self.portals {
            validate_non_empty_string("portals.name", &portal.name)?;
            if !portal_ids.insert(portal.id) {
                return Err(VoucherError::ConfigError {
                    message: format!("Duplicate portal id: {}", portal.id),
                });
            }
            for group in &portal.allow_printing {
                validate_non_empty_string("portals.allow_printing", group)?;
            }
        }

        // Stray control characters in a code would corrupt the printer
        // stream, so the charset is locked down here.
        let code_re = Regex::new(r"^[A-Za-z0-9-]+$").unwrap();

        let mut roll_ids = HashSet::new();
        for roll in &self.rolls {
            validate_non_empty_string("rolls.name", &roll.name)?;
            if !roll_ids.insert(roll.id) {
                return Err(VoucherError::ConfigError {
                    message: format!("Duplicate roll id: {}", roll.id),
                });
            }

            let mut seen_codes = HashSet::new();
            for code in roll.all_codes() {
                if !code_re.is_match(&code) {
                    return Err(VoucherError::ValidationError {
                        field: "rolls.codes".to_string(),
                        value: code.clone(),
                        reason: "Codes may contain letters, digits and dashes only".to_string(),
                    });
                }
                if !seen_codes.insert(code.clone()) {
                    return Err(VoucherError::ConfigError {
                        message: format!("Duplicate code in roll {}: {}", roll.id, code),
                    });
                }
            }

            if let Some(generate) = &roll.generate {
                validate_positive_number("rolls.generate.count", generate.count as usize, 1)?;
                validate_non_empty_string("rolls.generate.prefix", &generate.prefix)?;
            }
        }

        Ok(())
    }
}
