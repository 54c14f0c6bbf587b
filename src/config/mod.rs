use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::account::{
    MIN_DEPOSIT, MIN_INITIAL_DEPOSIT, MIN_WITHDRAWAL, RESERVE_FLOOR, TRANSFER_FEE_RATE,
};

/// Monetary rules applied by the validators and transactions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Smallest deposit accepted when opening an account
    pub min_initial_deposit: f64,
    /// Smallest deposit into an existing account
    pub min_deposit: f64,
    /// Smallest withdrawal or transfer
    pub min_withdrawal: f64,
    /// Balance that must remain after a withdrawal or outgoing transfer
    pub reserve_floor: f64,
    /// Fraction of a transfer charged to the sender
    pub transfer_fee_rate: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_initial_deposit: MIN_INITIAL_DEPOSIT,
            min_deposit: MIN_DEPOSIT,
            min_withdrawal: MIN_WITHDRAWAL,
            reserve_floor: RESERVE_FLOOR,
            transfer_fee_rate: TRANSFER_FEE_RATE,
        }
    }
}

impl RulesConfig {
    /// Reject rules the validators cannot work with
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("min_initial_deposit", self.min_initial_deposit),
            ("min_deposit", self.min_deposit),
            ("min_withdrawal", self.min_withdrawal),
            ("reserve_floor", self.reserve_floor),
        ];

        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                bail!("rules.{} must be a non-negative number, got {}", name, value);
            }
        }

        if !(0.0..1.0).contains(&self.transfer_fee_rate) {
            bail!(
                "rules.transfer_fee_rate must be in [0, 1), got {}",
                self.transfer_fee_rate
            );
        }

        Ok(())
    }
}

/// Terminal presentation options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colour headers, errors and success banners
    pub color: bool,
    /// Clear the terminal before drawing each screen
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            clear_screen: true,
        }
    }
}

/// Global application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Application name, shown on the dashboard
    pub app_name: String,
    /// Currency label printed in front of amounts
    pub currency: String,
    pub rules: RulesConfig,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Smart Banking App".to_string(),
            currency: "LKR".to_string(),
            rules: RulesConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Load configuration from file, falling back to defaults when it is absent
pub fn load_config(path: &str) -> Result<Config> {
    // Missing file means defaults
    if !Path::new(path).exists() {
        debug!("No configuration at {}, using defaults", path);
        return Ok(Config::default());
    }

    // Read the config file
    let mut file = File::open(path).context(format!("Failed to open config file: {}", path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .context("Failed to read config file")?;

    // Parse as TOML or JSON by extension
    let config: Config = match path.ends_with(".toml") {
        true => toml::from_str(&contents).context("Failed to parse TOML config")?,
        false => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    // Validate the rules
    config
        .rules
        .validate()
        .context(format!("Invalid rules in {}", path))?;

    Ok(config)
}

/// Save configuration to file
pub fn save_config(path: &str, config: &Config) -> Result<()> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    // Serialize the config
    let serialized = match path.ends_with(".toml") {
        true => toml::to_string_pretty(config).context("Failed to serialize config to TOML")?,
        false => {
            serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?
        }
    };

    // Write to file
    std::fs::write(path, serialized)
        .context(format!("Failed to write config to file: {}", path))?;

    Ok(())
}
