//! Reader configuration
//!
//! Every address the reader trusts is fixed here rather than negotiated at
//! runtime: the HUB token program that owns property, epoch and claim
//! accounts, the gateway program that owns credentials, and the gatekeeper
//! network a credential must be issued on.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use serde::Deserialize;

use crate::constants::*;
use crate::error::*;
use crate::pda::{derive_address, AddressKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Program expected to own property, epoch and claim accounts
    pub hub_program_id: Pubkey,
    /// Program expected to own gateway tokens
    pub gateway_program_id: Pubkey,
    /// Network a gateway token must be issued on
    pub gatekeeper_network: Pubkey,
    /// Highest epoch number probed when enumerating epochs
    pub max_epoch_probe: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            hub_program_id: crate::ID,
            gateway_program_id: GATEWAY_PROGRAM_ID,
            gatekeeper_network: ID_VERIFICATION_NETWORK,
            max_epoch_probe: DEFAULT_MAX_EPOCH_PROBE,
        }
    }
}

/// On-disk form; every key is optional and falls back to the default
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    hub_program_id: Option<String>,
    gateway_program_id: Option<String>,
    gatekeeper_network: Option<String>,
    max_epoch_probe: Option<u64>,
}

impl ReaderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| HubReaderError::Config(format!("failed to parse config: {e}")))?;

        let defaults = Self::default();
        let config = Self {
            hub_program_id: parse_or(
                "hub_program_id",
                file.hub_program_id.as_deref(),
                defaults.hub_program_id,
            )?,
            gateway_program_id: parse_or(
                "gateway_program_id",
                file.gateway_program_id.as_deref(),
                defaults.gateway_program_id,
            )?,
            gatekeeper_network: parse_or(
                "gatekeeper_network",
                file.gatekeeper_network.as_deref(),
                defaults.gatekeeper_network,
            )?,
            max_epoch_probe: file.max_epoch_probe.unwrap_or(defaults.max_epoch_probe),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HubReaderError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reads `HUB_PROGRAM_ID`, `CIVIC_GATEWAY_PROGRAM_ID`,
    /// `CIVIC_GATEKEEPER_NETWORK` and `HUB_MAX_EPOCH_PROBE`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ReaderConfig::from_env`] with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_epoch_probe = match lookup("HUB_MAX_EPOCH_PROBE") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| HubReaderError::Config(format!("HUB_MAX_EPOCH_PROBE: {e}")))?,
            None => defaults.max_epoch_probe,
        };

        let config = Self {
            hub_program_id: parse_or(
                "HUB_PROGRAM_ID",
                lookup("HUB_PROGRAM_ID").as_deref(),
                defaults.hub_program_id,
            )?,
            gateway_program_id: parse_or(
                "CIVIC_GATEWAY_PROGRAM_ID",
                lookup("CIVIC_GATEWAY_PROGRAM_ID").as_deref(),
                defaults.gateway_program_id,
            )?,
            gatekeeper_network: parse_or(
                "CIVIC_GATEKEEPER_NETWORK",
                lookup("CIVIC_GATEKEEPER_NETWORK").as_deref(),
                defaults.gatekeeper_network,
            )?,
            max_epoch_probe,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_epoch_probe == 0 {
            return Err(HubReaderError::Config("max_epoch_probe must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Derives `kind` under the program that owns it
    pub fn derive(&self, kind: &AddressKind) -> (Pubkey, u8) {
        if kind.is_gateway() {
            derive_address(kind, &self.gateway_program_id)
        } else {
            derive_address(kind, &self.hub_program_id)
        }
    }
}

fn parse_or(key: &str, raw: Option<&str>, default: Pubkey) -> Result<Pubkey> {
    match raw {
        Some(value) => Pubkey::from_str(value.trim())
            .map_err(|e| HubReaderError::Config(format!("{key} is not a valid address: {e}"))),
        None => Ok(default),
    }
}
