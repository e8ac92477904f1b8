//! Endpoint deployment settings.
//!
//! Settings are read from a TOML file so the same values seed the endpoint and
//! the adapters deployed next to it. The path comes from `ENDPOINT_CONFIG_PATH`
//! and defaults to `config/endpoint.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bitmap::MAX_ADAPTERS;
use crate::instruction::EndpointInstruction;

pub const CONFIG_PATH_ENV: &str = "ENDPOINT_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/endpoint.toml";

/// Root settings structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointSettings {
    pub endpoint: EndpointSection,
    /// Present when a guardian adapter is deployed alongside the endpoint
    #[serde(default)]
    pub guardian_adapter: Option<GuardianAdapterSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointSection {
    /// This chain's id
    pub chain_id: u16,
    /// Quorum for chain configs that have not set their own
    #[serde(default = "default_recv_threshold")]
    pub default_recv_threshold: u8,
}

fn default_recv_threshold() -> u8 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuardianAdapterSection {
    pub chain_id: u16,
    /// "confirmed" or "finalized"
    #[serde(default = "default_consistency_level")]
    pub consistency_level: String,
    /// Price quoted for delivering one message, in lamports
    #[serde(default)]
    pub message_fee: u64,
}

fn default_consistency_level() -> String {
    "finalized".to_string()
}

impl EndpointSettings {
    /// Loads settings from `ENDPOINT_CONFIG_PATH` or `config/endpoint.toml`.
    ///
    /// Returns an error asking the user to copy the template if the file is missing.
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/endpoint.template.toml config/endpoint.toml\n\
                Then edit config/endpoint.toml with your actual values.",
                config_path.display()
            ));
        }
        let content = std::fs::read_to_string(config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let settings: EndpointSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint.chain_id == 0 {
            return Err(anyhow::anyhow!("Configuration error: endpoint.chain_id cannot be 0"));
        }
        let threshold = usize::from(self.endpoint.default_recv_threshold);
        if threshold == 0 || threshold > MAX_ADAPTERS {
            return Err(anyhow::anyhow!(
                "Configuration error: endpoint.default_recv_threshold must be between 1 and {}, got {}",
                MAX_ADAPTERS,
                threshold
            ));
        }
        if let Some(ref adapter) = self.guardian_adapter {
            if adapter.chain_id != self.endpoint.chain_id {
                return Err(anyhow::anyhow!(
                    "Configuration error: guardian_adapter.chain_id {} differs from endpoint.chain_id {}",
                    adapter.chain_id,
                    self.endpoint.chain_id
                ));
            }
            match adapter.consistency_level.as_str() {
                "confirmed" | "finalized" => {}
                other => {
                    return Err(anyhow::anyhow!(
                        "Configuration error: unknown guardian_adapter.consistency_level '{}'",
                        other
                    ))
                }
            }
        }
        Ok(())
    }

    /// The endpoint `Initialize` instruction for these settings.
    pub fn initialize_instruction(&self) -> EndpointInstruction {
        EndpointInstruction::Initialize {
            chain_id: self.endpoint.chain_id,
            default_recv_threshold: self.endpoint.default_recv_threshold,
        }
    }
}
