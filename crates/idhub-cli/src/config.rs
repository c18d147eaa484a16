//! Optional TOML configuration for the CLI.

use idhub_core::{HubClientConfig, VerifierConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub verifier: VerifierConfig,

    #[serde(default)]
    pub client: HubClientConfig,
}

impl CliConfig {
    /// Load from `path`, or use defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
                Ok(toml::from_str(&contents)?)
            }
            None => Ok(Self::default()),
        }
    }
}
