use std::collections::HashSet;

use scaffolding_sdk::IdentityRecord;
use serde::{Deserialize, Serialize};

use crate::domain::name::IdentityName;

/// Configuration for the scaffolding module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScaffoldingConfig {
    /// Identities served by the built-in in-memory store.
    pub identities: Vec<IdentitySeed>,
}

/// One identity entry in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentitySeed {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<IdentitySeed> for IdentityRecord {
    fn from(seed: IdentitySeed) -> Self {
        Self {
            name: seed.name,
            id: seed.id,
            email: seed.email,
        }
    }
}

impl ScaffoldingConfig {
    /// Reject seeds that could never be looked up, and duplicates.
    ///
    /// # Errors
    /// Describes the first offending entry.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for (idx, seed) in self.identities.iter().enumerate() {
            let name = IdentityName::parse(&seed.name)
                .map_err(|e| anyhow::anyhow!("scaffolding.identities[{idx}]: {e}"))?;
            if name.as_str() != seed.name {
                anyhow::bail!(
                    "scaffolding.identities[{idx}]: name must not have surrounding whitespace"
                );
            }
            if seed.id.trim().is_empty() {
                anyhow::bail!("scaffolding.identities[{idx}]: id must not be empty");
            }
            if !seen.insert(seed.name.as_str()) {
                anyhow::bail!(
                    "scaffolding.identities[{idx}]: duplicate identity name '{}'",
                    seed.name
                );
            }
        }
        Ok(())
    }
}
