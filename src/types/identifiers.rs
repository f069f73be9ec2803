use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::aggregation::AggregatorConfig;

/// Content hash of everything that determines a consensus: the aggregator
/// configuration and every ordering, in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputFingerprint(String);

impl InputFingerprint {
    pub fn from_inputs<T: Serialize>(
        config: &AggregatorConfig,
        orderings: &[Vec<T>],
    ) -> Result<Self, serde_json::Error> {
        let mut hasher = Sha256::new();

        // Config first, then one JSON array per ordering. Arrays are
        // self-delimiting so no separator is needed.
        hasher.update(serde_json::to_vec(config)?);
        for ordering in orderings {
            hasher.update(serde_json::to_vec(ordering)?);
        }

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        Ok(InputFingerprint(format!("sha256:{hex}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
