// src/models/identity.rs
//! The agent's signing identity.

use serde::{Deserialize, Serialize};

/// The (DID, key name, key version) triple every signature is attributed to.
///
/// Created once at DID registration, persisted as the agent's configuration
/// document, and treated as immutable afterwards. Signing code receives it
/// by reference; nothing mutates it after construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SigningIdentity {
    /// The registered DID, e.g. `did:ion:...`
    pub did: String,

    /// Name of the signing key at the custody service
    pub key_name: String,

    /// Version identifier of the signing key
    pub key_version: String,
}

impl SigningIdentity {
    /// Fully-qualified key identifier used in credential JWT headers:
    /// `<did>#<keyVersion>`.
    pub fn credential_kid(&self) -> String {
        format!("{}#{}", self.did, self.key_version)
    }
}
