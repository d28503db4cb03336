// src/custody/software.rs
//! In-process software key custody.
//!
//! Keeps secp256k1 signing keys in memory and signs with the `k256` crate.
//! Stands in for a remote custody service during development and tests;
//! the raw-signature wire contract (64-byte `r ‖ s`) is identical to what
//! a real backend returns.

use super::{CreatedKey, CustodyError, KeyCustody};
use crate::signing::SIGNING_ALGORITHM;
use async_trait::async_trait;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Mutex;

/// Thread-safe in-memory key store with ECDSA signing.
///
/// # Security Notes
/// - Key material lives in process memory, unprotected; this is a
///   development backend, not an HSM
/// - Signing is deterministic ECDSA (RFC 6979) with low-S normalization
pub struct SoftwareKeyCustody {
    /// Stored keys indexed by (name, version)
    keys: Mutex<HashMap<(String, String), SigningKey>>,
}

impl SoftwareKeyCustody {
    pub fn new() -> Self {
        SoftwareKeyCustody {
            keys: Mutex::new(HashMap::new()),
        }
    }

    /// Public verification key for a stored signing key.
    ///
    /// Lets callers (primarily tests) check signatures made through
    /// [`KeyCustody::sign`] without exposing the private half.
    pub fn verifying_key(&self, name: &str, version: &str) -> Result<VerifyingKey, CustodyError> {
        let keys = self.keys.lock().unwrap();
        keys.get(&(name.to_string(), version.to_string()))
            .map(|key| key.verifying_key().to_owned())
            .ok_or_else(|| CustodyError::KeyNotFound {
                name: name.to_string(),
                version: version.to_string(),
            })
    }

    fn fresh_version() -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

impl Default for SoftwareKeyCustody {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyCustody for SoftwareKeyCustody {
    async fn create_key(&self, name: &str) -> Result<CreatedKey, CustodyError> {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let version = Self::fresh_version();

        let point = signing_key.verifying_key().to_encoded_point(false);
        let x = point
            .x()
            .ok_or_else(|| CustodyError::Backend("generated key has no x coordinate".to_string()))?
            .to_vec();
        let y = point
            .y()
            .ok_or_else(|| CustodyError::Backend("generated key has no y coordinate".to_string()))?
            .to_vec();

        let mut keys = self.keys.lock().unwrap();
        keys.insert((name.to_string(), version.clone()), signing_key);

        Ok(CreatedKey { version, x, y })
    }

    async fn sign(
        &self,
        name: &str,
        version: &str,
        algorithm: &str,
        digest: &[u8],
    ) -> Result<Vec<u8>, CustodyError> {
        if algorithm != SIGNING_ALGORITHM {
            return Err(CustodyError::UnsupportedAlgorithm(algorithm.to_string()));
        }

        let keys = self.keys.lock().unwrap();
        let signing_key = keys
            .get(&(name.to_string(), version.to_string()))
            .ok_or_else(|| CustodyError::KeyNotFound {
                name: name.to_string(),
                version: version.to_string(),
            })?;

        let signature: Signature = signing_key
            .sign_prehash(digest)
            .map_err(|e| CustodyError::Backend(e.to_string()))?;
        // Low-S form, as verifiers for ES256K expect
        let signature = signature.normalize_s().unwrap_or(signature);

        Ok(signature.to_bytes().to_vec())
    }
}
