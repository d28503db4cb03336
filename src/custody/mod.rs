// src/custody/mod.rs
//! Key-custody boundary.
//!
//! The agent never touches private key material: key creation and digest
//! signing happen at an external custody service reached through the
//! [`KeyCustody`] trait. Implementations receive a pre-computed digest and
//! return the raw `r ‖ s` signature bytes; converting that into DER is the
//! signing pipeline's job, not the custody backend's.

pub mod software;

use async_trait::async_trait;
use thiserror::Error;

pub use software::SoftwareKeyCustody;

/// Failures at the key-custody boundary.
///
/// Propagated to callers unchanged; the agent performs no retries.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// The named key/version pair does not exist at the custody service.
    #[error("signing key {name}/{version} not found in custody")]
    KeyNotFound { name: String, version: String },

    /// The backend cannot sign with the requested algorithm.
    #[error("unsupported signing algorithm {0}")]
    UnsupportedAlgorithm(String),

    /// Opaque backend fault (auth failure, transport error, HSM fault).
    #[error("custody backend failure: {0}")]
    Backend(String),
}

/// Result of provisioning a new signing key.
#[derive(Debug, Clone)]
pub struct CreatedKey {
    /// Backend-assigned version identifier for the new key
    pub version: String,

    /// Raw big-endian x coordinate of the public point
    pub x: Vec<u8>,

    /// Raw big-endian y coordinate of the public point
    pub y: Vec<u8>,
}

/// An external service holding the agent's signing keys.
#[async_trait]
pub trait KeyCustody: Send + Sync {
    /// Provisions a secp256k1 signing key under `name`, returning its
    /// fresh version identifier and public point.
    async fn create_key(&self, name: &str) -> Result<CreatedKey, CustodyError>;

    /// Signs a pre-computed digest with the identified key.
    ///
    /// # Arguments
    /// * `name`, `version` - Which stored key to sign with
    /// * `algorithm` - Algorithm tag; this agent always passes `ES256K`
    /// * `digest` - Binary SHA-256 digest of the signing input
    ///
    /// # Returns
    /// Raw signature bytes: two equal-width big-endian unsigned integers
    /// `r ‖ s` concatenated (64 bytes for secp256k1).
    async fn sign(
        &self,
        name: &str,
        version: &str,
        algorithm: &str,
        digest: &[u8],
    ) -> Result<Vec<u8>, CustodyError>;
}
