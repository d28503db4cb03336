// src/storage/mod.rs
//! Persistence of the agent's DID configuration.
//!
//! The configuration document, a serialized [`SigningIdentity`], is
//! written once at registration and read at every startup. Where it lives
//! (blob store, local disk, memory) is a deployment concern behind the
//! [`ConfigStore`] trait; absence of a stored configuration is a value
//! (`Ok(None)`), not an error, because a fresh deployment legitimately has
//! none yet.

pub mod file;
pub mod memory;

use crate::models::identity::SigningIdentity;
use async_trait::async_trait;
use thiserror::Error;

pub use file::FileConfigStore;
pub use memory::MemoryConfigStore;

/// Failures reading or writing the configuration document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("configuration store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document exists but is not a valid configuration.
    #[error("malformed configuration document: {0}")]
    Format(#[from] serde_json::Error),
}

/// Durable home of the agent's signing identity.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Loads the stored identity, or `None` if none has been written yet.
    async fn fetch(&self) -> Result<Option<SigningIdentity>, StoreError>;

    /// Persists the identity, replacing any previous document.
    async fn store(&self, identity: &SigningIdentity) -> Result<(), StoreError>;
}
