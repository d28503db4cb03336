// src/storage/memory.rs
//! In-memory configuration store for tests and ephemeral deployments.

use super::{ConfigStore, StoreError};
use crate::models::identity::SigningIdentity;
use async_trait::async_trait;
use std::sync::Mutex;

/// Holds the configuration document in process memory.
#[derive(Default)]
pub struct MemoryConfigStore {
    identity: Mutex<Option<SigningIdentity>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an identity, as if registration had already
    /// happened.
    pub fn with_identity(identity: SigningIdentity) -> Self {
        MemoryConfigStore {
            identity: Mutex::new(Some(identity)),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn fetch(&self) -> Result<Option<SigningIdentity>, StoreError> {
        Ok(self.identity.lock().unwrap().clone())
    }

    async fn store(&self, identity: &SigningIdentity) -> Result<(), StoreError> {
        *self.identity.lock().unwrap() = Some(identity.clone());
        Ok(())
    }
}
