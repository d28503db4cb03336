// src/storage/file.rs
//! JSON-file configuration store.
//!
//! Persists the configuration document as a single JSON file
//! (conventionally `did-config.json`). A missing file reads back as
//! `None`; any other I/O failure propagates.

use super::{ConfigStore, StoreError};
use crate::models::identity::SigningIdentity;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Default file name of the configuration document.
pub const DID_CONFIG_FILE_NAME: &str = "did-config.json";

/// Stores the configuration document at a fixed filesystem path.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileConfigStore { path: path.into() }
    }

    /// Store backed by [`DID_CONFIG_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        FileConfigStore {
            path: dir.into().join(DID_CONFIG_FILE_NAME),
        }
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn fetch(&self) -> Result<Option<SigningIdentity>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn store(&self, identity: &SigningIdentity) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(identity)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("did-config-test-{}-{}.json", tag, std::process::id()));
        path
    }

    fn identity() -> SigningIdentity {
        SigningIdentity {
            did: "did:example:xyz".to_string(),
            key_name: "did-primary-signing-key".to_string(),
            key_version: "v7".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let store = FileConfigStore::new(temp_path("missing"));
        assert!(store.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_then_fetch() {
        let path = temp_path("roundtrip");
        let store = FileConfigStore::new(&path);

        store.store(&identity()).await.unwrap();
        assert_eq!(store.fetch().await.unwrap(), Some(identity()));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let path = temp_path("malformed");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = FileConfigStore::new(&path);
        let err = store.fetch().await.unwrap_err();
        assert!(matches!(err, StoreError::Format(_)));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
