// src/services/registrar.rs
//! DID registration network boundary.
//!
//! The agent submits a signed [`RegistrationRequest`] and gets back the
//! DID the network anchored for it. Transport (the Sidetree-style HTTP
//! endpoint the original demo posts to) lives with the caller; this crate
//! only defines the seam.

use crate::models::credential::RegistrationRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures submitting a registration request.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The network could not be reached or did not answer.
    #[error("registration network unreachable: {0}")]
    Unreachable(String),

    /// The network answered but refused the request.
    #[error("registration rejected: {0}")]
    Rejected(String),
}

/// Successful registration response: the anchored DID.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisteredDid {
    /// The DID the network assigned, e.g. `did:ion:...`
    pub id: String,
}

/// A DID registration network.
#[async_trait]
pub trait DidRegistrar: Send + Sync {
    /// Submits a signed registration request, returning the anchored DID.
    async fn register(&self, request: &RegistrationRequest) -> Result<RegisteredDid, RegistrarError>;
}
