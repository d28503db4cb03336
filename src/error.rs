// src/error.rs
//! Error taxonomy for the enterprise agent.
//!
//! Every failure surfaces to the caller as a typed error; the agent never
//! recovers internally and never returns a partial result. Callers (an
//! HTTP handler, a CLI) decide presentation and any retry policy.

use crate::custody::CustodyError;
use crate::services::registrar::RegistrarError;
use crate::signing::der::EncodingError;
use crate::storage::StoreError;
use thiserror::Error;

/// Top-level error of every agent operation.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A raw signature could not be converted to DER.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The key-custody service failed or returned an unexpected shape.
    #[error(transparent)]
    Custody(#[from] CustodyError),

    /// The configuration store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The registration network failed or refused the request.
    #[error(transparent)]
    Registration(#[from] RegistrarError),

    /// A signing operation was attempted with no stored identity.
    #[error("no signing identity is configured; register a DID first")]
    ConfigurationMissing,

    /// A header, payload, or document could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
