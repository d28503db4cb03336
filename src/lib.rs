// src/lib.rs

//! # Enterprise DID Agent
//!
//! A demo "enterprise agent" that registers a Decentralized Identifier
//! (DID) with a remote registration network, persists the resulting
//! configuration, and issues signed Verifiable Credentials (compact JWTs)
//! using a key held by an external key-custody service.
//!
//! ## Architecture Overview
//! 1. **Signing Layer**: raw (r, s) → ASN.1 DER signature conversion and
//!    the JOSE compact-serialization pipeline ([`signing`])
//! 2. **Custody Layer**: the external key-custody boundary plus an
//!    in-process secp256k1 implementation ([`custody`])
//! 3. **Storage Layer**: persistence of the DID configuration ([`storage`])
//! 4. **Services Layer**: DID registration flow and credential issuance
//!    ([`services`])
//!
//! Network transport to the custody service and the registration network
//! is out of scope; both are traits implemented by the embedding
//! application.
//!
//! ## Quick start
//! ```no_run
//! use enterprise_did_agent::custody::SoftwareKeyCustody;
//! use enterprise_did_agent::services::agent::EnterpriseAgent;
//! use enterprise_did_agent::services::registrar::{DidRegistrar, RegisteredDid, RegistrarError};
//! use enterprise_did_agent::models::credential::RegistrationRequest;
//! use enterprise_did_agent::storage::MemoryConfigStore;
//! use std::sync::Arc;
//!
//! struct LocalRegistrar;
//!
//! #[async_trait::async_trait]
//! impl DidRegistrar for LocalRegistrar {
//!     async fn register(&self, _request: &RegistrationRequest) -> Result<RegisteredDid, RegistrarError> {
//!         Ok(RegisteredDid { id: "did:example:123".to_string() })
//!     }
//! }
//!
//! # async fn run() -> Result<(), enterprise_did_agent::error::AgentError> {
//! let custody = Arc::new(SoftwareKeyCustody::new());
//! let store = MemoryConfigStore::new();
//! let agent = EnterpriseAgent::bootstrap(custody, &store, &LocalRegistrar).await?;
//! let jwt = agent
//!     .issue_credential("did:alice", serde_json::json!({"degree": "BSc"}))
//!     .await?;
//! println!("{}", jwt);
//! # Ok(())
//! # }
//! ```

// Module declarations (organized by functional domain)
pub mod custody; // Key-custody boundary + software backend
pub mod error; // Typed error taxonomy
pub mod models; // Data structures
pub mod services; // Registration flow and credential issuance
pub mod signing; // DER conversion and compact serialization
pub mod storage; // DID configuration persistence

pub use error::AgentError;
pub use models::identity::SigningIdentity;
pub use services::agent::EnterpriseAgent;
pub use signing::signer::{CompactSigner, CompactToken, JwtHeader};
