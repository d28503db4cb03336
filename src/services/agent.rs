// src/services/agent.rs
//! Enterprise agent orchestration.
//!
//! Ties the boundaries together: on startup the agent loads its signing
//! identity from the configuration store, registering a fresh DID first if
//! none exists (create a key, shape its public JWK, sign the DID document,
//! submit it, persist the identity). Afterwards it issues Verifiable
//! Credential JWTs on request.
//!
//! The identity is frozen at construction. There is no mutable
//! configuration state anywhere in the agent, so concurrent
//! `issue_credential` calls need no locking.

use crate::custody::KeyCustody;
use crate::error::AgentError;
use crate::models::credential::CredentialClaims;
use crate::models::did::{DidDocument, PublicKeyJwk};
use crate::models::identity::SigningIdentity;
use crate::services::registrar::DidRegistrar;
use crate::signing::base64url;
use crate::signing::signer::{CompactSigner, CompactToken, JwtHeader};
use crate::storage::ConfigStore;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

/// Custody name under which the agent's primary signing key is provisioned.
pub const DEFAULT_KEY_NAME: &str = "did-primary-signing-key";

/// The enterprise agent: a registered DID plus the means to sign with it.
pub struct EnterpriseAgent<C: KeyCustody> {
    signer: CompactSigner<C>,
    identity: SigningIdentity,
}

impl<C: KeyCustody> EnterpriseAgent<C> {
    /// Starts the agent, registering a DID first if none is configured.
    ///
    /// # Arguments
    /// * `custody` - Key-custody service holding (or about to hold) the
    ///   signing key
    /// * `store` - Configuration store the identity is loaded from and,
    ///   after a fresh registration, written to
    /// * `registrar` - Registration network, only contacted when no
    ///   identity is stored yet
    pub async fn bootstrap<S, R>(
        custody: Arc<C>,
        store: &S,
        registrar: &R,
    ) -> Result<Self, AgentError>
    where
        S: ConfigStore,
        R: DidRegistrar,
    {
        let identity = match store.fetch().await? {
            Some(identity) => {
                debug!("existing DID configuration found for {}", identity.did);
                identity
            }
            None => {
                info!("no existing DID found, proceeding with DID registration");
                Self::register(&custody, store, registrar).await?
            }
        };

        Ok(EnterpriseAgent {
            signer: CompactSigner::new(custody),
            identity,
        })
    }

    /// Starts the agent from an existing configuration only.
    ///
    /// Fails fast with [`AgentError::ConfigurationMissing`] when no
    /// identity is stored; the agent never signs with a partial or
    /// undefined key identity.
    pub async fn resume<S>(custody: Arc<C>, store: &S) -> Result<Self, AgentError>
    where
        S: ConfigStore,
    {
        let identity = store
            .fetch()
            .await?
            .ok_or(AgentError::ConfigurationMissing)?;
        Ok(EnterpriseAgent {
            signer: CompactSigner::new(custody),
            identity,
        })
    }

    /// The identity this agent signs as.
    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    /// Issues a Verifiable Credential as a signed compact JWT.
    ///
    /// # Arguments
    /// * `subject` - DID of the credential subject
    /// * `contents` - Credential contents, carried in the `vc` claim
    pub async fn issue_credential(
        &self,
        subject: &str,
        contents: serde_json::Value,
    ) -> Result<CompactToken, AgentError> {
        let header = JwtHeader::es256k(self.identity.credential_kid());
        let claims = CredentialClaims {
            sub: subject.to_string(),
            iss: self.identity.did.clone(),
            iat: Utc::now().timestamp_millis(),
            vc: contents,
        };
        let token = self
            .signer
            .sign_claims(
                &header,
                &claims,
                &self.identity.key_name,
                &self.identity.key_version,
            )
            .await?;
        debug!("issued credential for subject {}", subject);
        Ok(token)
    }

    /// Runs the full registration flow and persists the resulting identity.
    async fn register<S, R>(
        custody: &Arc<C>,
        store: &S,
        registrar: &R,
    ) -> Result<SigningIdentity, AgentError>
    where
        S: ConfigStore,
        R: DidRegistrar,
    {
        let created = custody.create_key(DEFAULT_KEY_NAME).await?;
        info!("successfully created signing key version {}", created.version);

        let jwk = PublicKeyJwk::secp256k1(
            &created.version,
            base64url(&created.x),
            base64url(&created.y),
        );
        let document = DidDocument::for_key(jwk);

        let signer = CompactSigner::new(custody.clone());
        let request = signer
            .sign_registration(&document, DEFAULT_KEY_NAME, &created.version)
            .await?;
        info!("successfully signed a DID registration request");

        let registered = registrar.register(&request).await?;

        let identity = SigningIdentity {
            did: registered.id,
            key_name: DEFAULT_KEY_NAME.to_string(),
            key_version: created.version,
        };
        store.store(&identity).await?;
        info!("successfully registered DID {}", identity.did);

        Ok(identity)
    }
}
