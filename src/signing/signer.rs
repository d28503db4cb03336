// src/signing/signer.rs
//! Compact-serialization signer.
//!
//! Builds the three-part `header.payload.signature` tokens this agent
//! produces: issued Verifiable Credential JWTs and DID registration
//! requests. Both run the same pipeline (compact JSON, base64url, SHA-256
//! digest, raw (r, s) signature from key custody, DER conversion) and
//! differ only in header shape:
//!
//! - credentials carry a base64url JOSE header inside the token;
//! - registration signs with an EMPTY header segment (the signing input is
//!   `"." + payload`) and ships its header as a plain JSON object in the
//!   request body, per the registration network's wire format.
//!
//! The signer is stateless; concurrent signing calls share nothing mutable.
//! No retries, no partial results: any custody or encoding failure surfaces
//! as a typed error.

use crate::custody::KeyCustody;
use crate::error::AgentError;
use crate::models::credential::{RegistrationHeader, RegistrationRequest};
use crate::models::did::DidDocument;
use crate::signing::der::{encode_der, split_raw_signature};
use crate::signing::{base64url, SIGNING_ALGORITHM};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// JOSE header of an issued credential JWT.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JwtHeader {
    /// Signing algorithm, always `ES256K`
    pub alg: String,

    /// Token type, `JWT`
    pub typ: String,

    /// Fully-qualified key identifier, `<did>#<keyVersion>`
    pub kid: String,
}

impl JwtHeader {
    /// Standard ES256K JWT header pointing at `kid`.
    pub fn es256k(kid: String) -> Self {
        JwtHeader {
            alg: SIGNING_ALGORITHM.to_string(),
            typ: "JWT".to_string(),
            kid,
        }
    }
}

/// A finished compact serialization: three base64url segments joined by `.`.
///
/// Immutable once constructed; built exactly once per signing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactToken(String);

impl CompactToken {
    /// The full `header.payload.signature` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, yielding the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// The three segments in order. The header segment is non-empty for
    /// every token this type is used for (registration signing inputs never
    /// become a `CompactToken`).
    pub fn segments(&self) -> (&str, &str, &str) {
        let mut parts = self.0.splitn(3, '.');
        // Constructed from three joined segments, so all three exist.
        (
            parts.next().unwrap_or(""),
            parts.next().unwrap_or(""),
            parts.next().unwrap_or(""),
        )
    }
}

impl fmt::Display for CompactToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signs compact serializations with a key held by an external custody
/// service.
pub struct CompactSigner<C: KeyCustody> {
    /// Shared custody handle (thread-safe via Arc)
    custody: Arc<C>,
}

impl<C: KeyCustody> CompactSigner<C> {
    pub fn new(custody: Arc<C>) -> Self {
        CompactSigner { custody }
    }

    /// Signs an arbitrary header/payload pair into a compact JWT.
    ///
    /// # Arguments
    /// * `header` - JOSE header object, serialized to compact JSON
    /// * `payload` - Claim set, serialized to compact JSON
    /// * `key_name`, `key_version` - Custody key the signature is made with
    ///
    /// # Returns
    /// The `header.payload.signature` compact token, or the first error the
    /// pipeline hit (serialization, custody, signature conversion).
    pub async fn sign_claims<H, P>(
        &self,
        header: &H,
        payload: &P,
        key_name: &str,
        key_version: &str,
    ) -> Result<CompactToken, AgentError>
    where
        H: Serialize,
        P: Serialize,
    {
        let encoded_header = base64url(&serde_json::to_vec(header)?);
        let encoded_payload = base64url(&serde_json::to_vec(payload)?);
        let signing_input = format!("{}.{}", encoded_header, encoded_payload);
        let encoded_signature = self
            .signature_for_input(&signing_input, key_name, key_version)
            .await?;
        Ok(CompactToken(format!(
            "{}.{}",
            signing_input, encoded_signature
        )))
    }

    /// Signs a DID document into a registration request.
    ///
    /// The registration network's signing input has no header segment: the
    /// document is signed as `"." + payload`, and the header travels as a
    /// structured JSON object beside the payload instead of inside the
    /// token.
    pub async fn sign_registration(
        &self,
        document: &DidDocument,
        key_name: &str,
        key_version: &str,
    ) -> Result<RegistrationRequest, AgentError> {
        let encoded_payload = base64url(&serde_json::to_vec(document)?);
        let signing_input = format!(".{}", encoded_payload);
        let encoded_signature = self
            .signature_for_input(&signing_input, key_name, key_version)
            .await?;
        Ok(RegistrationRequest {
            header: RegistrationHeader::create(format!("#{}", key_version)),
            payload: encoded_payload,
            signature: encoded_signature,
        })
    }

    /// Hashes a signing input, has custody sign the digest, and converts
    /// the raw (r, s) result into a base64url DER signature.
    async fn signature_for_input(
        &self,
        signing_input: &str,
        key_name: &str,
        key_version: &str,
    ) -> Result<String, AgentError> {
        let digest = Sha256::digest(signing_input.as_bytes());
        let raw = self
            .custody
            .sign(key_name, key_version, SIGNING_ALGORITHM, &digest)
            .await?;
        let (r, s) = split_raw_signature(&raw)?;
        let der = encode_der(&[r, s])?;
        Ok(base64url(&der))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custody::{CreatedKey, CustodyError};
    use crate::signing::der::EncodingError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Custody stub that records digests and replays a canned signature.
    struct StubCustody {
        raw_signature: Vec<u8>,
        digests: Mutex<Vec<Vec<u8>>>,
    }

    impl StubCustody {
        fn returning(raw_signature: Vec<u8>) -> Arc<Self> {
            Arc::new(StubCustody {
                raw_signature,
                digests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl KeyCustody for StubCustody {
        async fn create_key(&self, _name: &str) -> Result<CreatedKey, CustodyError> {
            Err(CustodyError::Backend("stub has no key creation".to_string()))
        }

        async fn sign(
            &self,
            _name: &str,
            _version: &str,
            algorithm: &str,
            digest: &[u8],
        ) -> Result<Vec<u8>, CustodyError> {
            assert_eq!(algorithm, "ES256K");
            self.digests.lock().unwrap().push(digest.to_vec());
            Ok(self.raw_signature.clone())
        }
    }

    fn decode(segment: &str) -> Vec<u8> {
        base64::decode_config(segment, base64::URL_SAFE_NO_PAD).unwrap()
    }

    fn known_raw_signature() -> Vec<u8> {
        let mut raw = vec![0x11u8; 64];
        raw[0] = 0x7f; // r: no pad
        raw[32] = 0x80; // s: padded
        raw
    }

    #[tokio::test]
    async fn test_credential_token_known_answer() {
        let custody = StubCustody::returning(known_raw_signature());
        let signer = CompactSigner::new(custody.clone());

        let header = JwtHeader::es256k("did:example:123#key1".to_string());
        let payload = serde_json::json!({"sub": "did:alice", "iss": "did:example:123"});
        let token = signer
            .sign_claims(&header, &payload, "signing-key", "key1")
            .await
            .unwrap();

        // Exactly two dots, three non-empty segments
        assert_eq!(token.as_str().matches('.').count(), 2);
        let (h, p, s) = token.segments();
        assert!(!h.is_empty() && !p.is_empty() && !s.is_empty());

        // Segments decode back to the canonical JSON that was signed
        assert_eq!(
            decode(h),
            br#"{"alg":"ES256K","typ":"JWT","kid":"did:example:123#key1"}"#
        );
        assert_eq!(decode(p), br#"{"sub":"did:alice","iss":"did:example:123"}"#);

        // Signature segment is the DER wrapping of the stub's raw bytes
        let raw = known_raw_signature();
        let expected_der = encode_der(&[&raw[..32], &raw[32..]]).unwrap();
        assert_eq!(decode(s), expected_der);

        // Custody was handed the binary SHA-256 of "header.payload"
        let digests = custody.digests.lock().unwrap();
        assert_eq!(digests.len(), 1);
        let expected = Sha256::digest(format!("{}.{}", h, p).as_bytes());
        assert_eq!(digests[0], expected.to_vec());
    }

    #[tokio::test]
    async fn test_registration_request_shape() {
        let custody = StubCustody::returning(known_raw_signature());
        let signer = CompactSigner::new(custody.clone());

        let jwk = crate::models::did::PublicKeyJwk::secp256k1(
            "v1",
            "eA".to_string(),
            "eQ".to_string(),
        );
        let document = DidDocument::for_key(jwk);
        let request = signer
            .sign_registration(&document, "signing-key", "v1")
            .await
            .unwrap();

        // Header travels as a structured object, not a base64url segment
        assert_eq!(request.header.alg, "ES256K");
        assert_eq!(request.header.kid, "#v1");
        assert_eq!(request.header.operation, "create");
        assert_eq!(request.header.proof_of_work, "{}");

        // Payload decodes back to the signed DID document
        let decoded: DidDocument = serde_json::from_slice(&decode(&request.payload)).unwrap();
        assert_eq!(decoded.public_key[0].id, "#v1");

        // Signed with an empty header segment: digest of "." + payload
        let digests = custody.digests.lock().unwrap();
        let expected = Sha256::digest(format!(".{}", request.payload).as_bytes());
        assert_eq!(digests[0], expected.to_vec());
    }

    #[tokio::test]
    async fn test_odd_length_raw_signature_rejected() {
        let custody = StubCustody::returning(vec![0x01u8; 63]);
        let signer = CompactSigner::new(custody);
        let err = signer
            .sign_claims(
                &JwtHeader::es256k("kid".to_string()),
                &serde_json::json!({}),
                "k",
                "v",
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::Encoding(EncodingError::OddLength(63))
        ));
    }

    #[tokio::test]
    async fn test_empty_raw_signature_rejected() {
        let custody = StubCustody::returning(Vec::new());
        let signer = CompactSigner::new(custody);
        let err = signer
            .sign_claims(
                &JwtHeader::es256k("kid".to_string()),
                &serde_json::json!({}),
                "k",
                "v",
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::Encoding(EncodingError::EmptySignature)
        ));
    }

    #[tokio::test]
    async fn test_custody_failure_propagates() {
        struct FailingCustody;

        #[async_trait]
        impl KeyCustody for FailingCustody {
            async fn create_key(&self, _name: &str) -> Result<CreatedKey, CustodyError> {
                unreachable!()
            }
            async fn sign(
                &self,
                name: &str,
                version: &str,
                _algorithm: &str,
                _digest: &[u8],
            ) -> Result<Vec<u8>, CustodyError> {
                Err(CustodyError::KeyNotFound {
                    name: name.to_string(),
                    version: version.to_string(),
                })
            }
        }

        let signer = CompactSigner::new(Arc::new(FailingCustody));
        let err = signer
            .sign_claims(
                &JwtHeader::es256k("kid".to_string()),
                &serde_json::json!({}),
                "missing",
                "v1",
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::Custody(CustodyError::KeyNotFound { .. })
        ));
    }
}
