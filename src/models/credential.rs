// src/models/credential.rs
//! Verifiable Credential claims and registration wire shapes.
//!
//! Covers the two payloads the agent signs: the JWT claim set of an issued
//! credential, and the request body submitted to the DID registration
//! network. Both are serialized with serde in declaration order; that
//! order is part of the signed bytes and must not change.

use serde::{Deserialize, Serialize};

/// Claim set of an issued Verifiable Credential JWT.
///
/// Matches the standard JWT registered claims plus a `vc` member carrying
/// the credential contents supplied by the caller.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CredentialClaims {
    /// DID of the credential subject
    pub sub: String,

    /// DID of the issuer (the agent's registered DID)
    pub iss: String,

    /// Issuance instant, milliseconds since the Unix epoch
    pub iat: i64,

    /// Caller-supplied credential contents
    pub vc: serde_json::Value,
}

/// Protected header of the registration request.
///
/// Unlike a credential JWT, the registration network wants this as a plain
/// JSON object in the request body, not base64url-encoded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegistrationHeader {
    /// Signing algorithm identifier, always `ES256K`
    pub alg: String,

    /// Key identifier fragment, `#<keyVersion>`
    pub kid: String,

    /// Sidetree operation type
    pub operation: String,

    /// Proof-of-work stub expected by the network
    #[serde(rename = "proofOfWork")]
    pub proof_of_work: String,
}

impl RegistrationHeader {
    /// Header for a `create` operation signed by the key `kid` points at.
    pub fn create(kid: String) -> Self {
        RegistrationHeader {
            alg: crate::signing::SIGNING_ALGORITHM.to_string(),
            kid,
            operation: "create".to_string(),
            proof_of_work: "{}".to_string(),
        }
    }
}

/// Request body submitted to the DID registration network.
///
/// `payload` and `signature` are base64url segments exactly as they would
/// appear in a compact serialization; `header` stays a structured object.
/// The asymmetry is the network's wire format, not an accident.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegistrationRequest {
    pub header: RegistrationHeader,

    /// Base64url-encoded DID document
    pub payload: String,

    /// Base64url-encoded DER signature over `"." + payload`
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_header_wire_shape() {
        let header = RegistrationHeader::create("#abc123".to_string());
        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(
            json,
            r##"{"alg":"ES256K","kid":"#abc123","operation":"create","proofOfWork":"{}"}"##
        );
    }

    #[test]
    fn test_claims_field_order() {
        let claims = CredentialClaims {
            sub: "did:alice".to_string(),
            iss: "did:example:123".to_string(),
            iat: 1700000000000,
            vc: serde_json::json!({"degree": "BSc"}),
        };
        let json = serde_json::to_string(&claims).unwrap();
        // sub, iss, iat, vc in that order; these bytes get signed
        assert!(json.starts_with(r#"{"sub":"did:alice","iss":"did:example:123","iat":"#));
    }
}
