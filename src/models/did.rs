// src/models/did.rs
//! Decentralized Identifier (DID) data model implementation.
//!
//! Defines the DID Document submitted at registration time, following the
//! [DID Core Specification](https://www.w3.org/TR/did-core/) with the key
//! format the registration network expects.

use serde::{Deserialize, Serialize};

/// JSON-LD context carried by every registered DID document.
pub const DID_CONTEXT: &str = "https://w3id.org/did/v1";

/// Verification key type for secp256k1 keys.
pub const KEY_TYPE_SECP256K1: &str = "Secp256k1VerificationKey2018";

/// A DID Document describing a decentralized identity.
///
/// Only the fields the registration network consumes are modeled: the
/// JSON-LD context and the list of public verification keys. Field order
/// matters: the serialized form is the exact byte sequence that gets
/// signed and submitted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DidDocument {
    /// JSON-LD context, always [`DID_CONTEXT`]
    #[serde(rename = "@context")]
    pub context: String,

    /// Public verification keys registered with the DID
    #[serde(rename = "publicKey")]
    pub public_key: Vec<PublicKeyEntry>,
}

impl DidDocument {
    /// Builds a registration document carrying a single secp256k1
    /// verification key.
    pub fn for_key(jwk: PublicKeyJwk) -> Self {
        DidDocument {
            context: DID_CONTEXT.to_string(),
            public_key: vec![PublicKeyEntry {
                id: jwk.kid.clone(),
                key_type: KEY_TYPE_SECP256K1.to_string(),
                public_key_jwk: jwk,
            }],
        }
    }
}

/// One entry in a DID document's `publicKey` array.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublicKeyEntry {
    /// Key identifier, a DID-relative fragment like `#<keyVersion>`
    pub id: String,

    /// Verification key type, e.g. [`KEY_TYPE_SECP256K1`]
    #[serde(rename = "type")]
    pub key_type: String,

    /// The key material as a JWK
    #[serde(rename = "publicKeyJwk")]
    pub public_key_jwk: PublicKeyJwk,
}

/// Public key in the JWK shape the registration network expects.
///
/// This is not a general-purpose JWK: the network wants a handful of
/// non-standard fields (`defaultSigningAlgorithm` and friends) alongside
/// the EC point, and the coordinates base64url-encoded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublicKeyJwk {
    /// Key identifier fragment, `#<keyVersion>`
    pub kid: String,

    /// Key family, always `"EC"`
    pub kty: String,

    /// Curve name, `"P-256K"` for secp256k1
    pub crv: String,

    /// Base64url-encoded x coordinate
    pub x: String,

    /// Base64url-encoded y coordinate
    pub y: String,

    /// Key usage marker, `"verify"`
    #[serde(rename = "use")]
    pub key_use: String,

    #[serde(rename = "defaultEncryptionAlgorithm")]
    pub default_encryption_algorithm: String,

    #[serde(rename = "defaultSigningAlgorithm")]
    pub default_signing_algorithm: String,
}

impl PublicKeyJwk {
    /// Shapes a secp256k1 public point into the registration network's JWK
    /// format.
    ///
    /// # Arguments
    /// * `key_version` - Custody-assigned version identifier; becomes the
    ///   `#<version>` kid fragment
    /// * `x`, `y` - Base64url-encoded affine coordinates
    pub fn secp256k1(key_version: &str, x: String, y: String) -> Self {
        PublicKeyJwk {
            kid: format!("#{}", key_version),
            kty: "EC".to_string(),
            crv: "P-256K".to_string(),
            x,
            y,
            key_use: "verify".to_string(),
            default_encryption_algorithm: "none".to_string(),
            default_signing_algorithm: crate::signing::SIGNING_ALGORITHM.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wire_shape() {
        let jwk = PublicKeyJwk::secp256k1("v1", "eA".to_string(), "eQ".to_string());
        let document = DidDocument::for_key(jwk);
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&document).unwrap()).unwrap();

        assert_eq!(json["@context"], "https://w3id.org/did/v1");
        let entry = &json["publicKey"][0];
        assert_eq!(entry["id"], "#v1");
        assert_eq!(entry["type"], "Secp256k1VerificationKey2018");
        let jwk = &entry["publicKeyJwk"];
        assert_eq!(jwk["kid"], "#v1");
        assert_eq!(jwk["crv"], "P-256K");
        assert_eq!(jwk["use"], "verify");
        assert_eq!(jwk["defaultEncryptionAlgorithm"], "none");
        assert_eq!(jwk["defaultSigningAlgorithm"], "ES256K");
    }
}
