// src/signing/mod.rs
//! Signature-format conversion and the compact-serialization signing
//! pipeline.

pub mod der;
pub mod signer;

/// Algorithm tag used for every signature this agent produces:
/// ECDSA over secp256k1 with SHA-256.
pub const SIGNING_ALGORITHM: &str = "ES256K";

/// Base64url without padding, the encoding JOSE compact serialization uses
/// for every segment.
pub(crate) fn base64url(data: &[u8]) -> String {
    base64::encode_config(data, base64::URL_SAFE_NO_PAD)
}
