// src/signing/der.rs
//! ASN.1 DER encoding for raw elliptic-curve signatures.
//!
//! Key-custody services return ECDSA signatures as two fixed-width
//! big-endian unsigned integers concatenated into a single buffer (`r ‖ s`).
//! Verifiers and the DID registration network instead expect the DER form
//! defined in RFC 3279:
//!
//! ```text
//! Ecdsa-Sig-Value ::= SEQUENCE {
//!     r     INTEGER,
//!     s     INTEGER
//! }
//! ```
//!
//! DER `INTEGER`s are signed, so a raw value whose leading byte has the
//! high bit set must be prefixed with a single `0x00` pad byte or it would
//! be read back as a negative number. Lengths are short-form only: the
//! encoder asserts that the sequence body fits in 127 bytes (always true
//! for secp256k1's 32-byte halves) rather than emitting long-form lengths.

use thiserror::Error;

/// Errors produced while converting a raw signature into DER.
///
/// Malformed input is always reported; the encoder never truncates or
/// zero-pads a buffer to make it fit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// The concatenated `r ‖ s` buffer was empty.
    #[error("raw signature buffer is empty")]
    EmptySignature,

    /// The concatenated `r ‖ s` buffer cannot be split at its midpoint.
    #[error("raw signature has odd length {0}, cannot split into (r, s)")]
    OddLength(usize),

    /// One of the integer buffers handed to the encoder was empty.
    #[error("cannot DER-encode an empty integer buffer")]
    EmptyElement,

    /// The encoded sequence body would not fit in a short-form DER length.
    #[error("encoded sequence body of {0} bytes exceeds the short-form DER limit of 127")]
    OversizedSequence(usize),
}

/// Splits a concatenated `r ‖ s` signature buffer at its midpoint.
///
/// # Arguments
/// * `raw` - Signature bytes as returned by the key-custody service:
///   two equal-width big-endian unsigned integers back to back
///
/// # Returns
/// Borrowed `(r, s)` halves, or an [`EncodingError`] if the buffer is
/// empty or of odd length.
pub fn split_raw_signature(raw: &[u8]) -> Result<(&[u8], &[u8]), EncodingError> {
    if raw.is_empty() {
        return Err(EncodingError::EmptySignature);
    }
    if raw.len() % 2 != 0 {
        return Err(EncodingError::OddLength(raw.len()));
    }
    Ok(raw.split_at(raw.len() / 2))
}

/// Encodes raw big-endian unsigned integers as a DER `SEQUENCE` of `INTEGER`s.
///
/// # Arguments
/// * `elements` - Ordered integer buffers; for an ECDSA signature this is
///   always `[r, s]`
///
/// # Returns
/// The DER bytes: `0x30 <len>` followed by one `0x02 <len> [0x00] <bytes>`
/// triple per element, in input order. The `0x00` pad appears exactly when
/// the element's leading byte has its high bit set.
///
/// # Determinism
/// Pure function of its input; identical inputs always produce identical
/// bytes, which signature verification interoperability depends on.
pub fn encode_der(elements: &[&[u8]]) -> Result<Vec<u8>, EncodingError> {
    // Walk the elements once to compute the sequence body length.
    let mut remaining = 0usize;
    for element in elements {
        let first = element.first().ok_or(EncodingError::EmptyElement)?;
        let size = if first & 0x80 == 0x80 {
            element.len() + 1
        } else {
            element.len()
        };
        // Two bytes for the element's own tag + length header.
        remaining += 2 + size;
    }

    // Short-form lengths only; a body over 127 bytes would need the
    // long-form encoding this module does not implement.
    if remaining > 0x7f {
        return Err(EncodingError::OversizedSequence(remaining));
    }

    let mut out = Vec::with_capacity(2 + remaining);
    out.push(0x30);
    out.push(remaining as u8);
    for element in elements {
        let padded = element[0] & 0x80 == 0x80;
        out.push(0x02);
        out.push((element.len() + usize::from(padded)) as u8);
        if padded {
            out.push(0x00);
        }
        out.extend_from_slice(element);
    }
    Ok(out)
}
