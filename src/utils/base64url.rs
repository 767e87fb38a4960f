//! Base64URL decoding per RFC 4648 §5
//!
//! Thin wrapper around the `base64` crate that enforces the unpadded
//! alphabet JWS requires and bounds the decoded size.

use crate::error::Rejection;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Decode Base64URL string to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>, Rejection> {
    // Reject before decoding when the encoded form alone is already too long
    if input.len() / 4 * 3 > max_size + 2 {
        return Err(Rejection::FormatInvalidBase64(format!(
            "encoded size exceeds limit: {} characters",
            input.len()
        )));
    }

    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Rejection::FormatInvalidBase64(e.to_string()))?;

    if result.len() > max_size {
        return Err(Rejection::FormatInvalidBase64(format!(
            "decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        )));
    }

    Ok(result)
}
