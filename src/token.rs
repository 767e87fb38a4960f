//! Token splitting and the decoded token model

use crate::error::Rejection;
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header and payload of a verified token, exactly as decoded
///
/// Unknown header parameters and claims are kept untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedToken {
    /// JOSE header
    pub header: Map<String, Value>,

    /// Claims set
    pub payload: Map<String, Value>,
}

impl DecodedToken {
    /// Signing algorithm from the header (`alg`)
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Key ID from the header (`kid`)
    pub fn key_id(&self) -> Option<&str> {
        self.header.get("kid").and_then(Value::as_str)
    }

    /// Issuer (`iss`)
    pub fn issuer(&self) -> Option<&str> {
        self.payload.get("iss").and_then(Value::as_str)
    }

    /// Subject (`sub`)
    pub fn subject(&self) -> Option<&str> {
        self.payload.get("sub").and_then(Value::as_str)
    }

    /// Audience (`aud`)
    ///
    /// A single string audience is returned as a one-element list.
    pub fn audience(&self) -> Vec<&str> {
        match self.payload.get("aud") {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Expiration time (`exp`) in seconds since the epoch
    pub fn expiration(&self) -> Option<f64> {
        self.payload.get("exp").and_then(Value::as_f64)
    }

    /// Any other claim by name
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }
}

/// A token split into its three segments with header and payload decoded
#[derive(Debug)]
pub(crate) struct TokenParts<'a> {
    pub header_b64: &'a str,
    pub payload_b64: &'a str,
    pub signature_b64: &'a str,
    pub header: Map<String, Value>,
    pub payload: Map<String, Value>,
}

impl<'a> TokenParts<'a> {
    /// Split a compact JWS and decode its header and payload
    ///
    /// The signature is not decoded here; that happens once the algorithm
    /// and key are known to fit.
    pub(crate) fn parse(token: &'a str) -> Result<Self, Rejection> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Rejection::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split('.');
        let header_b64 = parts.next().ok_or(Rejection::FormatInvalid)?;
        let payload_b64 = parts.next().ok_or(Rejection::FormatInvalid)?;
        let signature_b64 = parts.next().ok_or(Rejection::FormatInvalid)?;
        if parts.next().is_some() {
            return Err(Rejection::FormatInvalid);
        }

        if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Rejection::FormatInvalidBase64(format!(
                "signature too large: {} characters",
                signature_b64.len()
            )));
        }

        let header = decode_object(header_b64, MAX_DECODED_HEADER_SIZE, "header")?;
        let payload = decode_object(payload_b64, MAX_DECODED_PAYLOAD_SIZE, "payload")?;

        Ok(Self {
            header_b64,
            payload_b64,
            signature_b64,
            header,
            payload,
        })
    }

    /// The `alg` header parameter
    pub(crate) fn algorithm(&self) -> Result<&str, Rejection> {
        self.header
            .get("alg")
            .and_then(Value::as_str)
            .ok_or(Rejection::HeaderMissingField("alg"))
    }

    /// The bytes covered by the signature: `header.payload`
    pub(crate) fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    pub(crate) fn into_decoded(self) -> DecodedToken {
        DecodedToken {
            header: self.header,
            payload: self.payload,
        }
    }
}

fn decode_object(
    segment: &str,
    max_size: usize,
    what: &str,
) -> Result<Map<String, Value>, Rejection> {
    let bytes = base64url::decode_bytes(segment, max_size)?;
    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Rejection::FormatInvalidJson(format!(
            "{what} is not a JSON object"
        ))),
        Err(e) => Err(Rejection::FormatInvalidJson(format!(
            "failed to parse {what}: {e}"
        ))),
    }
}
