//! JWK (JSON Web Key) struct and conversion

use crate::error::Rejection;
use crate::keys::{EcCurve, EcPublicKey, Ed25519PublicKey, PublicKey, RsaPublicKey};
use crate::limits::{MAX_JWK_COORDINATE_SIZE, MAX_JWK_E_SIZE, MAX_JWK_N_SIZE};
use crate::utils::base64url;
use crate::utils::der::{ec_point_from_xy, rsa_pkcs1_from_n_e, validate_rsa_pkcs1};
use serde::{Deserialize, Serialize};

/// JSON Web Key (RFC 7517)
///
/// Only the members needed to rebuild a public key are modelled; anything
/// else in the JSON object is ignored. Private members (`d`, `p`, `q`, ...)
/// are never read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type: "RSA", "EC" or "OKP"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kty: Option<String>,
    /// Key ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Algorithm (advisory per RFC 7517 §4.4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Key use (RFC 7517 §4.2); must be "sig" when present
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    // RSA
    /// RSA modulus (Base64URL-encoded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA exponent (Base64URL-encoded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    // EC / OKP
    /// Curve name: "P-256", "P-384", "P-521" or "Ed25519"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// x coordinate, or the whole public key for OKP (Base64URL-encoded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// y coordinate (Base64URL-encoded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl Jwk {
    /// Parse a JWK from its JSON text
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            crate::Error::from(Rejection::JwkInvalid(format!("not a JWK object: {e}")))
        })
    }

    /// Convert the JWK into a normalized public key
    pub(crate) fn to_public_key(&self) -> Result<PublicKey, Rejection> {
        // Encryption keys must not verify signatures
        if let Some(key_use) = &self.key_use {
            if key_use != "sig" {
                return Err(Rejection::JwkInvalid(format!(
                    "key use mismatch: expected 'sig', found '{key_use}'"
                )));
            }
        }

        match self.kty.as_deref() {
            Some("RSA") => self.to_rsa_key(),
            Some("EC") => self.to_ec_key(),
            Some("OKP") => self.to_okp_key(),
            Some(other) => Err(Rejection::KeyAlgorithmUnsupported(format!("kty {other}"))),
            None => Err(Rejection::JwkInvalid("missing key type (kty)".into())),
        }
    }

    fn to_rsa_key(&self) -> Result<PublicKey, Rejection> {
        let n = required_member("n", self.n.as_deref(), MAX_JWK_N_SIZE)?;
        let e = required_member("e", self.e.as_deref(), MAX_JWK_E_SIZE)?;

        let der = rsa_pkcs1_from_n_e(&n, &e)?;
        validate_rsa_pkcs1(&der)?;
        Ok(PublicKey::Rsa(RsaPublicKey::new(der)))
    }

    fn to_ec_key(&self) -> Result<PublicKey, Rejection> {
        let crv = self
            .crv
            .as_deref()
            .ok_or_else(|| Rejection::JwkInvalid("missing curve (crv)".into()))?;
        let curve = EcCurve::from_jwk_name(crv)
            .ok_or_else(|| Rejection::KeyAlgorithmUnsupported(format!("EC curve {crv}")))?;

        let x = required_member("x", self.x.as_deref(), MAX_JWK_COORDINATE_SIZE)?;
        let y = required_member("y", self.y.as_deref(), MAX_JWK_COORDINATE_SIZE)?;

        let point = ec_point_from_xy(&x, &y, curve)?;
        Ok(PublicKey::Ec(EcPublicKey::new(point, curve)))
    }

    fn to_okp_key(&self) -> Result<PublicKey, Rejection> {
        match self.crv.as_deref() {
            Some("Ed25519") => {}
            Some(other) => {
                return Err(Rejection::KeyAlgorithmUnsupported(format!(
                    "OKP curve {other}"
                )))
            }
            None => return Err(Rejection::JwkInvalid("missing curve (crv)".into())),
        }

        let x = required_member("x", self.x.as_deref(), MAX_JWK_COORDINATE_SIZE)?;
        if x.len() != 32 {
            return Err(Rejection::JwkInvalid(format!(
                "Ed25519 key must be 32 bytes, got {}",
                x.len()
            )));
        }
        Ok(PublicKey::Ed25519(Ed25519PublicKey::new(x)))
    }
}

/// Size-check and decode a required Base64URL member
fn required_member(
    field: &'static str,
    value: Option<&str>,
    max_encoded: usize,
) -> Result<Vec<u8>, Rejection> {
    let value = value.ok_or_else(|| Rejection::JwkInvalid(format!("missing member '{field}'")))?;

    if value.len() > max_encoded {
        return Err(Rejection::JwkFieldTooLarge {
            field,
            size: value.len(),
            max: max_encoded,
        });
    }

    base64url::decode_bytes(value, max_encoded * 3 / 4)
        .map_err(|e| Rejection::JwkInvalid(format!("failed to decode '{field}': {e}")))
}
