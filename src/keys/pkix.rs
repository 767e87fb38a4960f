//! PEM public key parsing
//!
//! Accepts `PUBLIC KEY` (X.509 SubjectPublicKeyInfo, RFC 5280) for RSA,
//! EC and Ed25519 keys, and `RSA PUBLIC KEY` (PKCS#1, RFC 8017).

use crate::error::Rejection;
use crate::keys::{EcCurve, EcPublicKey, Ed25519PublicKey, PublicKey, RsaPublicKey};
use crate::limits::MAX_PEM_LENGTH;
use crate::utils::der::{
    decode_spki, validate_rsa_pkcs1, EC_PUBLIC_KEY_OID, ED25519_OID, RSA_ENCRYPTION_OID,
    SECP256R1_OID, SECP384R1_OID, SECP521R1_OID,
};
use spki::ObjectIdentifier;

const SPKI_LABEL: &str = "PUBLIC KEY";
const PKCS1_LABEL: &str = "RSA PUBLIC KEY";
const ED25519_KEY_LEN: usize = 32;

/// Parse PEM text into a normalized public key
pub(crate) fn parse_public_key(text: &str) -> Result<PublicKey, Rejection> {
    if text.len() > MAX_PEM_LENGTH {
        return Err(Rejection::PemTooLarge {
            size: text.len(),
            max: MAX_PEM_LENGTH,
        });
    }

    let block = ::pem::parse(text.trim()).map_err(|e| Rejection::PemInvalid(e.to_string()))?;

    match block.tag() {
        SPKI_LABEL => from_spki(block.contents()),
        PKCS1_LABEL => {
            validate_rsa_pkcs1(block.contents())?;
            Ok(PublicKey::Rsa(RsaPublicKey::new(block.contents().to_vec())))
        }
        other => Err(Rejection::PemLabelUnsupported(other.to_string())),
    }
}

/// Classify a SubjectPublicKeyInfo by its algorithm OID
fn from_spki(der: &[u8]) -> Result<PublicKey, Rejection> {
    let parts = decode_spki(der)?;

    if parts.algorithm == RSA_ENCRYPTION_OID {
        validate_rsa_pkcs1(&parts.subject_public_key)?;
        Ok(PublicKey::Rsa(RsaPublicKey::new(parts.subject_public_key)))
    } else if parts.algorithm == EC_PUBLIC_KEY_OID {
        let curve = parts
            .parameters
            .as_ref()
            .and_then(curve_from_oid)
            .ok_or_else(|| {
                Rejection::KeyAlgorithmUnsupported(format!("EC curve {:?}", parts.parameters))
            })?;

        // Only uncompressed points are accepted
        let point = parts.subject_public_key;
        if point.len() != 1 + 2 * curve.coordinate_len() || point[0] != 0x04 {
            return Err(Rejection::DerInvalid(format!(
                "EC point is not an uncompressed {curve} point"
            )));
        }
        Ok(PublicKey::Ec(EcPublicKey::new(point, curve)))
    } else if parts.algorithm == ED25519_OID {
        if parts.subject_public_key.len() != ED25519_KEY_LEN {
            return Err(Rejection::DerInvalid(format!(
                "Ed25519 key must be {ED25519_KEY_LEN} bytes, got {}",
                parts.subject_public_key.len()
            )));
        }
        Ok(PublicKey::Ed25519(Ed25519PublicKey::new(
            parts.subject_public_key,
        )))
    } else {
        Err(Rejection::KeyAlgorithmUnsupported(parts.algorithm.to_string()))
    }
}

fn curve_from_oid(oid: &ObjectIdentifier) -> Option<EcCurve> {
    if *oid == SECP256R1_OID {
        Some(EcCurve::P256)
    } else if *oid == SECP384R1_OID {
        Some(EcCurve::P384)
    } else if *oid == SECP521R1_OID {
        Some(EcCurve::P521)
    } else {
        None
    }
}
