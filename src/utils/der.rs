//! DER helpers for public key material
//!
//! Uses the RustCrypto `spki` and `der` crates. Keys are normalized to the
//! encodings `aws-lc-rs` verifies directly: PKCS#1 `RSAPublicKey` for RSA,
//! the uncompressed SEC1 point for ECDSA and the raw 32 bytes for Ed25519.

use crate::error::Rejection;
use crate::keys::EcCurve;
use crate::limits::{MAX_RSA_MODULUS_SIZE, MIN_RSA_MODULUS_SIZE};
use der::asn1::UintRef;
use der::{Decode, Encode, Sequence};
use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};

/// rsaEncryption (RFC 8017)
pub(crate) const RSA_ENCRYPTION_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// id-ecPublicKey (RFC 5480)
pub(crate) const EC_PUBLIC_KEY_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// id-Ed25519 (RFC 8410)
pub(crate) const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

pub(crate) const SECP256R1_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
pub(crate) const SECP384R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
pub(crate) const SECP521R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

fn der_error(operation: &str, details: impl std::fmt::Display) -> Rejection {
    Rejection::DerInvalid(format!("{operation}: {details}"))
}

/// RSAPublicKey as defined in RFC 8017:
///
/// ```text
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
/// ```
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// The pieces of a SubjectPublicKeyInfo needed to classify a key
#[derive(Debug)]
pub(crate) struct SpkiParts {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<ObjectIdentifier>,
    pub subject_public_key: Vec<u8>,
}

/// Decode a DER SubjectPublicKeyInfo
pub(crate) fn decode_spki(der: &[u8]) -> Result<SpkiParts, Rejection> {
    let spki = SubjectPublicKeyInfoRef::from_der(der)
        .map_err(|e| der_error("failed to decode SubjectPublicKeyInfo", e))?;

    // Only the EC algorithm carries an OID parameter; RSA carries NULL, Ed25519 nothing
    let parameters = if spki.algorithm.oid == EC_PUBLIC_KEY_OID {
        Some(
            spki.algorithm
                .parameters_oid()
                .map_err(|e| der_error("missing EC curve parameter", e))?,
        )
    } else {
        None
    };

    let subject_public_key = spki
        .subject_public_key
        .as_bytes()
        .ok_or_else(|| der_error("subject public key", "unaligned bit string"))?
        .to_vec();

    Ok(SpkiParts {
        algorithm: spki.algorithm.oid,
        parameters,
        subject_public_key,
    })
}

/// Check that `der` is a well-formed PKCS#1 RSAPublicKey within size limits
pub(crate) fn validate_rsa_pkcs1(der: &[u8]) -> Result<(), Rejection> {
    let key = RsaPublicKey::from_der(der)
        .map_err(|e| der_error("failed to decode RSAPublicKey", e))?;

    let modulus = significant_bytes(key.modulus.as_bytes());
    if modulus.len() > MAX_RSA_MODULUS_SIZE {
        return Err(der_error(
            "RSA modulus too large",
            format!("{} bytes (maximum: {MAX_RSA_MODULUS_SIZE} bytes)", modulus.len()),
        ));
    }
    if modulus.len() < MIN_RSA_MODULUS_SIZE {
        return Err(der_error(
            "RSA modulus too small",
            format!("{} bytes (minimum: {MIN_RSA_MODULUS_SIZE} bytes)", modulus.len()),
        ));
    }

    // Exponents 0, 1 and 2 cannot form a usable public key
    let exponent = significant_bytes(key.public_exponent.as_bytes());
    if exponent.is_empty() || (exponent.len() == 1 && exponent[0] < 3) {
        return Err(der_error("RSA exponent", "must be at least 3"));
    }
    Ok(())
}

/// Build a DER-encoded PKCS#1 RSAPublicKey from modulus (n) and exponent (e) bytes
pub(crate) fn rsa_pkcs1_from_n_e(n: &[u8], e: &[u8]) -> Result<Vec<u8>, Rejection> {
    if n.is_empty() || e.is_empty() {
        return Err(Rejection::JwkInvalid("rsa key missing n or e".into()));
    }
    if n.len() > MAX_RSA_MODULUS_SIZE + 1 {
        return Err(der_error(
            "RSA modulus too large",
            format!("{} bytes (maximum: {MAX_RSA_MODULUS_SIZE} bytes)", n.len()),
        ));
    }

    // UintRef strips redundant leading zeros and adds the sign byte when needed
    let modulus = UintRef::new(n).map_err(|e| der_error("failed to encode RSA modulus", e))?;
    let public_exponent =
        UintRef::new(e).map_err(|e| der_error("failed to encode RSA exponent", e))?;

    RsaPublicKey {
        modulus,
        public_exponent,
    }
    .to_der()
    .map_err(|e| der_error("failed to encode RSAPublicKey", e))
}

/// Build an uncompressed SEC1 point (`04 || x || y`) from JWK coordinates
///
/// Coordinates shorter than the curve size are left-padded with zeros,
/// longer ones are accepted only if the excess is leading zeros.
pub(crate) fn ec_point_from_xy(x: &[u8], y: &[u8], curve: EcCurve) -> Result<Vec<u8>, Rejection> {
    let size = curve.coordinate_len();
    let x = normalize_coordinate(x, size)
        .ok_or_else(|| Rejection::JwkInvalid(format!("x has wrong length for {curve}")))?;
    let y = normalize_coordinate(y, size)
        .ok_or_else(|| Rejection::JwkInvalid(format!("y has wrong length for {curve}")))?;

    let mut point = Vec::with_capacity(1 + 2 * size);
    point.push(0x04);
    point.extend_from_slice(&x);
    point.extend_from_slice(&y);
    Ok(point)
}

fn significant_bytes(bytes: &[u8]) -> &[u8] {
    let first_significant = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first_significant..]
}

fn normalize_coordinate(bytes: &[u8], size: usize) -> Option<Vec<u8>> {
    if bytes.is_empty() {
        return None;
    }
    let significant = significant_bytes(bytes);
    if significant.len() > size {
        return None;
    }
    let mut out = vec![0u8; size - significant.len()];
    out.extend_from_slice(significant);
    Some(out)
}
