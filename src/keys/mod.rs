//! Public keys for JWT signature verification
//!
//! Callers supply a key either as a PEM string or as a JWK object
//! ([`KeyInput`]). Both are normalized into a single [`PublicKey`] before any
//! token is looked at, so verification never depends on how the key arrived.

mod jwk;
mod pkix;

pub use jwk::Jwk;

use crate::error::Result;

/// A key as supplied by the caller: PEM text or a JWK object
#[derive(Debug, Clone, PartialEq)]
pub enum KeyInput {
    /// PEM-encoded public key (`PUBLIC KEY` or `RSA PUBLIC KEY`)
    Pem(String),

    /// JSON Web Key
    Jwk(Jwk),
}

impl KeyInput {
    /// Normalize into the internal key representation
    ///
    /// Fails with [`ArgumentError::NotSupported`](crate::ArgumentError::NotSupported)
    /// when the input is not a usable public key.
    pub fn normalize(&self) -> Result<PublicKey> {
        match self {
            KeyInput::Pem(text) => PublicKey::from_pem(text),
            KeyInput::Jwk(jwk) => PublicKey::from_jwk(jwk),
        }
    }
}

impl From<&str> for KeyInput {
    fn from(pem: &str) -> Self {
        KeyInput::Pem(pem.to_string())
    }
}

impl From<String> for KeyInput {
    fn from(pem: String) -> Self {
        KeyInput::Pem(pem)
    }
}

impl From<&String> for KeyInput {
    fn from(pem: &String) -> Self {
        KeyInput::Pem(pem.clone())
    }
}

impl From<Jwk> for KeyInput {
    fn from(jwk: Jwk) -> Self {
        KeyInput::Jwk(jwk)
    }
}

impl From<&Jwk> for KeyInput {
    fn from(jwk: &Jwk) -> Self {
        KeyInput::Jwk(jwk.clone())
    }
}

/// A normalized public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// RSA public key
    Rsa(RsaPublicKey),

    /// ECDSA public key
    Ec(EcPublicKey),

    /// Ed25519 public key
    Ed25519(Ed25519PublicKey),
}

impl PublicKey {
    /// Parse a PEM-encoded public key
    pub fn from_pem(text: &str) -> Result<Self> {
        Ok(pkix::parse_public_key(text)?)
    }

    /// Convert a JWK into a public key
    pub fn from_jwk(jwk: &Jwk) -> Result<Self> {
        Ok(jwk.to_public_key()?)
    }

    /// Get key type name for diagnostics
    pub fn key_type(&self) -> &'static str {
        match self {
            PublicKey::Rsa(_) => "RSA",
            PublicKey::Ec(key) => key.curve().key_type(),
            PublicKey::Ed25519(_) => "Ed25519",
        }
    }

    /// The encoded key bytes handed to the signature backend
    pub(crate) fn verification_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Rsa(key) => key.as_der(),
            PublicKey::Ec(key) => key.as_point(),
            PublicKey::Ed25519(key) => key.as_bytes(),
        }
    }
}

/// RSA public key (DER-encoded PKCS#1 RSAPublicKey)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    der: Vec<u8>,
}

impl RsaPublicKey {
    pub(crate) fn new(der: Vec<u8>) -> Self {
        Self { der }
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

/// Elliptic curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// P-256 (secp256r1)
    P256,
    /// P-384 (secp384r1)
    P384,
    /// P-521 (secp521r1)
    P521,
}

impl EcCurve {
    /// Parse the JWK `crv` name
    pub fn from_jwk_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(EcCurve::P256),
            "P-384" => Some(EcCurve::P384),
            "P-521" => Some(EcCurve::P521),
            _ => None,
        }
    }

    /// The JWK `crv` name
    pub const fn jwk_name(&self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    /// Size of one affine coordinate in bytes
    pub const fn coordinate_len(&self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }

    const fn key_type(&self) -> &'static str {
        match self {
            EcCurve::P256 => "EC P-256",
            EcCurve::P384 => "EC P-384",
            EcCurve::P521 => "EC P-521",
        }
    }
}

impl std::fmt::Display for EcCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.jwk_name())
    }
}

/// ECDSA public key (uncompressed SEC1 point)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    point: Vec<u8>,
    curve: EcCurve,
}

impl EcPublicKey {
    pub(crate) fn new(point: Vec<u8>, curve: EcCurve) -> Self {
        Self { point, curve }
    }

    /// Get the uncompressed point bytes (`04 || x || y`)
    pub fn as_point(&self) -> &[u8] {
        &self.point
    }

    /// Get the curve
    pub fn curve(&self) -> EcCurve {
        self.curve
    }
}

/// Ed25519 public key (raw 32 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    bytes: Vec<u8>,
}

impl Ed25519PublicKey {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
