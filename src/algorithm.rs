//! Algorithm support for JWT verification
use crate::error::Rejection;
use crate::keys::{EcCurve, PublicKey};
use crate::limits::{MAX_ALG_LENGTH, MAX_DECODED_SIGNATURE_SIZE};
use crate::utils::base64url;

use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// Algorithm assumed when the caller does not name one
pub const DEFAULT_ALGORITHM: AlgorithmType = AlgorithmType::RS256;

/// Algorithm identifier from the JWT header (RFC 7518 §3.1, RFC 8037 §3.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
    ES256,
    ES384,
    ES512,
    EdDSA,
}

impl AlgorithmType {
    /// Look up an algorithm by its JOSE name
    ///
    /// Returns `None` for `none`, for HMAC algorithms and for anything else
    /// a public key cannot verify.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "RS256" => Some(AlgorithmType::RS256),
            "RS384" => Some(AlgorithmType::RS384),
            "RS512" => Some(AlgorithmType::RS512),
            "PS256" => Some(AlgorithmType::PS256),
            "PS384" => Some(AlgorithmType::PS384),
            "PS512" => Some(AlgorithmType::PS512),
            "ES256" => Some(AlgorithmType::ES256),
            "ES384" => Some(AlgorithmType::ES384),
            "ES512" => Some(AlgorithmType::ES512),
            "EdDSA" => Some(AlgorithmType::EdDSA),
            _ => None,
        }
    }

    pub(crate) fn parse(name: &str) -> Result<Self, Rejection> {
        if name.len() > MAX_ALG_LENGTH {
            return Err(Rejection::AlgorithmUnsupported(format!(
                "algorithm string too long: {} bytes",
                name.len()
            )));
        }
        if name.eq_ignore_ascii_case("none") {
            return Err(Rejection::AlgorithmNoneRejected);
        }
        Self::from_name(name).ok_or_else(|| Rejection::AlgorithmUnsupported(name.to_string()))
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::RS384 => "RS384",
            AlgorithmType::RS512 => "RS512",
            AlgorithmType::PS256 => "PS256",
            AlgorithmType::PS384 => "PS384",
            AlgorithmType::PS512 => "PS512",
            AlgorithmType::ES256 => "ES256",
            AlgorithmType::ES384 => "ES384",
            AlgorithmType::ES512 => "ES512",
            AlgorithmType::EdDSA => "EdDSA",
        }
    }

    /// Get the verification algorithm for signature verification
    ///
    /// Note: JWT ECDSA signatures use IEEE P1363 format (fixed-length R||S),
    /// not ASN.1 DER encoding, as per RFC 7518 Section 3.4.
    fn verification_algorithm(&self) -> &'static dyn signature::VerificationAlgorithm {
        match self {
            AlgorithmType::RS256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            AlgorithmType::RS384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            AlgorithmType::RS512 => &signature::RSA_PKCS1_2048_8192_SHA512,
            AlgorithmType::PS256 => &signature::RSA_PSS_2048_8192_SHA256,
            AlgorithmType::PS384 => &signature::RSA_PSS_2048_8192_SHA384,
            AlgorithmType::PS512 => &signature::RSA_PSS_2048_8192_SHA512,
            AlgorithmType::ES256 => &signature::ECDSA_P256_SHA256_FIXED,
            AlgorithmType::ES384 => &signature::ECDSA_P384_SHA384_FIXED,
            AlgorithmType::ES512 => &signature::ECDSA_P521_SHA512_FIXED,
            AlgorithmType::EdDSA => &signature::ED25519,
        }
    }

    /// Whether `key` belongs to the family this algorithm verifies with
    fn accepts_key(&self, key: &PublicKey) -> bool {
        match (self, key) {
            (
                AlgorithmType::RS256
                | AlgorithmType::RS384
                | AlgorithmType::RS512
                | AlgorithmType::PS256
                | AlgorithmType::PS384
                | AlgorithmType::PS512,
                PublicKey::Rsa(_),
            ) => true,
            (AlgorithmType::ES256, PublicKey::Ec(ec)) => ec.curve() == EcCurve::P256,
            (AlgorithmType::ES384, PublicKey::Ec(ec)) => ec.curve() == EcCurve::P384,
            (AlgorithmType::ES512, PublicKey::Ec(ec)) => ec.curve() == EcCurve::P521,
            (AlgorithmType::EdDSA, PublicKey::Ed25519(_)) => true,
            _ => false,
        }
    }

    /// Verify a signature using the algorithm
    ///
    /// # Arguments
    /// * `signing_input` - The data that was signed (header.payload)
    /// * `signature` - The Base64URL-encoded signature
    /// * `key` - The normalized public key
    pub(crate) fn verify_signature(
        &self,
        signing_input: &str,
        signature: &str,
        key: &PublicKey,
    ) -> Result<(), Rejection> {
        if !self.accepts_key(key) {
            return Err(Rejection::KeyAlgorithmMismatch {
                algorithm: self.as_str(),
                key_type: key.key_type(),
            });
        }

        let signature_bytes = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)?;
        let public_key =
            UnparsedPublicKey::new(self.verification_algorithm(), key.verification_bytes());

        public_key
            .verify(signing_input.as_bytes(), &signature_bytes)
            .map_err(|_| Rejection::SignatureInvalid)
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
