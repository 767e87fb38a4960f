//! Errors for jwtcheck
//!
//! Callers see exactly three kinds of failure: a malformed argument, an
//! invalid token, or a misconfigured verifier. Every structural,
//! cryptographic and temporal failure surfaces as [`Error::InvalidToken`]
//! without further detail. The precise cause is kept in the crate-private
//! [`Rejection`] and only reaches the `tracing` output.

use thiserror::Error;

/// jwtcheck errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The caller passed an argument of the wrong type or shape
    #[error("[jwtVerify] {0}")]
    InvalidArgument(ArgumentError),

    /// The token failed verification (format, algorithm, signature or expiry)
    #[error("[jwtVerify] Invalid JWT")]
    InvalidToken,

    /// The verifier was built with an unusable configuration
    #[error("[jwtVerify] Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

/// Argument errors, reported with the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Field {field} should be of type {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    /// The key is neither a recognizable PEM public key nor a usable JWK
    #[error("not supported argument")]
    NotSupported,
}

impl Error {
    pub(crate) fn field_type(field: &'static str, expected: &'static str) -> Self {
        Error::InvalidArgument(ArgumentError::FieldType { field, expected })
    }

    pub(crate) fn not_supported() -> Self {
        Error::InvalidArgument(ArgumentError::NotSupported)
    }

    /// Whether the error was caused by the caller's arguments rather than the token
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Whether the error is the generic token rejection
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Error::InvalidToken)
    }
}

/// Precise reason a token or key was rejected.
///
/// Token rejections collapse into [`Error::InvalidToken`], key rejections
/// into [`ArgumentError::NotSupported`].
#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum Rejection {
    // ========================================================================
    // Format
    // ========================================================================
    #[error("token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("missing required header field: {0}")]
    HeaderMissingField(&'static str),

    // ========================================================================
    // Algorithm
    // ========================================================================
    #[error("the 'none' algorithm is rejected")]
    AlgorithmNoneRejected,

    #[error("algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("algorithm '{found}' does not match expected '{expected}'")]
    AlgorithmMismatch { found: String, expected: String },

    #[error("{key_type} key cannot verify {algorithm} signatures")]
    KeyAlgorithmMismatch {
        algorithm: &'static str,
        key_type: &'static str,
    },

    // ========================================================================
    // Signature
    // ========================================================================
    #[error("signature verification failed")]
    SignatureInvalid,

    // ========================================================================
    // Claims
    // ========================================================================
    #[error("token expired at {expired_at} (now: {now}, skew: {skew}s)")]
    TokenExpired { expired_at: f64, now: i64, skew: u64 },

    #[error("token not valid until {not_before} (now: {now}, skew: {skew}s)")]
    TokenNotYetValid { not_before: f64, now: i64, skew: u64 },

    #[error("claim '{0}' is not a numeric date")]
    ClaimNotNumeric(&'static str),

    // ========================================================================
    // Key material
    // ========================================================================
    #[error("PEM input too large: {size} bytes (maximum: {max} bytes)")]
    PemTooLarge { size: usize, max: usize },

    #[error("PEM decoding failed: {0}")]
    PemInvalid(String),

    #[error("PEM label '{0}' is not a supported public key type")]
    PemLabelUnsupported(String),

    #[error("DER decoding failed: {0}")]
    DerInvalid(String),

    #[error("key algorithm {0} is not supported")]
    KeyAlgorithmUnsupported(String),

    #[error("JWK invalid: {0}")]
    JwkInvalid(String),

    #[error("JWK field '{field}' too large: {size} bytes (maximum: {max} bytes)")]
    JwkFieldTooLarge {
        field: &'static str,
        size: usize,
        max: usize,
    },
}

impl Rejection {
    /// Whether this rejection concerns the supplied key rather than the token
    pub(crate) fn is_key_rejection(&self) -> bool {
        matches!(
            self,
            Rejection::PemTooLarge { .. }
                | Rejection::PemInvalid(_)
                | Rejection::PemLabelUnsupported(_)
                | Rejection::DerInvalid(_)
                | Rejection::KeyAlgorithmUnsupported(_)
                | Rejection::JwkInvalid(_)
                | Rejection::JwkFieldTooLarge { .. }
        )
    }
}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        if rejection.is_key_rejection() {
            tracing::debug!(reason = %rejection, "public key rejected");
            Error::not_supported()
        } else {
            tracing::debug!(reason = %rejection, "token rejected");
            Error::InvalidToken
        }
    }
}

/// Result type alias for jwtcheck operations
pub type Result<T> = std::result::Result<T, Error>;
