//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

// ============================================================================
// Decoded segment limits
// ============================================================================

/// Maximum size for decoded JWT header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes, everything else is smaller
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum size for the Base64URL-encoded signature string
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1366;

/// Maximum length for the algorithm (alg) header field
pub(crate) const MAX_ALG_LENGTH: usize = 16;

// ============================================================================
// Key material limits
// ============================================================================

/// Maximum length of a PEM key string (16KB)
pub(crate) const MAX_PEM_LENGTH: usize = 16 * 1024;

/// Maximum size for Base64URL-encoded RSA modulus (n) field (12KB)
pub(crate) const MAX_JWK_N_SIZE: usize = 12 * 1024;

/// Maximum size for Base64URL-encoded RSA exponent (e) field
pub(crate) const MAX_JWK_E_SIZE: usize = 64;

/// Maximum size for a Base64URL-encoded curve coordinate (x, y)
/// P-521 coordinates are 66 bytes, 88 characters encoded
pub(crate) const MAX_JWK_COORDINATE_SIZE: usize = 96;

/// Smallest RSA modulus accepted, in bytes (2048 bits)
pub(crate) const MIN_RSA_MODULUS_SIZE: usize = 256;

/// Largest RSA modulus accepted, in bytes (8192 bits)
pub(crate) const MAX_RSA_MODULUS_SIZE: usize = 1024;

// ============================================================================
// Validation bounds
// ============================================================================

/// Maximum clock skew tolerance (300 seconds = 5 minutes)
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;
