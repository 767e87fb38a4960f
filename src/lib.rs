//! Verify JSON Web Tokens against a public key.
//!
//! The key is given as PEM text or as a JWK. The token must be signed with one
//! expected algorithm, RS256 unless another is named. On success the decoded
//! header and payload are returned unchanged.
//!
//! ```no_run
//! use jwtcheck::{jwt_verify, AlgorithmType, JwtVerifier};
//!
//! # fn main() -> jwtcheck::Result<()> {
//! # let pem = "";
//! # let token = "";
//! // One-off verification
//! let decoded = jwt_verify(token, pem, Some("ES256"))?;
//! let subject = decoded.subject();
//!
//! // Reusable verifier
//! let verifier = JwtVerifier::builder()
//!     .key(pem)
//!     .algorithm(AlgorithmType::ES256)
//!     .clock_skew(30)
//!     .build()?;
//! let decoded = verifier.verify(token)?;
//! # Ok(())
//! # }
//! ```
//!
//! Failures are deliberately coarse: argument problems are reported as
//! [`Error::InvalidArgument`], everything wrong with the token itself as
//! [`Error::InvalidToken`]. The specific reason is emitted as a `tracing`
//! debug event.

mod error;
mod input;
mod keys;
mod token;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod claims;
pub(crate) mod utils;
pub(crate) mod verifier;

// Public Interface
pub use algorithm::{AlgorithmType, DEFAULT_ALGORITHM};
pub use error::{ArgumentError, Error, Result};
pub use input::jwt_verify_value;
pub use keys::{EcCurve, EcPublicKey, Ed25519PublicKey, Jwk, KeyInput, PublicKey, RsaPublicKey};
pub use token::DecodedToken;
pub use verifier::{jwt_verify, JwtVerifier, JwtVerifierBuilder};

pub(crate) mod limits;
