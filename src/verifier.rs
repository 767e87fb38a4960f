use crate::algorithm::{AlgorithmType, DEFAULT_ALGORITHM};
use crate::claims::{current_timestamp, validate_temporal};
use crate::error::{Error, Rejection, Result};
use crate::keys::{KeyInput, PublicKey};
use crate::limits::MAX_CLOCK_SKEW_SECONDS;
use crate::token::{DecodedToken, TokenParts};
use std::sync::Arc;

/// Verify a JWT against a public key
///
/// `key` is PEM text or a [`Jwk`](crate::Jwk). When `algorithm` is `None` the
/// token must be signed with [`DEFAULT_ALGORITHM`] (RS256).
///
/// ```no_run
/// # fn main() -> jwtcheck::Result<()> {
/// let pem = std::fs::read_to_string("public.pem").unwrap();
/// let token = "eyJhbGciOiJSUzI1NiJ9.e30.c2ln";
///
/// let decoded = jwtcheck::jwt_verify(token, pem.as_str(), None)?;
/// println!("issued by {:?}", decoded.issuer());
/// # Ok(())
/// # }
/// ```
pub fn jwt_verify(
    token: &str,
    key: impl Into<KeyInput>,
    algorithm: Option<&str>,
) -> Result<DecodedToken> {
    let key = key.into().normalize()?;
    let algorithm = match algorithm {
        Some(name) => AlgorithmType::parse(name)?,
        None => DEFAULT_ALGORITHM,
    };

    JwtVerifier::new(key).with_algorithm(algorithm).verify(token)
}

/// Reusable JWT verifier
///
/// Holds a normalized public key, the one algorithm tokens must be signed
/// with and a clock skew tolerance. Cloning shares the key.
#[derive(Debug, Clone)]
pub struct JwtVerifier {
    key: Arc<PublicKey>,
    algorithm: AlgorithmType,
    clock_skew: u64,
}

impl JwtVerifier {
    /// Create a verifier for `key` expecting RS256 with no clock skew
    pub fn new(key: PublicKey) -> Self {
        Self {
            key: Arc::new(key),
            algorithm: DEFAULT_ALGORITHM,
            clock_skew: 0,
        }
    }

    /// Start configuring a verifier
    pub fn builder() -> JwtVerifierBuilder {
        JwtVerifierBuilder::default()
    }

    fn with_algorithm(mut self, algorithm: AlgorithmType) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Expected signing algorithm
    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    /// Clock skew tolerance in seconds
    pub fn clock_skew(&self) -> u64 {
        self.clock_skew
    }

    /// Verification key
    pub fn public_key(&self) -> &PublicKey {
        &self.key
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<DecodedToken> {
        self.verify_at(token, current_timestamp())
    }

    /// Verify a token as of `now` (seconds since the Unix epoch)
    pub fn verify_at(&self, token: &str, now: i64) -> Result<DecodedToken> {
        Ok(self.check(token, now)?)
    }

    fn check(&self, token: &str, now: i64) -> std::result::Result<DecodedToken, Rejection> {
        // 1-2. Split, decode and parse header and payload
        let parts = TokenParts::parse(token)?;

        // 3. The header must name exactly the expected algorithm
        let found = AlgorithmType::parse(parts.algorithm()?)?;
        if found != self.algorithm {
            return Err(Rejection::AlgorithmMismatch {
                found: found.to_string(),
                expected: self.algorithm.to_string(),
            });
        }

        // 4. Signature over header.payload
        self.algorithm
            .verify_signature(&parts.signing_input(), parts.signature_b64, &self.key)?;

        // 5. exp / nbf
        validate_temporal(&parts.payload, now, self.clock_skew)?;

        let decoded = parts.into_decoded();
        tracing::trace!(
            algorithm = %self.algorithm,
            kid = decoded.key_id().unwrap_or_default(),
            "token verified"
        );
        Ok(decoded)
    }
}

/// Builder for [`JwtVerifier`]
#[derive(Debug, Clone, Default)]
pub struct JwtVerifierBuilder {
    config_key: Option<KeyInput>,
    config_algorithm: Option<AlgorithmType>,
    config_clock_skew: u64,
}

impl JwtVerifierBuilder {
    /// Configure the verification key (PEM text or JWK)
    pub fn key(&mut self, key: impl Into<KeyInput>) -> &mut Self {
        self.config_key = Some(key.into());
        self
    }

    /// Configure the expected algorithm (default RS256)
    pub fn algorithm(&mut self, algorithm: AlgorithmType) -> &mut Self {
        self.config_algorithm = Some(algorithm);
        self
    }

    /// Set clock skew tolerance for `exp` and `nbf`
    ///
    /// At most 300 seconds; larger values are rejected by [`build`](Self::build).
    pub fn clock_skew(&mut self, seconds: u64) -> &mut Self {
        self.config_clock_skew = seconds;
        self
    }

    /// Normalize the key and produce the verifier
    pub fn build(&self) -> Result<JwtVerifier> {
        let key = self
            .config_key
            .as_ref()
            .ok_or_else(|| Error::ConfigurationInvalid("no verification key configured".into()))?;

        if self.config_clock_skew > MAX_CLOCK_SKEW_SECONDS {
            return Err(Error::ConfigurationInvalid(format!(
                "clock skew {}s exceeds maximum of {MAX_CLOCK_SKEW_SECONDS}s",
                self.config_clock_skew
            )));
        }

        Ok(JwtVerifier {
            key: Arc::new(key.normalize()?),
            algorithm: self.config_algorithm.unwrap_or(DEFAULT_ALGORITHM),
            clock_skew: self.config_clock_skew,
        })
    }
}
