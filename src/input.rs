//! Verification entry point for dynamically typed arguments
//!
//! Callers that receive the token and key as JSON values (configuration
//! files, RPC payloads, foreign bindings) get the argument checks with the
//! descriptive `Field ... should be of type ...` errors before any token
//! processing happens.

use crate::error::{Error, Rejection, Result};
use crate::keys::{Jwk, KeyInput};
use crate::token::DecodedToken;
use crate::verifier::jwt_verify;
use serde::Deserialize;
use serde_json::Value;

/// Verify a JWT given as untyped JSON values
///
/// `token` must be a JSON string, `key` a JSON string (PEM) or object (JWK).
/// Missing arguments are reported exactly like arguments of the wrong type.
pub fn jwt_verify_value(
    token: Option<&Value>,
    key: Option<&Value>,
    algorithm: Option<&str>,
) -> Result<DecodedToken> {
    let token = match token {
        Some(Value::String(token)) => token,
        _ => return Err(Error::field_type("jwt", "string")),
    };
    let key = match key {
        Some(key) => KeyInput::try_from(key)?,
        None => return Err(Error::field_type("pubKey", "string,object")),
    };

    jwt_verify(token, key, algorithm)
}

impl TryFrom<&Value> for KeyInput {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(pem) => Ok(KeyInput::Pem(pem.clone())),
            Value::Object(_) => {
                let jwk = Jwk::deserialize(value).map_err(|e| {
                    Error::from(Rejection::JwkInvalid(format!("not a JWK object: {e}")))
                })?;
                Ok(KeyInput::Jwk(jwk))
            }
            _ => Err(Error::field_type("pubKey", "string,object")),
        }
    }
}
