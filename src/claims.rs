//! Temporal claim validation (exp, nbf)

use crate::error::Rejection;
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Validate `exp` and `nbf` against `now`, widened by `skew` seconds
///
/// A token is expired once `exp + skew <= now`, and not yet valid while
/// `nbf - skew > now`. Claims are compared as JSON numbers, so fractional
/// timestamps are honoured. A present but non-numeric claim is rejected.
pub(crate) fn validate_temporal(
    payload: &Map<String, Value>,
    now: i64,
    skew: u64,
) -> Result<(), Rejection> {
    let skew_f = skew as f64;
    let now_f = now as f64;

    if let Some(exp) = numeric_date(payload, "exp")? {
        if exp + skew_f <= now_f {
            return Err(Rejection::TokenExpired {
                expired_at: exp,
                now,
                skew,
            });
        }
    }

    if let Some(nbf) = numeric_date(payload, "nbf")? {
        if nbf - skew_f > now_f {
            return Err(Rejection::TokenNotYetValid {
                not_before: nbf,
                now,
                skew,
            });
        }
    }

    Ok(())
}

fn numeric_date(payload: &Map<String, Value>, claim: &'static str) -> Result<Option<f64>, Rejection> {
    match payload.get(claim) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or(Rejection::ClaimNotNumeric(claim)),
    }
}

/// Get current Unix timestamp
pub(crate) fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs() as i64
}
