use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Shallow expiry check: decode the payload segment and compare `exp` with
/// the current time. No signature verification; the backend remains the
/// authority on token validity.
pub fn is_token_expired(token: &str) -> bool {
    let payload = match token.split('.').nth(1) {
        Some(segment) => segment,
        None => return true,
    };
    let bytes = match URL_SAFE_NO_PAD.decode(payload) {
        Ok(bytes) => bytes,
        Err(_) => return true,
    };
    let claims: Claims = match serde_json::from_slice(&bytes) {
        Ok(claims) => claims,
        Err(_) => return true,
    };
    match claims.exp {
        Some(exp) => exp <= chrono::Utc::now().timestamp(),
        None => true,
    }
}
