//! `Authorization` pass-through.
//!
//! The gateway never inspects credentials. Whatever the caller sends, or
//! whatever the secret store holds, is forwarded verbatim to the SBC, which
//! is the only party that validates it.

use axum::http::{header, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("missing Authorization header")]
    Missing,
    #[error("authorization value is not a valid header value")]
    Invalid,
}

/// The caller's `Authorization` header, untouched
pub fn passthrough_authorization(headers: &HeaderMap) -> Result<HeaderValue, AuthError> {
    match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(AuthError::Missing),
    }
}

/// Turn a resolved secret into an `Authorization` header value
pub fn authorization_from_secret(secret: &SecretString) -> Result<HeaderValue, AuthError> {
    let mut value =
        HeaderValue::from_str(secret.expose_secret()).map_err(|_| AuthError::Invalid)?;
    value.set_sensitive(true);
    Ok(value)
}
