//! Credential extraction from the `Authorization` header.
//!
//! Both helpers accept exactly `<scheme> <value>`: one space, scheme compared
//! case-insensitively, value returned verbatim.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("authorization header not found")]
    Missing,
    #[error("invalid authorization header")]
    Malformed,
}

pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, CredentialError> {
    extract_scheme(headers, "bearer")
}

pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, CredentialError> {
    extract_scheme(headers, "apikey")
}

fn extract_scheme<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, CredentialError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(CredentialError::Missing)?
        .to_str()
        .map_err(|_| CredentialError::Malformed)?;
    if value.is_empty() {
        return Err(CredentialError::Missing);
    }

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(s), Some(v), None) if s.eq_ignore_ascii_case(scheme) && !v.is_empty() => Ok(v),
        _ => Err(CredentialError::Malformed),
    }
}
