use axum::http::HeaderMap;
use subtle::ConstantTimeEq;
use tracing::warn;

use super::bearer::extract_api_key;
use crate::error::AppError;

/// Accepts only `Authorization: ApiKey <expected>`. Every failure is the same
/// `Unauthorized`.
pub fn check_api_key(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let presented = extract_api_key(headers).map_err(|e| {
        warn!(error = %e, "api key rejected");
        AppError::Unauthorized
    })?;
    if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        warn!("api key mismatch");
        Err(AppError::Unauthorized)
    }
}
