//! Password hashing via bcrypt.

use bcrypt::BcryptError;

use crate::app_error::{AppError, AppResult, AuthError};

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Longest password bcrypt can digest without dropping bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with bcrypt at the given cost.
///
/// Passwords longer than [`MAX_PASSWORD_BYTES`] are rejected rather than
/// truncated.
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::non_truncating_hash(password, cost).map_err(|e| match e {
        BcryptError::Truncation(_) => AppError::InvalidInput(format!(
            "Password must be at most {MAX_PASSWORD_BYTES} bytes"
        )),
        other => AppError::Internal(format!("bcrypt hash: {other}")),
    })
}

/// Verify a password against a bcrypt hash.
///
/// A wrong password and a digest that cannot be parsed both come back as
/// [`AuthError::PasswordMismatch`].
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    match bcrypt::non_truncating_verify(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) | Err(BcryptError::Truncation(_)) => Err(AuthError::PasswordMismatch),
        Err(err) => {
            tracing::warn!(error = %err, "Stored password hash could not be verified");
            Err(AuthError::PasswordMismatch)
        }
    }
}
