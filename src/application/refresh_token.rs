//! Opaque refresh token generation.

use rand::RngCore;

use crate::app_error::{AppError, AppResult};

/// Number of random bytes behind each refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a new refresh token: 32 bytes from the OS RNG, hex encoded.
pub fn generate() -> AppResult<String> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::Internal(format!("refresh token rng: {e}")))?;
    Ok(hex::encode(bytes))
}
