use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult, AuthError};

/// Issuer claim stamped on every access token and required on validation.
pub const ISSUER: &str = "chirpy";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    // Defaulted so a missing issuer is reported as an issuer failure, not a parse failure.
    #[serde(default)]
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue an HS256 access token for `user_id` that expires `ttl` from now.
///
/// A negative `ttl` yields a token that is already expired.
pub fn issue(user_id: Uuid, secret: &SecretString, ttl: Duration) -> AppResult<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let exp = now + ttl.whole_seconds();
    let claims = Claims {
        iss: ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now,
        exp,
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

/// Validate an access token and return the user id it was issued for.
pub fn validate(token: &str, secret: &SecretString) -> Result<Uuid, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| classify(e.kind()))?;

    // jsonwebtoken accepts exp == now; a token is dead from its expiry second on.
    if claims.exp <= OffsetDateTime::now_utc().unix_timestamp() {
        return Err(AuthError::TokenExpired);
    }

    Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubject)
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::SignatureInvalid,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer => AuthError::IssuerMismatch,
        ErrorKind::MissingRequiredClaim(claim) if claim == "iss" => AuthError::IssuerMismatch,
        _ => AuthError::TokenMalformed,
    }
}
