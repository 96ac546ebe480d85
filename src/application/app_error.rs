use thiserror::Error;

/// Credential failures produced by the token codec, the extractors and the
/// session use cases.
///
/// These are precise on purpose so they can be logged and asserted on. They
/// are collapsed into the coarser [`AppError`] before anything reaches a
/// client.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token is malformed")]
    TokenMalformed,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token issuer mismatch")]
    IssuerMismatch,

    #[error("Token subject is not a valid user id")]
    InvalidSubject,

    #[error("No authorization header")]
    NoAuthHeader,

    #[error("Malformed authorization header")]
    MalformedAuthHeader,

    #[error("No API key")]
    NoApiKey,

    #[error("Malformed API key header")]
    MalformedApiKeyHeader,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("User not found")]
    UserNotFound,

    #[error("Password mismatch")]
    PasswordMismatch,

    #[error("Refresh token not found")]
    TokenNotFound,

    #[error("Refresh token expired or revoked")]
    TokenExpiredOrRevoked,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(AuthError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // Never tell the caller which half of the credential pair was wrong.
            AuthError::UserNotFound | AuthError::PasswordMismatch => AppError::InvalidCredentials,
            other => AppError::Unauthenticated(other),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    DatabaseError,
    InvalidCredentials,
    Unauthenticated,
    InvalidInput,
    Forbidden,
    NotFound,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
