use async_graphql::ErrorExtensions;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Request-level failures surfaced to GraphQL callers. The variant messages
/// are part of the API contract and must not change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("User not found.")]
    UserNotFound,

    #[error("User not found. Cannot post message.")]
    PostAuthorNotFound,

    #[error("A user with this email already exists.")]
    DuplicateEmail,

    #[error("Rate limit exceeded. You can post a maximum of {0} messages per hour.")]
    RateLimitExceeded(u32),

    #[error("database error: {0}")]
    Database(String),
}

impl ApiError {
    /// Machine-readable code exposed in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UserNotFound | ApiError::PostAuthorNotFound => "NOT_FOUND",
            ApiError::DuplicateEmail => "DUPLICATE_EMAIL",
            ApiError::RateLimitExceeded(_) => "RATE_LIMITED",
            ApiError::Database(_) => "INTERNAL",
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // The unique constraint on users.email backs the duplicate check
        // against concurrent inserts that both pass it.
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return ApiError::DuplicateEmail;
            }
        }
        tracing::error!("database error: {}", err);
        ApiError::Database(err.to_string())
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, e| e.set("code", self.code()))
    }
}
