use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Every recoverable outcome an operation can hand back to the host layer.
/// The host maps these to its own responses (403 for `Forbidden`, 404 for
/// `NotFound`, a flashed message for the rest); only `Database` is fatal.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("that email is already taken")]
    DuplicateEmail,
    #[error("please check email and password")]
    InvalidCredentials,
    #[error("you do not have permission to log in via this portal")]
    RoleMismatch,
    #[error("you do not have permission to do that")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("invalid rsvp status")]
    InvalidStatus,
    #[error("this event has already passed")]
    EventPast,
    #[error("a conflicting row already exists")]
    Conflict,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Folds a failed insert into the taxonomy: a unique-constraint hit
    /// becomes `Conflict`, anything else stays a storage fault.
    pub(crate) fn from_insert(err: sqlx::Error) -> AppError {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict,
            other => AppError::Database(other),
        }
    }
}
