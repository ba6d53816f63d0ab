use thiserror::Error;

/// Caller-visible errors produced by the user and profile services.
///
/// Raw storage errors never cross the service boundary; the `From`
/// conversion below translates them once, at the repository edge.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("user already has a freelancer profile")]
    DuplicateProfile,

    #[error("record not found")]
    NotFound,

    #[error("storage unavailable")]
    Unavailable(#[source] sqlx::Error),

    #[error("storage error")]
    Storage(#[source] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound,
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.into_owned());
                let constraint = db.constraint().map(|c| c.to_string());
                match (code.as_deref(), constraint.as_deref()) {
                    (Some("23505"), Some("users_email_key")) => Error::DuplicateEmail,
                    (Some("23505"), Some("freelancer_profiles_user_id_key")) => Error::DuplicateProfile,
                    // FK target missing: the referenced user does not exist.
                    (Some("23503"), _) => Error::NotFound,
                    _ => Error::Storage(sqlx::Error::Database(db)),
                }
            }
            e @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)) => {
                Error::Unavailable(e)
            }
            e => Error::Storage(e),
        }
    }
}

impl Error {
    /// True for faults worth retrying at a higher layer.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}
