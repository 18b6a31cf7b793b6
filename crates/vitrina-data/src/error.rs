use thiserror::Error;

/// Errors surfaced by the repositories.
///
/// The distinguished variants mirror the error codes the backing store
/// reports; everything else collapses into `Connection` or
/// `Serialization`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("record not found")]
    NotFound,

    /// The row-level policy rejected the operation.
    #[error("permission denied")]
    PermissionDenied,

    /// A uniqueness constraint was violated, e.g. a second review for
    /// the same product by the same user.
    #[error("duplicate record")]
    UniqueViolation,

    /// The table does not exist yet. Seen on fresh deployments before
    /// migrations have run.
    #[error("table does not exist")]
    UndefinedTable,

    /// The record's current state forbids the requested change, e.g.
    /// re-routing an order that was already delivered or cancelled.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DataError {
    /// Fixed user-facing message for each distinguished code.
    pub fn user_message(&self) -> &'static str {
        match self {
            DataError::NotFound => "Nothing here yet",
            DataError::PermissionDenied => "You do not have access to this",
            DataError::UniqueViolation => "This already exists",
            DataError::UndefinedTable => "The catalog is still being set up",
            DataError::InvalidTransition(_) => "This change is no longer possible",
            DataError::Connection(_) | DataError::Serialization(_) => {
                "Something went wrong, please try again"
            }
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Serialization(err.to_string())
    }
}
