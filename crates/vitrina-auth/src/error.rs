use thiserror::Error;

/// Errors surfaced by the identity gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong email or password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The account exists but the email has not been confirmed yet.
    /// Callers are expected to tell the user to check their inbox, not
    /// to retry.
    #[error("email address has not been confirmed")]
    EmailNotConfirmed,

    /// Sign-up hit an account that already exists.
    #[error("an account with this email is already registered")]
    AlreadyRegistered,

    /// The provider rejected the request for a reason of its own.
    #[error("identity provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Message suitable for direct display.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::EmailNotConfirmed => {
                "Please confirm your email address before signing in".to_string()
            }
            AuthError::AlreadyRegistered => {
                "An account with this email already exists".to_string()
            }
            AuthError::Provider(_) => "Sign-in is temporarily unavailable".to_string(),
        }
    }
}
