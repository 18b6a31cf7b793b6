use crate::user::User;

/// Environment variable holding the comma-separated admin allow-list.
pub const ADMIN_EMAILS_ENV: &str = "VITRINA_ADMIN_EMAILS";

/// The set of email addresses granted admin access.
///
/// Matching is case-insensitive and ignores surrounding whitespace. An
/// empty list means nobody is an admin, not everybody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminList {
    emails: Vec<String>,
}

impl AdminList {
    /// Parses a comma-separated list, e.g. `"a@x.com, b@y.com"`.
    /// Empty segments are skipped.
    pub fn parse(raw: &str) -> Self {
        let emails = raw
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { emails }
    }

    /// Reads the allow-list from [`ADMIN_EMAILS_ENV`]. An unset
    /// variable yields an empty list.
    pub fn from_env() -> Self {
        match std::env::var(ADMIN_EMAILS_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn contains(&self, email: &str) -> bool {
        let needle = email.trim().to_lowercase();
        self.emails.iter().any(|e| e == &needle)
    }

    pub fn is_admin(&self, user: &User) -> bool {
        self.contains(&user.email)
    }
}
