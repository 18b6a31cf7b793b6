use serde::{Deserialize, Serialize};
use vitrina_commerce::UserId;

/// A signed-in user as seen by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name to greet the user with: their profile name, falling back
    /// to the part of the email before the `@`.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_profile_name() {
        let user = User::new(UserId::from("u1"), "anna@example.com").with_name("Anna");
        assert_eq!(user.display_name(), "Anna");
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        let user = User::new(UserId::from("u1"), "anna@example.com");
        assert_eq!(user.display_name(), "anna");

        let blank = User::new(UserId::from("u2"), "bo@example.com").with_name("   ");
        assert_eq!(blank.display_name(), "bo");
    }
}
