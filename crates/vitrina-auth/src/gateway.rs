use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitrina_commerce::UserId;

use crate::error::AuthError;
use crate::user::User;

/// Email and password as entered by the user. The email is matched
/// trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// The external identity provider behind the gateway.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The user attached to the current session, if any.
    async fn session(&self) -> Result<Option<User>, AuthError>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// Registers an account, attaching `name` as the profile display
    /// name when given.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        name: Option<&str>,
    ) -> Result<User, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

type AuthListener = Box<dyn Fn(Option<&User>) + Send + Sync>;

/// Session front for the storefront.
///
/// Caches the signed-in user so callers never await the provider just
/// to read session state, and notifies subscribed listeners whenever
/// the session changes.
pub struct AuthGateway {
    provider: Arc<dyn IdentityProvider>,
    current: RwLock<Option<User>>,
    listeners: Mutex<Vec<AuthListener>>,
}

impl AuthGateway {
    /// Connects to the provider and loads any existing session.
    /// Listeners registered afterwards still see the restored state
    /// because subscription replays it.
    pub async fn connect(provider: Arc<dyn IdentityProvider>) -> Result<Self, AuthError> {
        let session = provider.session().await?;
        if let Some(user) = &session {
            tracing::debug!(email = %user.email, "restored existing session");
        }
        Ok(Self {
            provider,
            current: RwLock::new(session),
            listeners: Mutex::new(Vec::new()),
        })
    }

    /// Snapshot of the signed-in user.
    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Registers a session listener and immediately replays the
    /// current state to it.
    pub async fn subscribe<F>(&self, listener: F)
    where
        F: Fn(Option<&User>) + Send + Sync + 'static,
    {
        let current = self.current.read().await;
        listener(current.as_ref());
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Box::new(listener));
        }
    }

    /// Signs in with email and password.
    ///
    /// An unconfirmed email is reported as
    /// [`AuthError::EmailNotConfirmed`]; the gateway makes no attempt
    /// to recover from it, the user has to confirm their address first.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let user = self.provider.sign_in(credentials).await?;
        tracing::info!(email = %user.email, "signed in");
        self.set_current(Some(user.clone())).await;
        Ok(user)
    }

    /// Registers a new account with an optional display name and signs
    /// it in.
    ///
    /// If the provider reports the email as already registered, the
    /// gateway falls back to a plain sign-in with the same
    /// credentials, so a returning user who hits "register" by
    /// mistake still ends up signed in.
    pub async fn sign_up(
        &self,
        credentials: &Credentials,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let user = match self.provider.sign_up(credentials, name).await {
            Ok(user) => user,
            Err(AuthError::AlreadyRegistered) => {
                tracing::debug!("account exists, retrying as sign-in");
                self.provider.sign_in(credentials).await?
            }
            Err(err) => return Err(err),
        };
        tracing::info!(email = %user.email, "signed up");
        self.set_current(Some(user.clone())).await;
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await?;
        self.set_current(None).await;
        Ok(())
    }

    async fn set_current(&self, user: Option<User>) {
        {
            let mut current = self.current.write().await;
            *current = user.clone();
        }
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(user.as_ref());
            }
        }
    }
}

#[derive(Debug, Clone)]
struct StoredAccount {
    password: String,
    confirmed: bool,
    user: User,
}

/// In-memory provider for tests and local development.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    accounts: Mutex<HashMap<String, StoredAccount>>,
    session: Mutex<Option<User>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a confirmed account.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.insert_account(email, password, true);
        self
    }

    /// Seeds an account whose email was never confirmed.
    pub fn with_unconfirmed_account(self, email: &str, password: &str) -> Self {
        self.insert_account(email, password, false);
        self
    }

    fn insert_account(&self, email: &str, password: &str, confirmed: bool) {
        let email = email.trim().to_lowercase();
        let user = User::new(UserId::generate(), email.clone());
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.insert(
                email,
                StoredAccount {
                    password: password.to_string(),
                    confirmed,
                    user,
                },
            );
        }
    }

    fn lock_err<T>(_: T) -> AuthError {
        AuthError::Provider("account store poisoned".to_string())
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn session(&self) -> Result<Option<User>, AuthError> {
        let session = self.session.lock().map_err(Self::lock_err)?;
        Ok(session.clone())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let accounts = self.accounts.lock().map_err(Self::lock_err)?;
        let account = accounts
            .get(&credentials.normalized_email())
            .ok_or(AuthError::InvalidCredentials)?;
        if account.password != credentials.password {
            return Err(AuthError::InvalidCredentials);
        }
        if !account.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }
        let user = account.user.clone();
        drop(accounts);

        let mut session = self.session.lock().map_err(Self::lock_err)?;
        *session = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let email = credentials.normalized_email();
        let mut accounts = self.accounts.lock().map_err(Self::lock_err)?;
        if accounts.contains_key(&email) {
            return Err(AuthError::AlreadyRegistered);
        }
        let mut user = User::new(UserId::generate(), email.clone());
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            user = user.with_name(name);
        }
        accounts.insert(
            email,
            StoredAccount {
                password: credentials.password.clone(),
                confirmed: true,
                user: user.clone(),
            },
        );
        drop(accounts);

        let mut session = self.session.lock().map_err(Self::lock_err)?;
        *session = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut session = self.session.lock().map_err(Self::lock_err)?;
        *session = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn provider() -> Arc<MemoryIdentityProvider> {
        Arc::new(MemoryIdentityProvider::new().with_account("anna@example.com", "s3cret"))
    }

    #[tokio::test]
    async fn test_sign_in_caches_user() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        assert!(!gateway.is_signed_in().await);

        let creds = Credentials::new("anna@example.com", "s3cret");
        let user = gateway.sign_in(&creds).await.unwrap();
        assert_eq!(user.email, "anna@example.com");
        assert_eq!(gateway.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn test_sign_in_normalizes_email() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        let creds = Credentials::new("  Anna@Example.COM ", "s3cret");
        assert!(gateway.sign_in(&creds).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        let creds = Credentials::new("anna@example.com", "wrong");
        assert_eq!(
            gateway.sign_in(&creds).await,
            Err(AuthError::InvalidCredentials)
        );
        assert!(!gateway.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_unconfirmed_email_is_surfaced_not_recovered() {
        let provider = Arc::new(
            MemoryIdentityProvider::new().with_unconfirmed_account("new@example.com", "pw"),
        );
        let gateway = AuthGateway::connect(provider).await.unwrap();
        let creds = Credentials::new("new@example.com", "pw");
        assert_eq!(
            gateway.sign_in(&creds).await,
            Err(AuthError::EmailNotConfirmed)
        );
        assert!(!gateway.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_sign_up_stores_display_name() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        let creds = Credentials::new("boris@example.com", "pw");
        let user = gateway.sign_up(&creds, Some("Boris")).await.unwrap();
        assert_eq!(user.name.as_deref(), Some("Boris"));
        assert_eq!(user.display_name(), "Boris");
        assert_eq!(
            gateway.current_user().await.and_then(|u| u.name),
            Some("Boris".to_string())
        );
    }

    #[tokio::test]
    async fn test_sign_up_without_name_falls_back_to_email_local_part() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        let creds = Credentials::new("boris@example.com", "pw");
        let user = gateway.sign_up(&creds, None).await.unwrap();
        assert_eq!(user.name, None);
        assert_eq!(user.display_name(), "boris");

        // Blank names are treated as absent.
        let creds = Credentials::new("vera@example.com", "pw");
        let user = gateway.sign_up(&creds, Some("   ")).await.unwrap();
        assert_eq!(user.name, None);
    }

    #[tokio::test]
    async fn test_sign_up_falls_back_to_sign_in_for_existing_account() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        let creds = Credentials::new("anna@example.com", "s3cret");
        let user = gateway.sign_up(&creds, Some("Anna")).await.unwrap();
        assert_eq!(user.email, "anna@example.com");
        assert!(gateway.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_sign_up_fallback_with_wrong_password_fails() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        let creds = Credentials::new("anna@example.com", "different");
        assert_eq!(
            gateway.sign_up(&creds, None).await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        let creds = Credentials::new("anna@example.com", "s3cret");
        gateway.sign_in(&creds).await.unwrap();
        gateway.sign_out().await.unwrap();
        assert!(!gateway.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_connect_restores_existing_session() {
        let provider = provider();
        provider
            .sign_in(&Credentials::new("anna@example.com", "s3cret"))
            .await
            .unwrap();

        let gateway = AuthGateway::connect(provider).await.unwrap();
        assert!(gateway.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_subscribe_replays_current_state_and_tracks_changes() {
        let gateway = AuthGateway::connect(provider()).await.unwrap();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_in_listener = fired.clone();
        gateway
            .subscribe(move |_| {
                fired_in_listener.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        // Replayed once on subscription.
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        let creds = Credentials::new("anna@example.com", "s3cret");
        gateway.sign_in(&creds).await.unwrap();
        gateway.sign_out().await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }
}
