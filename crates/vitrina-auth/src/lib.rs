//! Identity gateway for Vitrina.
//!
//! Wraps an external identity provider behind a small async trait,
//! caches the signed-in user, and notifies listeners when the session
//! changes. Also carries the allow-list check for admin access.

pub mod admin;
pub mod error;
pub mod gateway;
pub mod user;

pub use admin::AdminList;
pub use error::AuthError;
pub use gateway::{AuthGateway, Credentials, IdentityProvider, MemoryIdentityProvider};
pub use user::User;
