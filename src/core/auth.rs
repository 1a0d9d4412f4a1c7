//! Authentication gate
//!
//! Credential verification is delegated to an [`IdentityProvider`]. The
//! [`authenticate`] entry point only classifies what the provider reports:
//! - rejected credentials → "Invalid credentials."
//! - any other provider-reported [`AuthError`] → "Something went wrong."
//! - anything else is not an authentication failure and is returned as `Err`

use crate::core::error::AuthError;
use crate::core::validation::FormData;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const MSG_SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// Minimum password length accepted before the provider is consulted
pub const MIN_PASSWORD_LEN: usize = 6;

/// Credentials submitted on the login form
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            email: form.get("email").unwrap_or_default().trim().to_string(),
            password: form.get("password").unwrap_or_default().to_string(),
        }
    }

    /// Shape check done before any lookup
    fn is_well_formed(&self) -> bool {
        let email_ok = match self.email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !self.email.contains(char::is_whitespace)
            }
            None => false,
        };
        email_ok && self.password.chars().count() >= MIN_PASSWORD_LEN
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed-in user, stored in the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub name: String,
}

/// Outcome of a sign-in attempt that the login form can display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignIn {
    Authenticated(Session),
    Rejected(&'static str),
}

/// Trait for identity providers
///
/// Providers report authentication failures as [`AuthError`] inside the
/// `anyhow::Error`; any other error type is treated as unexpected.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session>;
}

/// Verify a login form and classify the provider's answer
pub async fn authenticate(provider: &dyn IdentityProvider, form: &FormData) -> Result<SignIn> {
    let credentials = Credentials::from_form(form);

    match provider.sign_in(&credentials).await {
        Ok(session) => {
            tracing::info!(email = %session.email, "user signed in");
            Ok(SignIn::Authenticated(session))
        }
        Err(err) => match err.downcast_ref::<AuthError>() {
            Some(AuthError::CredentialsSignin) => {
                tracing::debug!(email = %credentials.email, "sign-in rejected");
                Ok(SignIn::Rejected(MSG_INVALID_CREDENTIALS))
            }
            Some(other) => {
                tracing::warn!(code = other.error_code(), "sign-in failed: {}", other);
                Ok(SignIn::Rejected(MSG_SOMETHING_WENT_WRONG))
            }
            None => Err(err),
        },
    }
}

/// An account allowed to sign in
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAccount {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

impl std::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccount")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Provider backed by the accounts listed in the configuration
#[derive(Debug, Clone)]
pub struct StaticCredentialsProvider {
    users: Vec<UserAccount>,
}

impl StaticCredentialsProvider {
    pub fn new(users: Vec<UserAccount>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl IdentityProvider for StaticCredentialsProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        if self.users.is_empty() {
            return Err(AuthError::Configuration {
                message: "no user accounts configured".to_string(),
            }
            .into());
        }

        if !credentials.is_well_formed() {
            return Err(AuthError::CredentialsSignin.into());
        }

        let account = self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(&credentials.email))
            .ok_or(AuthError::CredentialsSignin)?;

        let matches: bool = account
            .password
            .as_bytes()
            .ct_eq(credentials.password.as_bytes())
            .into();
        if !matches {
            return Err(AuthError::CredentialsSignin.into());
        }

        Ok(Session {
            email: account.email.clone(),
            name: if account.name.is_empty() {
                account.email.clone()
            } else {
                account.name.clone()
            },
        })
    }
}
