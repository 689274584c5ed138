//! Sign-in collaborator for the dashboard
//!
//! The provider owns credential verification and session establishment. This
//! crate only hands it the submitted form and reads back a typed failure:
//! - [`AuthError`]: a recognized authentication failure with a kind
//! - any other failure: opaque, carried as `anyhow::Error`

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::core::form::FormData;

/// Strategy name for username/password sign-in
pub const CREDENTIALS_STRATEGY: &str = "credentials";

/// Kind of a recognized authentication failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The submitted credentials did not match an account
    CredentialsSignin,
    /// The provider refused access to an otherwise valid account
    AccessDenied,
    /// The provider is misconfigured (unknown strategy, missing secret, ...)
    Configuration,
    /// A provider callback failed
    CallbackRouteError,
    /// Any other kind reported by the provider
    Other(String),
}

impl AuthErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            AuthErrorKind::CredentialsSignin => "CredentialsSignin",
            AuthErrorKind::AccessDenied => "AccessDenied",
            AuthErrorKind::Configuration => "Configuration",
            AuthErrorKind::CallbackRouteError => "CallbackRouteError",
            AuthErrorKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized authentication failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("authentication failed ({kind})")]
pub struct AuthError {
    pub kind: AuthErrorKind,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind) -> Self {
        Self { kind }
    }
}

/// Failure of a sign-in attempt
#[derive(Debug, Error)]
pub enum SignInError {
    /// The provider recognized and classified the failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Anything else: network, storage, bugs
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify the form's credentials with `strategy` and establish a session
    ///
    /// Returns normally on success; session side effects are the provider's
    /// business.
    async fn sign_in(&self, strategy: &str, form: &FormData) -> Result<(), SignInError>;
}

/// Provider used when no real one is configured
///
/// Every attempt fails as a configuration error, so sign-in degrades to a
/// generic message instead of letting anyone through.
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn sign_in(&self, strategy: &str, _form: &FormData) -> Result<(), SignInError> {
        tracing::warn!(strategy, "sign-in attempted without an auth provider");
        Err(AuthError::new(AuthErrorKind::Configuration).into())
    }
}
