//! Credentials sign-in action

use crate::core::auth::{AuthErrorKind, AuthProvider, CREDENTIALS_STRATEGY, SignInError};
use crate::core::form::FormData;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const SOMETHING_WENT_WRONG: &str = "Something Went Wrong";

/// Sign in with the credentials carried by `form`
///
/// - `Ok(None)`: the provider accepted the credentials
/// - `Ok(Some(message))`: a recognized authentication failure, as text for
///   the form
/// - `Err(e)`: any other failure, returned exactly as the provider raised it
///
/// The second argument is the previous attempt's message; it does not
/// influence this one.
pub async fn authenticate(
    provider: &dyn AuthProvider,
    _previous: Option<&str>,
    form: &FormData,
) -> anyhow::Result<Option<String>> {
    match provider.sign_in(CREDENTIALS_STRATEGY, form).await {
        Ok(()) => Ok(None),
        Err(SignInError::Auth(err)) => {
            tracing::info!(kind = %err.kind, "sign-in rejected");
            let message = match err.kind {
                AuthErrorKind::CredentialsSignin => INVALID_CREDENTIALS,
                _ => SOMETHING_WENT_WRONG,
            };
            Ok(Some(message.to_string()))
        }
        Err(SignInError::Internal(err)) => Err(err),
    }
}
