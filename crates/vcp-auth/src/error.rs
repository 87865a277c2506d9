//! Authorization errors.
//!
//! Only two things can actually fail here: resolving an identity and
//! overlapping login attempts. Everything else in this crate is a
//! query that answers `false`, or a guard decision that renders a
//! denial — unauthorized access is a normal outcome, never an error.

use thiserror::Error;

/// Error returned by [`AuthEngine::login`](crate::AuthEngine::login).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider rejected the credentials or failed.
    ///
    /// Session state is left exactly as it was before the call.
    #[error("authentication failed: {0}")]
    IdentityFailed(String),

    /// A login is already resolving.
    ///
    /// Exactly one identity resolution may be in flight at a time;
    /// a second call is rejected instead of racing the first one to
    /// overwrite session state.
    #[error("a login is already in progress")]
    LoginInProgress,
}
