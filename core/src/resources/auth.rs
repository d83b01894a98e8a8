//! Credential lookup against `/api/users/login`.
//!
//! The backend answers with the list of user records matching the email.
//! Password enforcement is the backend's job; the client only checks that
//! the first record belongs to the email it asked about.

use tracing::{debug, error};

use crate::client::ApiClient;
use crate::types::{Identity, UserProfile};

pub const INVALID_CREDENTIALS: &str = "invalid email or password";
pub const CONNECTION_ERROR: &str = "connection error";

const MIN_PASSWORD_LEN: usize = 6;

/// Result of a login attempt. Failures are values, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(Identity),
    /// The backend knows no matching account.
    InvalidCredentials,
    /// The backend could not be reached or answered unexpectedly.
    ConnectionFailure,
    /// The credentials were malformed and no request was issued.
    Rejected(String),
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            LoginOutcome::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// User-facing reason for a failed attempt.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoginOutcome::Authenticated(_) => None,
            LoginOutcome::InvalidCredentials => Some(INVALID_CREDENTIALS),
            LoginOutcome::ConnectionFailure => Some(CONNECTION_ERROR),
            LoginOutcome::Rejected(reason) => Some(reason),
        }
    }
}

/// Shape check applied before a login request: the email must look like an
/// address and the password must have at least six characters.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if !(email.contains('@') && email.contains('.')) {
        return Err("enter a valid email address".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "password must have at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let users: Vec<UserProfile> = match self
            .client
            .get(
                "/api/users/login",
                &[("email", email), ("password", password)],
            )
            .await
        {
            Ok(users) => users,
            Err(err) => {
                error!(error = %err, "login request failed");
                return LoginOutcome::ConnectionFailure;
            }
        };

        match users.into_iter().next() {
            Some(user) if user.email == email => LoginOutcome::Authenticated(user.into()),
            _ => {
                debug!("no account matched the supplied credentials");
                LoginOutcome::InvalidCredentials
            }
        }
    }
}
