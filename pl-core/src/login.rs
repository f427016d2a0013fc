//! Login request seam.
//!
//! The login page issues exactly one request per submit and reacts to the
//! result; there is no session handling. Transport lives behind
//! [`LoginClient`] so front ends can plug in an HTTP client and tests can
//! plug in a stub.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::forms::{FormError, LoginForm};
use crate::models::LoginCredentials;

/// Path of the login endpoint relative to the API base URL.
pub const LOGIN_PATH: &str = "/api/login";

/// Route the client navigates to after a successful login.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// The form failed client-side validation; nothing was sent.
    #[error("login form is invalid ({} problem(s))", .0.len())]
    Validation(Vec<FormError>),

    /// The request could not be completed.
    #[error("network error: {0}")]
    Network(String),
}

/// Result of a login request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Any 2xx status. The client should navigate to `redirect`.
    Success { redirect: String },
    /// Any other status.
    Rejected { status: u16 },
}

impl LoginOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            Self::Success {
                redirect: DASHBOARD_ROUTE.to_string(),
            }
        } else {
            Self::Rejected { status }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[async_trait]
pub trait LoginClient: Send + Sync {
    /// Sends one login request. No retry, no cancellation.
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<LoginOutcome, LoginError>;
}

/// Validates the form, then sends a single request through `client`.
///
/// Rejections and transport failures are logged here; callers only decide
/// what to show.
pub async fn submit_login<C>(
    client: &C,
    form: &LoginForm,
) -> Result<LoginOutcome, LoginError>
where
    C: LoginClient + ?Sized,
{
    let credentials = form.validate().map_err(LoginError::Validation)?;

    match client.login(&credentials).await {
        Ok(outcome @ LoginOutcome::Success { .. }) => {
            info!(email = %credentials.email, "login succeeded");
            Ok(outcome)
        }
        Ok(outcome @ LoginOutcome::Rejected { status }) => {
            error!(email = %credentials.email, status, "login failed");
            Ok(outcome)
        }
        Err(e) => {
            error!(error = %e, "login request failed");
            Err(e)
        }
    }
}
