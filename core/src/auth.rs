//! Login, logout and account operations.
//!
//! `AuthService` borrows the [`VeikkausClient`] it acts on; get one with
//! [`VeikkausClient::auth`] or [`AuthService::new`].

use reqwest::Method;
use tracing::debug;

use crate::client::VeikkausClient;
use crate::config::{ACCOUNT_BALANCE_ENDPOINT, LOGIN_ENDPOINT};
use crate::context::Context;
use crate::error::ApiError;
use crate::request::json_payload;
use crate::types::{AccountBalance, LoginPayload, LoginSuccessful};

/// Authentication and account endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    client: &'a VeikkausClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a VeikkausClient) -> Self {
        Self { client }
    }

    /// Logs in with a username and password.
    ///
    /// The session expiry is recorded only when the API accepts the login;
    /// the session cookie itself is stored by the transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for rejected credentials,
    /// [`ApiError::Validation`] for empty fields, and any transport or
    /// context error.
    pub async fn login(
        &self,
        ctx: &Context,
        username: &str,
        password: &str,
    ) -> Result<LoginSuccessful, ApiError> {
        let payload = json_payload(&LoginPayload::standard(username, password))?;
        let request = self
            .client
            .new_request(LOGIN_ENDPOINT, Method::POST, Some(payload))?;

        let body: LoginSuccessful = self.client.dispatch_json(ctx, request, false).await?;

        let expiry = self.client.start_session();
        debug!(%expiry, "login successful");
        Ok(body)
    }

    /// Drops the session cookies and ends the session.
    ///
    /// Logging out twice is an error: once the cookie store is empty there is
    /// no session left to end.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UserNotLoggedIn`] if there are no cookies.
    pub fn logout(&self) -> Result<(), ApiError> {
        if self.client.cookies().is_empty() {
            return Err(ApiError::UserNotLoggedIn);
        }
        let removed = self.client.cookies().clear();
        self.client.end_session();
        debug!(removed, "logged out");
        Ok(())
    }

    /// Fetches the player's cash balance. Requires an active session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UserNotLoggedIn`] without a network call when no
    /// session is active, otherwise any dispatch error.
    pub async fn account_balance(&self, ctx: &Context) -> Result<AccountBalance, ApiError> {
        let request = self
            .client
            .new_request(ACCOUNT_BALANCE_ENDPOINT, Method::GET, None)?;
        self.client.dispatch_json(ctx, request, true).await
    }

    pub fn session_is_active(&self) -> bool {
        self.client.auth_session_is_active()
    }
}
