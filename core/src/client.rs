//! Session-holding client for the Veikkaus API.
//!
//! # Design
//! `VeikkausClient` owns the `reqwest` transport, the configuration, the
//! session cookie store and the session expiry. Requests are described with
//! [`HttpRequest`] by the request builder, sent by [`VeikkausClient::dispatch`]
//! and interpreted by the response module. The body is always read in full
//! before `dispatch` returns, so no connection outlives a call whatever its
//! outcome.
//!
//! One client models one login session. Interior state sits behind locks so
//! operation services can borrow the client immutably, but no lock is held
//! across a network call.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use reqwest::redirect::Policy;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::AuthService;
use crate::clock::{Clock, SystemClock};
use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::request::build_request;
use crate::response::{decode_error, decode_success, is_success};
use crate::session::SessionCookies;

/// Client for one Veikkaus API session.
#[derive(Debug)]
pub struct VeikkausClient {
    config: ClientConfig,
    http: Mutex<reqwest::Client>,
    cookies: Arc<SessionCookies>,
    session_expiry: Mutex<Option<DateTime<Utc>>>,
    clock: Arc<dyn Clock>,
}

impl VeikkausClient {
    /// Creates a client from `config`.
    ///
    /// `transport` may carry transport settings such as proxies or TLS roots.
    /// The client always installs its own cookie store, user agent, timeout
    /// and a no-redirect policy on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the transport
    /// cannot be built.
    pub fn new(
        config: ClientConfig,
        transport: Option<reqwest::ClientBuilder>,
    ) -> Result<Self, ApiError> {
        Self::with_clock(config, transport, Arc::new(SystemClock))
    }

    /// Like [`VeikkausClient::new`] with an explicit time source for session
    /// expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the transport
    /// cannot be built.
    pub fn with_clock(
        config: ClientConfig,
        transport: Option<reqwest::ClientBuilder>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ApiError> {
        config.validate()?;

        let cookies = Arc::new(SessionCookies::new());
        let http = transport
            .unwrap_or_default()
            .cookie_provider(Arc::clone(&cookies))
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            config,
            http: Mutex::new(http),
            cookies,
            session_expiry: Mutex::new(None),
            clock,
        })
    }

    /// Creates a client for the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built.
    pub fn with_defaults() -> Result<Self, ApiError> {
        Self::new(ClientConfig::default(), None)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A copy of the transport handle. Requests sent through it share this
    /// client's cookie store.
    pub fn http_client(&self) -> reqwest::Client {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn cookies(&self) -> &Arc<SessionCookies> {
        &self.cookies
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    /// Builds a request for `path` relative to the configured base URL.
    ///
    /// # Errors
    ///
    /// See [`build_request`].
    pub fn new_request(
        &self,
        path: &str,
        method: Method,
        payload: Option<Vec<u8>>,
    ) -> Result<HttpRequest, ApiError> {
        build_request(&self.config.base_url, path, method, payload)
    }

    /// When the current session expires, if a login has happened.
    pub fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        *self.session_expiry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True while the clock is before the recorded session expiry.
    pub fn auth_session_is_active(&self) -> bool {
        self.session_expires_at()
            .is_some_and(|expiry| self.clock.now() < expiry)
    }

    pub(crate) fn start_session(&self) -> DateTime<Utc> {
        let expiry = self.clock.now() + self.config.session_timeout;
        *self.session_expiry.lock().unwrap_or_else(PoisonError::into_inner) = Some(expiry);
        expiry
    }

    pub(crate) fn end_session(&self) {
        *self.session_expiry.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Sends `request` and returns the fully-read response.
    ///
    /// With `requires_auth` the call fails with [`ApiError::UserNotLoggedIn`]
    /// before touching the network unless a session is active. If `ctx` is
    /// done by the time the transport returns, its error wins over whatever
    /// the transport reported. Non-2xx responses are turned into errors by
    /// [`decode_error`].
    ///
    /// # Errors
    ///
    /// Returns the context, transport or API error that ended the call.
    pub async fn dispatch(
        &self,
        ctx: &Context,
        request: HttpRequest,
        requires_auth: bool,
    ) -> Result<HttpResponse, ApiError> {
        if requires_auth && !self.auth_session_is_active() {
            return Err(ApiError::UserNotLoggedIn);
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");

        let http = self.http_client();
        let mut builder = http.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let outcome = tokio::select! {
            biased;
            err = ctx.done() => return Err(err.into()),
            outcome = execute(builder) => outcome,
        };
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }

        let response = outcome?;
        if !is_success(response.status) {
            return Err(decode_error(response.status, &response.body));
        }
        Ok(response)
    }

    /// [`VeikkausClient::dispatch`] followed by decoding the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns any error from `dispatch`, or [`ApiError::BodyDecode`].
    pub async fn dispatch_json<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        request: HttpRequest,
        requires_auth: bool,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(ctx, request, requires_auth).await?;
        decode_success(&response.body)
    }
}

async fn execute(builder: reqwest::RequestBuilder) -> Result<HttpResponse, ApiError> {
    let response = builder.send().await?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::BodyRead(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers,
        body: body.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;
    use crate::clock::mock::ManualClock;

    fn client_with_clock(clock: Arc<ManualClock>) -> VeikkausClient {
        let config = ClientConfig::new("http://127.0.0.1:9/api/bff/v1/")
            .with_session_timeout(TimeDelta::seconds(1));
        VeikkausClient::with_clock(config, None, clock).unwrap()
    }

    #[test]
    fn new_client_has_no_session() {
        let client = VeikkausClient::with_defaults().unwrap();
        assert!(!client.auth_session_is_active());
        assert!(client.session_expires_at().is_none());
        assert!(client.cookies().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = VeikkausClient::new(ClientConfig::new(""), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn preconfigured_transport_is_accepted() {
        let transport = reqwest::Client::builder().pool_max_idle_per_host(1);
        let client = VeikkausClient::new(ClientConfig::default(), Some(transport));
        assert!(client.is_ok());
    }

    #[test]
    fn session_is_active_until_window_elapses() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let client = client_with_clock(Arc::clone(&clock));

        let expiry = client.start_session();
        assert_eq!(expiry, start + TimeDelta::seconds(1));
        assert!(client.auth_session_is_active());

        clock.advance(TimeDelta::milliseconds(999));
        assert!(client.auth_session_is_active());

        clock.advance(TimeDelta::milliseconds(1));
        assert!(!client.auth_session_is_active());
    }

    #[test]
    fn session_check_does_not_mutate_expiry() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let client = client_with_clock(Arc::clone(&clock));
        let expiry = client.start_session();
        clock.advance(TimeDelta::seconds(5));
        assert!(!client.auth_session_is_active());
        assert_eq!(client.session_expires_at(), Some(expiry));
    }

    #[test]
    fn end_session_clears_expiry() {
        let client = VeikkausClient::with_defaults().unwrap();
        client.start_session();
        client.end_session();
        assert!(!client.auth_session_is_active());
        assert!(client.session_expires_at().is_none());
    }

    #[test]
    fn new_request_uses_configured_base_url() {
        let client = VeikkausClient::new(
            ClientConfig::new("http://127.0.0.1:3000/api/bff/v1/"),
            None,
        )
        .unwrap();
        let req = client.new_request("sessions", Method::POST, Some(b"{}".to_vec())).unwrap();
        assert_eq!(req.url.as_str(), "http://127.0.0.1:3000/api/bff/v1/sessions");
    }

    #[tokio::test]
    async fn authorized_dispatch_without_session_fails_fast() {
        let client = VeikkausClient::with_defaults().unwrap();
        let req = client.new_request("players/self/account", Method::GET, None).unwrap();
        let err = client.dispatch(&Context::background(), req, true).await.unwrap_err();
        assert!(matches!(err, ApiError::UserNotLoggedIn));
    }

    #[tokio::test]
    async fn canceled_context_wins() {
        let client = VeikkausClient::with_defaults().unwrap();
        let req = client.new_request("sessions", Method::POST, Some(b"{}".to_vec())).unwrap();
        let ctx = Context::background();
        ctx.cancel();
        let err = client.dispatch(&ctx, req, false).await.unwrap_err();
        assert!(matches!(err, ApiError::Context(crate::ContextError::Canceled)));
    }
}
