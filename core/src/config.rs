//! Client configuration and the API's fixed wire constants.

use std::time::Duration;

use chrono::TimeDelta;

use crate::error::ApiError;

/// Production base URL, including the API version. Ends with a slash so
/// endpoint paths can be appended directly.
pub const DEFAULT_BASE_URL: &str = "https://www.veikkaus.fi/api/bff/v1/";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Length of an authenticated session after a successful login.
pub const SESSION_TIMEOUT_SECS: i64 = 1800;

pub const LOGIN_ENDPOINT: &str = "sessions";
pub const ACCOUNT_BALANCE_ENDPOINT: &str = "players/self/account";

pub const CONTENT_TYPE: &str = "application/json";
pub const ACCEPT: &str = "application/json";
pub const ROBOT_IDENTIFIER_HEADER_KEY: &str = "X-ESA-API-KEY";
pub const ROBOT_IDENTIFIER_HEADER_VALUE: &str = "ROBOT";

/// Cookie whose presence marks an authenticated session.
pub const AUTH_SESSION_COOKIE: &str = "JSESSIONID";

/// Configuration for [`crate::VeikkausClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Transport timeout for a single request.
    pub timeout: Duration,

    /// How long a session stays active after login.
    pub session_timeout: TimeDelta,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("veikkaus-core/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_timeout: TimeDelta::seconds(SESSION_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_session_timeout(mut self, session_timeout: TimeDelta) -> Self {
        self.session_timeout = session_timeout;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] if the base URL is empty or not
    /// http(s), or if the session window is not positive.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.base_url.is_empty() {
            return Err(ApiError::InvalidConfig(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::InvalidConfig(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.session_timeout <= TimeDelta::zero() {
            return Err(ApiError::InvalidConfig(
                "session_timeout must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
