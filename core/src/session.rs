//! Session cookie store.
//!
//! # Design
//! The client only ever talks to one host, so cookies are kept in a single
//! flat list in arrival order instead of being keyed by domain and path. The
//! store is installed as the `reqwest` cookie provider: every `Set-Cookie`
//! the server sends is appended, and the whole list goes back out with each
//! request.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::header::HeaderValue;
use reqwest::Url;
use tracing::debug;

use crate::config::AUTH_SESSION_COOKIE;

/// A cookie name and value. Attributes such as `Path` or `Expires` are not
/// tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parses the `name=value` pair at the start of a `Set-Cookie` header.
    pub fn parse(set_cookie: &str) -> Option<Self> {
        let pair = set_cookie.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, value.trim().trim_matches('"')))
    }
}

/// Ordered list of every cookie the server has set during the client's
/// lifetime.
///
/// Cookies are only ever appended, so a second login without a logout in
/// between sends both the old and the new `JSESSIONID`. Call
/// [`crate::AuthService::logout`] before logging in again.
#[derive(Debug, Default)]
pub struct SessionCookies {
    cookies: RwLock<Vec<Cookie>>,
}

impl SessionCookies {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Cookie>> {
        self.cookies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Cookie>> {
        self.cookies.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_cookie(&self, _url: &Url, cookie: Cookie) {
        self.write().push(cookie);
    }

    pub fn set_cookies(&self, _url: &Url, cookies: impl IntoIterator<Item = Cookie>) {
        self.write().extend(cookies);
    }

    /// Every stored cookie, in the order they were set. The URL is not used
    /// for filtering.
    pub fn cookies(&self, _url: &Url) -> Vec<Cookie> {
        self.read().clone()
    }

    /// True iff a session cookie has been set.
    pub fn is_authenticated(&self, url: &Url) -> bool {
        self.cookies(url)
            .iter()
            .any(|cookie| cookie.name == AUTH_SESSION_COOKIE)
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Removes every cookie and returns how many there were.
    pub fn clear(&self) -> usize {
        let mut cookies = self.write();
        let removed = cookies.len();
        cookies.clear();
        removed
    }
}

impl reqwest::cookie::CookieStore for SessionCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let parsed: Vec<Cookie> = cookie_headers
            .filter_map(|header| header.to_str().ok())
            .filter_map(Cookie::parse)
            .collect();
        if parsed.is_empty() {
            return;
        }
        debug!(count = parsed.len(), host = ?url.host_str(), "storing cookies");
        SessionCookies::set_cookies(self, url, parsed);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        let header = SessionCookies::cookies(self, url)
            .iter()
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ");
        if header.is_empty() {
            return None;
        }
        HeaderValue::from_str(&header).ok()
    }
}
