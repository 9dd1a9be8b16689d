//! HTTP request and response types described as plain data.
//!
//! # Design
//! The request builder produces an `HttpRequest` value and the response
//! interpreter consumes an `HttpResponse` value, neither of them touching the
//! network. `VeikkausClient` is the only place that converts between these
//! and the `reqwest` transport, which keeps the builder and interpreter
//! deterministic and easy to test.
//!
//! The client reads the whole body into `HttpResponse` before returning, so
//! the transport connection is released on every exit path.

use reqwest::{Method, Url};

/// An HTTP request described as plain data.
///
/// Built by [`crate::request::build_request`] and executed by
/// [`crate::VeikkausClient::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// A fully-read HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
