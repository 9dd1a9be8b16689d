//! Request builder: turns a path, method and optional payload into an
//! [`HttpRequest`] carrying the headers the API requires.

use reqwest::{Method, Url};
use serde::Serialize;

use crate::config::{
    ACCEPT, CONTENT_TYPE, ROBOT_IDENTIFIER_HEADER_KEY, ROBOT_IDENTIFIER_HEADER_VALUE,
};
use crate::error::ApiError;
use crate::http::HttpRequest;

/// Serializes a request payload to JSON bytes.
///
/// # Errors
///
/// Returns [`ApiError::PayloadSerialization`] if `payload` cannot be
/// represented as JSON.
pub fn json_payload<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(payload).map_err(|e| ApiError::PayloadSerialization(e.to_string()))
}

/// Builds a request for `base_url` + `path`.
///
/// Only GET, POST and PUT are accepted. POST and PUT need `payload`; a
/// payload passed with GET is ignored.
///
/// # Errors
///
/// Returns [`ApiError::MethodNotSupported`], [`ApiError::PayloadRequired`]
/// or [`ApiError::MalformedUrl`].
pub fn build_request(
    base_url: &str,
    path: &str,
    method: Method,
    payload: Option<Vec<u8>>,
) -> Result<HttpRequest, ApiError> {
    let body = if method == Method::GET {
        None
    } else if method == Method::POST || method == Method::PUT {
        Some(payload.ok_or_else(|| ApiError::PayloadRequired {
            method: method.to_string(),
        })?)
    } else {
        return Err(ApiError::MethodNotSupported {
            method: method.to_string(),
        });
    };

    let url = request_url(base_url, path)?;

    Ok(HttpRequest {
        method,
        url,
        headers: default_headers(),
        body,
    })
}

fn request_url(base_url: &str, path: &str) -> Result<Url, ApiError> {
    let raw = format!("{base_url}{path}");
    let url = Url::parse(&raw).map_err(|e| ApiError::MalformedUrl(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::MalformedUrl(format!(
            "'{raw}' is not an absolute hierarchical URL"
        )));
    }
    Ok(url)
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
        ("Accept".to_string(), ACCEPT.to_string()),
        (
            ROBOT_IDENTIFIER_HEADER_KEY.to_string(),
            ROBOT_IDENTIFIER_HEADER_VALUE.to_string(),
        ),
    ]
}
