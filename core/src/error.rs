//! Error types for the Veikkaus API client.
//!
//! # Design
//! Every failure the client can report gets its own variant so callers can
//! match on the kind instead of parsing messages. Errors the API reports
//! through its error envelope (`Unauthorized`, `Validation`,
//! `NotImplementedApiError`) carry the original human-readable text for
//! display. Transport and envelope-format failures are passed through
//! unwrapped so the underlying `reqwest` / `serde_json` error stays
//! inspectable.

use crate::context::ContextError;

/// Errors returned by the request builder, the response interpreter and the
/// client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was built with an HTTP method other than GET, POST or PUT.
    #[error("Expected to receive one of [|GET||POST||PUT|] request-type, received '{method}'")]
    MethodNotSupported { method: String },

    /// A POST or PUT request was built without payload bytes.
    #[error("payload bytes were expected for '{method}'-request, received none")]
    PayloadRequired { method: String },

    /// The request payload could not be serialized to JSON.
    #[error("could not serialize request payload to bytes: {0}")]
    PayloadSerialization(String),

    /// Base URL and path did not form a valid absolute URL.
    #[error("Request URL was malformatted. ERR: {0}")]
    MalformedUrl(String),

    /// The response status was neither 2xx nor a decodable API error.
    #[error("response status code was not in allowed range (200-299). Got {0}")]
    UnsupportedStatusCode(u16),

    /// The API rejected the credentials or the session has expired.
    #[error("{message}")]
    Unauthorized { message: String },

    /// The API rejected the input; one formatted entry per field error.
    #[error("{}", validation_message(.errors))]
    Validation { errors: Vec<String> },

    /// The API returned an error code this library does not model yet.
    #[error("API Returned error that has not been implemented in this library. Error code was '{code}'")]
    NotImplementedApiError {
        code: String,
        field_errors: Vec<String>,
    },

    /// An operation needing an authenticated session ran without one.
    #[error("No Authenticated session active, user not logged in")]
    UserNotLoggedIn,

    /// The response body could not be read from the transport.
    #[error("error reading the response body: {0}")]
    BodyRead(String),

    /// The success body was not valid JSON for the expected type.
    #[error("error unmarshaling response body: {0}")]
    BodyDecode(String),

    /// The error envelope was not valid JSON.
    #[error(transparent)]
    Envelope(#[from] serde_json::Error),

    /// The transport failed to deliver the request.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The caller's context was canceled or ran past its deadline.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn validation_message(errors: &[String]) -> String {
    if errors.is_empty() {
        "input validation error".to_string()
    } else {
        format!("input validation errors: [{}]", errors.join(" "))
    }
}
