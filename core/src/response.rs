//! Response interpreter: classifies a status code, decodes success bodies into
//! the caller's type and turns the API's error envelope into an [`ApiError`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Error codes the API reports in its envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    NotAuthenticated,
    InputValidationFailed,
    /// Any code this library does not model, kept verbatim.
    Other(String),
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "NOT_AUTHENTICATED" => Self::NotAuthenticated,
            "INPUT_VALIDATION_FAILED" => Self::InputValidationFailed,
            _ => Self::Other(code),
        }
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED".to_string(),
            ErrorCode::InputValidationFailed => "INPUT_VALIDATION_FAILED".to_string(),
            ErrorCode::Other(code) => code,
        }
    }
}

/// A missing or null code decodes as an empty unrecognised code.
impl Default for ErrorCode {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// Why a single input field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}' had issue: '{}'", self.field, self.message)
    }
}

/// The JSON body the API returns with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: ErrorCode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub field_errors: Vec<FieldError>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ErrorEnvelope {
    fn formatted_field_errors(&self) -> Vec<String> {
        self.field_errors.iter().map(ToString::to_string).collect()
    }

    /// Maps the envelope onto the matching error kind.
    pub fn into_error(self) -> ApiError {
        let field_errors = self.formatted_field_errors();
        match self.code {
            ErrorCode::NotAuthenticated => ApiError::Unauthorized {
                message: "User not authenticated or login failed".to_string(),
            },
            ErrorCode::InputValidationFailed => ApiError::Validation {
                errors: field_errors,
            },
            ErrorCode::Other(code) => ApiError::NotImplementedApiError { code, field_errors },
        }
    }
}

/// True iff `status` is in the 2xx range.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decodes a success body into `T`.
///
/// # Errors
///
/// Returns [`ApiError::BodyDecode`] if the body is not valid JSON for `T`.
pub fn decode_success<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BodyDecode(e.to_string()))
}

/// Turns a non-2xx status and its body into an error.
///
/// Statuses below 400 are not expected from the API and come back as
/// [`ApiError::UnsupportedStatusCode`]. A body that is not a JSON envelope
/// surfaces as [`ApiError::Envelope`] with the raw parse error.
pub fn decode_error(status: u16, body: &[u8]) -> ApiError {
    if status < 400 {
        warn!(status, "unsupported response status");
        return ApiError::UnsupportedStatusCode(status);
    }

    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            warn!(status, code = ?envelope.code, "API returned an error envelope");
            envelope.into_error()
        }
        Err(e) => ApiError::Envelope(e),
    }
}

/// Interprets a fully-read response as a `T` or an error.
///
/// # Errors
///
/// Returns the error produced by [`decode_error`] for non-2xx statuses and
/// [`ApiError::BodyDecode`] for undecodable success bodies.
pub fn interpret<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if !is_success(response.status) {
        return Err(decode_error(response.status, &response.body));
    }
    decode_success(&response.body)
}
