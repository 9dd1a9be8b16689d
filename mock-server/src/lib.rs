//! In-process stand-in for the Veikkaus API.
//!
//! Serves the session and account endpoints under [`API_PREFIX`] with the
//! real API's JSON shapes, error envelopes and `JSESSIONID` cookie.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

pub const API_PREFIX: &str = "/api/bff/v1";
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// The single account the mock server knows about.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub username: String,
    pub password: String,
    pub currency: String,
    pub balance: i64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            username: "johndoe".to_string(),
            password: "verysecret".to_string(),
            currency: "EUR".to_string(),
            balance: 1577,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "type", default)]
    pub login_type: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub code: String,
    pub field_errors: Vec<FieldError>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cash {
    pub currency: String,
    #[serde(rename = "type")]
    pub balance_type: String,
    pub balance: i64,
    pub usable_balance: i64,
    pub frozen_balance: i64,
    pub hold_balance: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Balances {
    #[serde(rename = "CASH")]
    pub cash: Cash,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub status: String,
    pub timer_interval: i64,
    pub balances: Balances,
}

pub type Sessions = Arc<RwLock<HashSet<String>>>;

#[derive(Clone)]
struct AppState {
    config: Arc<MockConfig>,
    sessions: Sessions,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        sessions: Arc::new(RwLock::new(HashSet::new())),
    };
    let api = Router::new()
        .route("/sessions", post(login))
        .route("/players/self/account", get(account_balance));
    Router::new().nest(API_PREFIX, api).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn error_response(status: StatusCode, code: &str, field_errors: Vec<FieldError>) -> Response {
    let envelope = ErrorEnvelope {
        code: code.to_string(),
        field_errors,
    };
    (status, Json(envelope)).into_response()
}

fn empty_field(field: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        code: "EMPTY".to_string(),
        message: "may not be empty".to_string(),
    }
}

async fn login(State(state): State<AppState>, Json(input): Json<LoginRequest>) -> Response {
    let mut field_errors = Vec::new();
    if input.login_type != "STANDARD_LOGIN" {
        field_errors.push(FieldError {
            field: "type".to_string(),
            code: "INVALID".to_string(),
            message: "unsupported login type".to_string(),
        });
    }
    if input.login.is_empty() {
        field_errors.push(empty_field("login"));
    }
    if input.password.is_empty() {
        field_errors.push(empty_field("password"));
    }
    if !field_errors.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "INPUT_VALIDATION_FAILED", field_errors);
    }

    if input.login != state.config.username || input.password != state.config.password {
        warn!("rejected login");
        return error_response(StatusCode::UNAUTHORIZED, "NOT_AUTHENTICATED", Vec::new());
    }

    let session = Uuid::new_v4().to_string();
    state.sessions.write().await.insert(session.clone());
    info!("session opened");

    (
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}={session}; Path=/; HttpOnly"),
        )],
        Json(serde_json::json!({})),
    )
        .into_response()
}

/// Value of the session cookie in the request's `Cookie` headers.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

async fn account_balance(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let authenticated = match session_cookie(&headers) {
        Some(session) => state.sessions.read().await.contains(&session),
        None => false,
    };
    if !authenticated {
        return error_response(StatusCode::UNAUTHORIZED, "NOT_AUTHENTICATED", Vec::new());
    }

    let config = &state.config;
    Json(AccountBalance {
        status: "ACTIVE".to_string(),
        timer_interval: 60,
        balances: Balances {
            cash: Cash {
                currency: config.currency.clone(),
                balance_type: "CASH".to_string(),
                balance: config.balance,
                usable_balance: config.balance,
                frozen_balance: 0,
                hold_balance: 0,
            },
        },
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn login_request_fields_default_to_empty() {
        let input: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(input.login_type.is_empty());
        assert!(input.login.is_empty());
        assert!(input.password.is_empty());
    }

    #[test]
    fn error_envelope_uses_wire_names() {
        let envelope = ErrorEnvelope {
            code: "INPUT_VALIDATION_FAILED".to_string(),
            field_errors: vec![empty_field("login")],
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["code"], "INPUT_VALIDATION_FAILED");
        assert_eq!(json["fieldErrors"][0]["field"], "login");
        assert_eq!(json["fieldErrors"][0]["message"], "may not be empty");
    }

    #[test]
    fn session_cookie_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("lang=fi; JSESSIONID=abc; theme=dark"),
        );
        assert_eq!(session_cookie(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn session_cookie_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("lang=fi"));
        assert_eq!(session_cookie(&headers), None);
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }
}
