//! Request payloads and response bodies for the Veikkaus API.
//!
//! Amounts are integers in minor currency units (cents).

use serde::{Deserialize, Serialize};

/// Login `type` used for username/password logins.
pub const LOGIN_TYPE: &str = "STANDARD_LOGIN";

/// Payload for `POST sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    #[serde(rename = "type")]
    pub login_type: String,
    #[serde(rename = "login")]
    pub user: String,
    pub password: String,
}

impl LoginPayload {
    pub fn standard(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login_type: LOGIN_TYPE.to_string(),
            user: user.into(),
            password: password.into(),
        }
    }
}

/// Body of a successful login. The API normally sends `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSuccessful {
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Body of `GET players/self/account`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub status: String,
    pub timer_interval: i64,
    pub balances: Balances,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    #[serde(rename = "CASH")]
    pub cash: Cash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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
