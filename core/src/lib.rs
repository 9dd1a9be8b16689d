//! Async client for the Veikkaus betting API.
//!
//! # Overview
//! Logs a player in, reads the account balance and logs out, plus a static
//! glossary of the API's game types.
//!
//! # Design
//! - `request` builds plain-data `HttpRequest` values and `response`
//!   interprets plain-data `HttpResponse` values; neither does I/O.
//! - `VeikkausClient` owns the `reqwest` transport, the session cookie store
//!   and the session expiry, and is the only place requests are sent.
//! - `AuthService` borrows a client and implements login, logout and the
//!   account balance call on top of it.
//! - Every network call takes a [`Context`] for cancellation and deadlines.
//!
//! ```rust,no_run
//! use veikkaus_core::{ClientConfig, Context, VeikkausClient};
//!
//! # async fn run() -> Result<(), veikkaus_core::ApiError> {
//! let client = VeikkausClient::new(ClientConfig::default(), None)?;
//! let ctx = Context::background();
//! client.auth().login(&ctx, "johndoe", "verysecret").await?;
//! let balance = client.auth().account_balance(&ctx).await?;
//! println!("{} {}", balance.balances.cash.balance, balance.balances.cash.currency);
//! client.auth().logout()?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod glossary;
pub mod http;
pub mod request;
pub mod response;
pub mod session;
pub mod types;

pub use auth::AuthService;
pub use client::VeikkausClient;
pub use clock::{Clock, SystemClock};
pub use config::ClientConfig;
pub use context::{Context, ContextError};
pub use error::ApiError;
pub use glossary::{glossary, GameGlossary, GameInfo};
pub use http::{HttpRequest, HttpResponse};
pub use response::{ErrorCode, ErrorEnvelope, FieldError};
pub use session::{Cookie, SessionCookies};
pub use types::{AccountBalance, Balances, Cash, LoginPayload, LoginSuccessful};
