use axum::http::{self, header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with, AccountBalance, ErrorEnvelope, MockConfig};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn login_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/api/bff/v1/sessions")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn account_request(cookie: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().uri("/api/bff/v1/players/self/account");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(String::new()).unwrap()
}

/// Logs in against `app` and returns the `name=value` part of the session
/// cookie.
async fn login_cookie(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(login_request(
            r#"{"type":"STANDARD_LOGIN","login":"johndoe","password":"verysecret"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    set_cookie.split(';').next().unwrap().to_string()
}

// --- login ---

#[tokio::test]
async fn login_sets_session_cookie() {
    let resp = app()
        .oneshot(login_request(
            r#"{"type":"STANDARD_LOGIN","login":"johndoe","password":"verysecret"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("JSESSIONID="));
    assert_eq!(&body_bytes(resp).await[..], b"{}");
}

#[tokio::test]
async fn login_wrong_password_returns_not_authenticated() {
    let resp = app()
        .oneshot(login_request(
            r#"{"type":"STANDARD_LOGIN","login":"johndoe","password":"wrong"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let envelope: ErrorEnvelope = body_json(resp).await;
    assert_eq!(envelope.code, "NOT_AUTHENTICATED");
    assert!(envelope.field_errors.is_empty());
}

#[tokio::test]
async fn login_empty_fields_return_validation_errors() {
    let resp = app()
        .oneshot(login_request(r#"{"type":"STANDARD_LOGIN","login":"","password":""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let envelope: ErrorEnvelope = body_json(resp).await;
    assert_eq!(envelope.code, "INPUT_VALIDATION_FAILED");
    let fields: Vec<_> = envelope.field_errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["login", "password"]);
    assert!(envelope.field_errors.iter().all(|e| e.code == "EMPTY"));
}

#[tokio::test]
async fn login_unknown_type_is_rejected() {
    let resp = app()
        .oneshot(login_request(
            r#"{"type":"BANK_LOGIN","login":"johndoe","password":"verysecret"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let envelope: ErrorEnvelope = body_json(resp).await;
    assert_eq!(envelope.field_errors[0].field, "type");
}

#[tokio::test]
async fn login_honours_configured_account() {
    let config = MockConfig {
        username: "jane".to_string(),
        password: "hunter2".to_string(),
        ..MockConfig::default()
    };
    let resp = app_with(config)
        .oneshot(login_request(
            r#"{"type":"STANDARD_LOGIN","login":"jane","password":"hunter2"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- account ---

#[tokio::test]
async fn account_without_cookie_returns_not_authenticated() {
    let resp = app().oneshot(account_request(None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let envelope: ErrorEnvelope = body_json(resp).await;
    assert_eq!(envelope.code, "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn account_with_unknown_session_returns_not_authenticated() {
    let resp = app()
        .oneshot(account_request(Some("JSESSIONID=forged")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn account_after_login_returns_balance() {
    let config = MockConfig {
        balance: 4200,
        ..MockConfig::default()
    };
    let app = app_with(config);
    let cookie = login_cookie(&app).await;

    let resp = app
        .oneshot(account_request(Some(&format!("lang=fi; {cookie}"))))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let balance: AccountBalance = body_json(resp).await;
    assert_eq!(balance.status, "ACTIVE");
    assert_eq!(balance.balances.cash.balance, 4200);
    assert_eq!(balance.balances.cash.currency, "EUR");
}

// --- routing ---

#[tokio::test]
async fn unprefixed_path_is_not_found() {
    let resp = app()
        .oneshot(Request::builder().uri("/sessions").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_with_get_is_method_not_allowed() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/bff/v1/sessions")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
