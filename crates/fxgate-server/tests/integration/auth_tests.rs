use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::TimeDelta;

use fxgate_core::TokenIssuer;

use crate::integration::common::{
    TEST_SECRET, authed_get, body_json, form_post, setup_test_app,
};

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app().await;

    let response = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app
        .send(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/v1/convert"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
}

#[tokio::test]
async fn create_account_returns_enabled_record() {
    let app = setup_test_app().await;

    let response = app.create_account("alice", "secret").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "alice");
    assert_eq!(json["disabled"], false);
    assert!(json.get("password_hash").is_none());

    let stored = app.store.get("alice").await.unwrap();
    assert_ne!(stored.password_hash, "secret");
}

#[tokio::test]
async fn gettoken_issues_bearer_token() {
    let app = setup_test_app().await;
    app.create_account("alice", "secret").await;

    let response = app.send(form_post("/gettoken", "alice", "secret")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["token_type"], "bearer");
    let token = json["access_token"].as_str().unwrap();
    let issuer = TokenIssuer::new(TEST_SECRET, "HS256").unwrap();
    assert_eq!(issuer.verify(token).unwrap(), "alice");
}

#[tokio::test]
async fn wrong_password_returns_401() {
    let app = setup_test_app().await;
    app.create_account("alice", "secret").await;

    let response = app.send(form_post("/gettoken", "alice", "wrong")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    let json = body_json(response).await;
    assert_eq!(json["message"], "Incorrect username or password");
}

#[tokio::test]
async fn unknown_user_returns_401() {
    let app = setup_test_app().await;

    let response = app.send(form_post("/gettoken", "nobody", "secret")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Incorrect username or password"
    );
}

#[tokio::test]
async fn duplicate_account_overwrites_password() {
    let app = setup_test_app().await;
    app.create_account("alice", "first").await;
    app.create_account("alice", "second").await;

    let old = app.send(form_post("/gettoken", "alice", "first")).await;
    let new = app.send(form_post("/gettoken", "alice", "second")).await;

    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(new.status(), StatusCode::OK);
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn missing_form_field_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .send(
            Request::post("/createaccount")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=alice"))
                .unwrap(),
        )
        .await;

    assert!(response.status().is_client_error());
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn missing_bearer_returns_401() {
    let app = setup_test_app().await;

    let response = app
        .send(Request::get("/v1/currency/all").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(
        body_json(response).await["message"],
        "Could not validate credentials"
    );
}

#[tokio::test]
async fn convert_without_bearer_returns_401() {
    let app = setup_test_app().await;

    let response = app
        .send(
            Request::get("/v1/convert?base_currency=USD&target_currency=EUR&amount=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(
        body_json(response).await["message"],
        "Could not validate credentials"
    );
}

#[tokio::test]
async fn basic_scheme_returns_401() {
    let app = setup_test_app().await;

    let response = app
        .send(
            Request::get("/v1/currency/all")
                .header(header::AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = setup_test_app().await;

    let response = app.send(authed_get("/v1/currency/all", "not-a-jwt")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_returns_401() {
    let app = setup_test_app().await;
    app.create_account("alice", "secret").await;
    let forged = TokenIssuer::new("some-other-secret", "HS256")
        .unwrap()
        .issue("alice", None)
        .unwrap();

    let response = app.send(authed_get("/v1/currency/all", &forged)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_returns_401() {
    let app = setup_test_app().await;
    app.create_account("alice", "secret").await;
    let expired = TokenIssuer::new(TEST_SECRET, "HS256")
        .unwrap()
        .issue("alice", Some(TimeDelta::minutes(-5)))
        .unwrap();

    let response = app.send(authed_get("/v1/currency/all", &expired)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_unknown_subject_returns_401() {
    let app = setup_test_app().await;
    let token = TokenIssuer::new(TEST_SECRET, "HS256")
        .unwrap()
        .issue("ghost", None)
        .unwrap();

    let response = app.send(authed_get("/v1/currency/all", &token)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn disabled_account_returns_400() {
    let app = setup_test_app().await;
    let token = app.login_as("bob", "secret").await;

    let mut record = app.store.get("bob").await.unwrap();
    record.disabled = true;
    app.store.put("bob", record).await;

    let response = app.send(authed_get("/v1/currency/all", &token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "inactive_user");
    assert_eq!(json["message"], "Inactive user");
}

#[tokio::test]
async fn lowercase_bearer_scheme_is_accepted() {
    let app = setup_test_app().await;
    let token = app.login_as("alice", "secret").await;

    let response = app
        .send(
            Request::get("/v1/convert?base_currency=USD&target_currency=EUR&amount=1&date=bad")
                .header(header::AUTHORIZATION, format!("bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    // Past the auth layer: the handler rejects the date.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "validation_error");
}
