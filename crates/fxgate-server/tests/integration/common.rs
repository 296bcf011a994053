use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use chrono::TimeDelta;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;

use fxgate_client::FastForexClient;
use fxgate_core::{AuthService, ExchangeService, PasswordHasher, TokenIssuer};
use fxgate_server::incident::IncidentLog;
use fxgate_server::routes;
use fxgate_server::state::AppState;
use fxgate_store::MemoryCredentialStore;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_API_KEY: &str = "ff-test-key";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryCredentialStore,
    pub upstream: MockServer,
    pub log_path: PathBuf,
    _log_dir: TempDir,
}

/// Router backed by an in-memory store and a wiremock FastForex.
pub async fn setup_test_app() -> TestApp {
    let upstream = MockServer::start().await;
    let log_dir = tempfile::tempdir().unwrap();
    let log_path = log_dir.path().join("log.txt");
    let store = MemoryCredentialStore::new();

    let state = Arc::new(AppState {
        auth: AuthService::new(
            store.clone(),
            PasswordHasher::with_cost(4).unwrap(),
            TokenIssuer::new(TEST_SECRET, "HS256").unwrap(),
            TimeDelta::minutes(30),
        ),
        exchange: ExchangeService::new(
            FastForexClient::with_base_url(TEST_API_KEY, &upstream.uri()).unwrap(),
        ),
        incidents: IncidentLog::new(log_path.clone()),
    });

    TestApp {
        router: routes::router(state),
        store,
        upstream,
        log_path,
        _log_dir: log_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn create_account(&self, username: &str, password: &str) -> Response<Body> {
        self.send(form_post("/createaccount", username, password))
            .await
    }

    /// Create an account and return a fresh access token for it.
    pub async fn login_as(&self, username: &str, password: &str) -> String {
        let response = self.create_account(username, password).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = self
            .send(form_post("/gettoken", username, password))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    pub fn incident_log(&self) -> String {
        std::fs::read_to_string(&self.log_path).unwrap_or_default()
    }
}

pub fn form_post(uri: &str, username: &str, password: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap()
}

pub fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
