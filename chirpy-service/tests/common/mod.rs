use std::sync::Arc;

use auth::AuthGateway;
use auth::LifetimePolicy;
use auth::TokenValidator;
use chirpy_service::chirp::service::ChirpService;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chirpy_service::repositories::InMemoryStore;
use chirpy_service::user::service::UserService;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub validator: TokenValidator,
}

impl TestApp {
    /// Spawn the application with reset enabled, as on the dev platform
    pub async fn spawn() -> Self {
        Self::spawn_with_reset(true).await
    }

    /// Spawn the application with reset enabled or disabled
    pub async fn spawn_with_reset(allow_reset: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = InMemoryStore::new();
        let gateway = Arc::new(AuthGateway::new(TEST_SECRET));

        let user_service = Arc::new(UserService::new(
            Arc::new(store.user_repository()),
            Arc::clone(&gateway),
        ));
        let chirp_service = Arc::new(ChirpService::new(Arc::new(store.chirp_repository())));

        let router = create_router(AppState {
            user_service,
            chirp_service,
            gateway,
            lifetime_policy: LifetimePolicy::default(),
            allow_reset,
        });

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            validator: TokenValidator::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn create_user(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the response body
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        response.json().await.expect("Failed to parse response")
    }

    /// Register, log in, and return the bearer token
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        self.create_user(email, password).await;
        let body = self.login(email, password).await;

        body["token"]
            .as_str()
            .expect("token should be a string")
            .to_string()
    }
}
