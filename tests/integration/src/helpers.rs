//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting access tokens and
//! making HTTP requests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use academy_api::{create_app, AppState};
use academy_common::{
    AppConfig, AppSettings, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtService,
    PaymentConfig, RateLimitConfig, ServerConfig,
};
use academy_core::{EntityId, UserRole};
use academy_service::{PaymentGateway, ServiceContext};
use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret shared between the test server and the tokens it accepts
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: AppState,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server on a fresh in-memory store with payments disabled
    pub async fn start() -> Result<Self> {
        Self::start_with_context(test_context()).await
    }

    /// Start a server whose checkout goes through `gateway`
    pub async fn start_with_payments(gateway: Arc<dyn PaymentGateway>) -> Result<Self> {
        Self::start_with_context(test_context().with_payments(gateway, "inr")).await
    }

    /// Start a test server around a prepared service context
    pub async fn start_with_context(context: ServiceContext) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let state = AppState::new(context, test_config());
        let app = create_app(state.clone());

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            state,
            jwt: JwtService::new(TEST_JWT_SECRET),
            _handle: handle,
        })
    }

    /// Get base URL of the API
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    /// Mint an access token the way the identity provider would
    pub fn token_for(&self, user_id: EntityId, email: Option<&str>) -> String {
        self.jwt
            .issue(user_id, email.map(str::to_string), 3600)
            .expect("token encoding")
    }

    /// Sign a new user in and sync their profile; returns (id, token)
    pub async fn sign_in(&self, role: UserRole) -> Result<(EntityId, String)> {
        let user_id = EntityId::generate();
        let email = format!("{user_id}@example.com");
        let token = self.token_for(user_id, Some(&email));

        let response = self
            .put_auth("/auth/user", &token, &serde_json::json!({ "firstName": "Test" }))
            .await?;
        assert_status(response, StatusCode::OK).await?;

        if role != UserRole::Learner {
            self.state
                .service_context()
                .user_repo()
                .update_role(user_id, role)
                .await?;
        }
        Ok((user_id, token))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::bearer(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.post(self.url(path)), token).send().await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::bearer(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::bearer(self.client.put(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token and no body
    pub async fn put_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.put(self.url(path)), token).send().await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.delete(self.url(path)), token).send().await?)
    }
}

/// Service context on a fresh in-memory store
pub fn test_context() -> ServiceContext {
    ServiceContext::in_memory(Arc::new(JwtService::new(TEST_JWT_SECRET)))
}

/// Configuration for a test server; only the auth secret matters in-process
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "academy-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            run_migrations: false,
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        payments: PaymentConfig::default(),
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Missing error code in {body}"))
}
