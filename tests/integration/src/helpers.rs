//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting bearer tokens and
//! making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use padel_api::{create_app, create_app_state};
use padel_common::{AppConfig, JwtService};
use padel_core::entities::Principal;
use padel_core::value_objects::UserId;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret shared by the test server and the token minter
pub const TEST_SECRET: &str = "integration-secret";

/// Base URL used when rendering share links
pub const TEST_BASE_URL: &str = "https://padel.test";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on the in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.leeway_seconds);
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Bearer token for a principal named after `id`
    pub fn token_for(&self, id: &str) -> Result<String> {
        Ok(self.jwt.issue_token(&principal(id), 3600)?)
    }

    /// Mint a token and sync the principal through the session endpoint
    pub async fn sign_in(&self, id: &str) -> Result<String> {
        let token = self.token_for(id)?;
        let response = self.post_auth("/api/v1/session", &token, &serde_json::json!({})).await?;
        assert_status(response, StatusCode::OK).await?;
        Ok(token)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).json(body).send().await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).send().await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.patch(&url).bearer_auth(token).json(body).send().await?)
    }
}

/// Principal whose id is `id`, named after it and with a club email
pub fn principal(id: &str) -> Principal {
    let mut name = id.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Principal {
        user_id: UserId::new(id),
        display_name: Some(name),
        email: Some(format!("{id}@club.es")),
        image: None,
    }
}

/// Configuration for the in-memory backend on an unused port
pub fn test_config() -> Result<AppConfig> {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP_ENV", "development"),
        ("API_PORT", "0"),
        ("STORAGE_BACKEND", "memory"),
        ("JWT_SECRET", TEST_SECRET),
        ("APP_BASE_URL", TEST_BASE_URL),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1"),
        ("RATE_LIMIT_BURST", "1000"),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).map(ToString::to_string))
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
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

/// Assert an error status and return the `error.code` of the body
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| anyhow::anyhow!("Error body without code: {body}"))
}
