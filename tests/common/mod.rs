#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use drink_menu_api::auth::{issue_token, Claims, TokenVerifier};
use drink_menu_api::config::{AppConfig, AuthConfig};
use drink_menu_api::database::{Drink, DrinkStore, MemoryDrinkStore, NewDrink};
use drink_menu_api::state::AppState;

pub const AUDIENCE: &str = "drinks";
pub const SECRET: &str = "integration-test-secret";

/// A router bound to a free local port, backed by an in-memory store.
/// Each test gets its own server so the menu starts empty.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryDrinkStore>,
    pub auth: AuthConfig,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let auth = AuthConfig::with_secret(AUDIENCE, SECRET);
        let store = Arc::new(MemoryDrinkStore::new());
        let verifier = TokenVerifier::from_config(&auth)?;
        let state = AppState::new(store.clone(), verifier);

        let app = drink_menu_api::app(state, &AppConfig::development().security);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            auth,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token carrying exactly `permissions`.
    pub fn token(&self, permissions: &[&str]) -> String {
        issue_token(
            &self.auth,
            "test-barista",
            permissions.iter().map(|p| p.to_string()).collect(),
        )
        .expect("test secret is configured")
    }

    /// Token with the right permissions that expired an hour ago.
    pub fn expired_token(&self, permissions: &[&str]) -> String {
        let mut claims = Claims::new(
            &self.auth,
            "test-barista",
            permissions.iter().map(|p| p.to_string()).collect(),
        );
        claims.exp = chrono::Utc::now().timestamp() - 3600;
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encode expired token")
    }

    pub async fn seed(&self, title: &str, recipe: &str) -> Drink {
        self.store
            .insert(NewDrink {
                title: title.to_string(),
                recipe: recipe.to_string(),
            })
            .await
            .expect("seed drink")
    }

    pub async fn store_drink(&self, id: i32) -> Drink {
        self.store
            .find(id)
            .await
            .expect("find drink")
            .expect("drink exists")
    }

    pub async fn drink_count(&self) -> usize {
        self.store.list().await.expect("list drinks").len()
    }
}

pub const LATTE_RECIPE: &str =
    r#"[{"name":"espresso","color":"brown","parts":1},{"name":"milk","color":"white","parts":3}]"#;
