#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// A server process on its own port with in-memory storage, killed on drop
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let server = Self::spawn()?;
        server.wait_ready(Duration::from_secs(15)).await?;
        Ok(server)
    }

    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_musicbox-api"))
            .arg("serve")
            .env("APP_ENV", "development")
            .env("SERVER_HOST", "127.0.0.1")
            .env("MUSICBOX_API_PORT", port.to_string())
            .env("STORAGE_BACKEND", "memory")
            .env("SECURITY_JWT_SECRET", "integration-test-secret")
            .env("API_ENABLE_REQUEST_LOGGING", "false")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sign up a fresh user with the given role and return its token
    pub async fn signup(&self, client: &reqwest::Client, role: &str) -> Result<String> {
        let email = format!("{}-{}@musicbox.test", role.to_lowercase(), unique_suffix());
        let res = client
            .post(self.url("/user/signup"))
            .json(&json!({
                "name": "Integration",
                "email": email,
                "nickname": "it",
                "password": "pw123",
                "role": role
            }))
            .send()
            .await?;
        anyhow::ensure!(
            res.status() == StatusCode::CREATED,
            "signup failed: {}",
            res.status()
        );

        let body = res.json::<Value>().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("signup response has no token")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn unique_suffix() -> u128 {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    nanos + COUNTER.fetch_add(1, Ordering::Relaxed) as u128
}
