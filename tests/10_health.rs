mod common;

use anyhow::Result;
use common::TestServer;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["name"], "musicbox-api");
    Ok(())
}
