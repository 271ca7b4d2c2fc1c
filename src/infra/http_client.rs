use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::common::error::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// reqwest-backed [`HttpClientPort`]. Holds one connection pool for the life
/// of the process; clone it instead of building a new one per request.
#[derive(Clone, Debug)]
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        // Non-success bodies are never inspected, so don't pull them over the wire.
        if !resp.status().is_success() {
            debug!(url, status, "skipping body of non-success response");
            return Ok(HttpGetResult { status, bytes: Vec::new(), content_type });
        }

        let bytes = resp.bytes().await?.to_vec();
        debug!(url, status, bytes = bytes.len(), "received response");
        Ok(HttpGetResult { status, bytes, content_type })
    }
}
