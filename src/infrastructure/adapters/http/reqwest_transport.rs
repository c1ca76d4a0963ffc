//! Reqwest Transport - HttpTransport 的 reqwest 实现

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{HttpResponse, HttpTransport, TransportError};

/// Reqwest Transport 配置
#[derive(Debug, Clone)]
pub struct ReqwestTransportConfig {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// User-Agent
    pub user_agent: String,
}

impl Default for ReqwestTransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("speaker/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ReqwestTransportConfig {
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 基于 reqwest 的 HTTP 传输
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: ReqwestTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else if e.is_connect() {
                TransportError::NetworkError(format!("Cannot connect to TTS service: {}", e))
            } else {
                TransportError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidResponse(format!("Failed to read body: {}", e)))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
