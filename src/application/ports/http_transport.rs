//! HTTP Transport Port - 出站端口
//!
//! 远程 provider 通过此接口发送 GET 请求，具体实现见 infrastructure/adapters/http

use async_trait::async_trait;
use thiserror::Error;

/// 传输层错误
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// HTTP 响应（状态码 + 原始 body）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }
}

/// HTTP Transport Port
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 对完整 URL（含 query string）发起 GET
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}
