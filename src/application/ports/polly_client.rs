//! Polly Client Port - Amazon Polly 调用抽象
//!
//! AWS SDK 由宿主应用注入

use async_trait::async_trait;
use thiserror::Error;

/// Polly 调用错误
#[derive(Debug, Error)]
#[error("Polly request failed: {0}")]
pub struct PollyError(pub String);

/// SynthesizeSpeech 请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollyRequest {
    pub output_format: String,
    pub text: String,
    pub voice_id: String,
}

/// Polly Client Port
#[async_trait]
pub trait PollyClient: Send + Sync {
    /// 返回 AudioStream 内容
    async fn synthesize_speech(&self, request: PollyRequest) -> Result<Vec<u8>, PollyError>;
}
