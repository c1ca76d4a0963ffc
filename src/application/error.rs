//! 应用层错误定义
//!
//! 所有 provider 与 TextToSpeech 统一返回 SpeechError

use std::path::PathBuf;
use thiserror::Error;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SpeechError {
    /// 参数不符合后端约束（在任何 I/O 之前抛出）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 外部服务或本地程序无法生成音频
    #[error("Provider error: {0}")]
    Provider(String),

    /// 缓存文件写入失败
    #[error("Unable to save the file ({})", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpeechError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 创建 provider 错误
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// 创建 IO 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// 错误消息（不含分类前缀）
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Provider(msg) => msg.clone(),
            Self::Io { .. } => self.to_string(),
        }
    }
}
