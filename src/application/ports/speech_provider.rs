//! Speech Provider Port - 语音合成后端抽象
//!
//! 每个后端（远程 HTTP 服务或本地程序）实现此 trait

use async_trait::async_trait;

use crate::application::error::SpeechError;
use crate::domain::speech::{AudioFormat, SynthesisOptions};

/// Speech Provider Port
///
/// 不变量:
/// - `options()` 只返回已校验的值，且无副作用
/// - 修改配置总是返回新实例，原实例不变
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// 当前选项（仅用于缓存指纹）
    fn options(&self) -> SynthesisOptions {
        SynthesisOptions::new()
    }

    /// 输出音频格式
    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    /// 将文本合成为音频
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}

#[async_trait]
impl<P: SpeechProvider + ?Sized> SpeechProvider for std::sync::Arc<P> {
    fn options(&self) -> SynthesisOptions {
        (**self).options()
    }

    fn format(&self) -> AudioFormat {
        (**self).format()
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        (**self).synthesize(text).await
    }
}
