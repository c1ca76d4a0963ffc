//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechProvider、HttpTransport、ProcessRunner、PollyClient）
//! - text_to_speech: 合成编排与文件缓存
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod text_to_speech;

pub use error::SpeechError;

pub use ports::{
    HttpResponse, HttpTransport, PollyClient, PollyError, PollyRequest, ProcessError,
    ProcessOutput, ProcessRunner, SpeechProvider, TransportError,
};

pub use text_to_speech::TextToSpeech;
