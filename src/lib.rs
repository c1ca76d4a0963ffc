//! Speaker - 文本转语音与音频文件缓存
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech Context: 音频格式、合成选项、缓存指纹
//!
//! 应用层 (application/):
//! - Ports: SpeechProvider, HttpTransport, ProcessRunner, PollyClient
//! - TextToSpeech: 懒加载合成 + 文件缓存
//!
//! 基础设施层 (infrastructure/):
//! - Providers: Acapela, Google, VoiceRSS, ResponsiveVoice, Pico TTS, Amazon Polly
//! - Adapters: reqwest 传输、tokio 进程执行、测试替身

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{SpeechError, SpeechProvider, TextToSpeech};
pub use config::{build_provider, load_config, AppConfig};
pub use domain::{AudioFormat, SynthesisOptions};
pub use infrastructure::Provider;
