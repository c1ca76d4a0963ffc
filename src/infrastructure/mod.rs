//! 基础设施层
//!
//! - providers: 各语音合成后端（Acapela、Google、VoiceRSS、ResponsiveVoice、Pico TTS、Amazon Polly）
//! - adapters: 端口的具体实现（reqwest、tokio::process）与测试替身

pub mod adapters;
pub mod providers;

pub use providers::{
    AcapelaProvider, AmazonPollyProvider, GoogleProvider, PicottsProvider, Provider,
    ResponsiveVoiceProvider, VoiceRssProvider,
};
