//! Fake Speech Provider - 用于测试的 provider
//!
//! 始终返回固定的音频数据，并记录每次合成请求

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::error::SpeechError;
use crate::application::ports::SpeechProvider;
use crate::domain::speech::{AudioFormat, SynthesisOptions};

/// Fake Speech Provider
pub struct FakeSpeechProvider {
    audio_data: Vec<u8>,
    options: SynthesisOptions,
    format: AudioFormat,
    /// 前 N 次调用返回错误
    failures: Mutex<usize>,
    calls: Mutex<Vec<String>>,
}

impl FakeSpeechProvider {
    pub fn new(audio_data: Vec<u8>) -> Self {
        Self {
            audio_data,
            options: SynthesisOptions::new(),
            format: AudioFormat::Mp3,
            failures: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    pub fn failing_times(self, times: usize) -> Self {
        *lock(&self.failures) = times;
        self
    }

    /// 已收到的合成文本
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SpeechProvider for FakeSpeechProvider {
    fn options(&self) -> SynthesisOptions {
        self.options.clone()
    }

    fn format(&self) -> AudioFormat {
        self.format
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        lock(&self.calls).push(text.to_string());

        let mut failures = lock(&self.failures);
        if *failures > 0 {
            *failures -= 1;
            return Err(SpeechError::provider(
                "Failed to call the external text-to-speech service",
            ));
        }

        tracing::debug!(text_len = text.len(), "FakeSpeechProvider: returning fixed audio");
        Ok(self.audio_data.clone())
    }
}
