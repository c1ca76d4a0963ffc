//! Amazon Polly provider
//!
//! 通过宿主注入的 PollyClient 调用 SynthesizeSpeech

use async_trait::async_trait;
use std::sync::Arc;

use super::base::SERVICE_FAILURE;
use crate::application::error::SpeechError;
use crate::application::ports::{PollyClient, PollyRequest, SpeechProvider};
use crate::domain::speech::SynthesisOptions;

/// Amazon Polly provider
#[derive(Clone)]
pub struct AmazonPollyProvider {
    client: Arc<dyn PollyClient>,
    voice: String,
}

impl AmazonPollyProvider {
    pub fn new(client: Arc<dyn PollyClient>) -> Self {
        Self {
            client,
            voice: "Emma".to_string(),
        }
    }

    /// 返回使用指定 voice 的新实例
    pub fn with_voice(&self, voice: &str) -> Result<Self, SpeechError> {
        let voice = voice.trim();
        if voice.is_empty() {
            return Err(SpeechError::validation(format!(
                "Unexpected voice name ({}), names cannot be empty",
                voice
            )));
        }

        Ok(Self {
            voice: voice.to_string(),
            ..self.clone()
        })
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }
}

#[async_trait]
impl SpeechProvider for AmazonPollyProvider {
    fn options(&self) -> SynthesisOptions {
        SynthesisOptions::new().with("voice", self.voice.as_str())
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let request = PollyRequest {
            output_format: self.format().extension().to_string(),
            text: text.to_string(),
            voice_id: self.voice.clone(),
        };

        tracing::debug!(voice = %self.voice, text_len = text.len(), "Sending Polly request");

        self.client.synthesize_speech(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Polly request failed");
            SpeechError::provider(SERVICE_FAILURE)
        })
    }
}
