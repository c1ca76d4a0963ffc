//! Google Translate TTS provider
//!
//! 语言代码必须正好 2 个 ASCII 字母，不做大小写转换

use async_trait::async_trait;
use std::sync::Arc;

use super::base::{ensure_max_chars, send_request};
use crate::application::error::SpeechError;
use crate::application::ports::{HttpTransport, SpeechProvider};
use crate::domain::speech::SynthesisOptions;

const ENDPOINT: &str = "http://translate.google.com/translate_tts";
const CLIENT: &str = "duncan3dc-speaker";
const MAX_TEXT_CHARS: usize = 100;

/// Google provider
#[derive(Clone)]
pub struct GoogleProvider {
    transport: Arc<dyn HttpTransport>,
    language: String,
}

impl GoogleProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            language: "en".to_string(),
        }
    }

    /// 返回使用指定语言的新实例
    pub fn with_language(&self, language: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            language: normalize_language(language)?,
            ..self.clone()
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

fn normalize_language(language: &str) -> Result<String, SpeechError> {
    let language = language.trim();
    if language.len() != 2 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SpeechError::validation(format!(
            "Unexpected language code ({}), codes should be 2 characters",
            language
        )));
    }
    Ok(language.to_string())
}

#[async_trait]
impl SpeechProvider for GoogleProvider {
    fn options(&self) -> SynthesisOptions {
        SynthesisOptions::new().with("language", self.language.as_str())
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        ensure_max_chars(text, MAX_TEXT_CHARS)?;

        let params = [
            ("q", text.to_string()),
            ("tl", self.language.clone()),
            ("client", CLIENT.to_string()),
        ];

        send_request(self.transport.as_ref(), ENDPOINT, &params).await
    }
}
