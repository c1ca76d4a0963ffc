//! Acapela VaaS provider
//!
//! GET http://vaas.acapela-group.com/Services/FileMaker.mp3
//! 凭证原样透传；voice 至少 3 个字符（小写存储），speed 在 60..=360 之间

use async_trait::async_trait;
use std::sync::Arc;

use super::base::{ensure_max_chars, send_request};
use crate::application::error::SpeechError;
use crate::application::ports::{HttpTransport, SpeechProvider};
use crate::domain::speech::SynthesisOptions;

const ENDPOINT: &str = "http://vaas.acapela-group.com/Services/FileMaker.mp3";
const MAX_TEXT_CHARS: usize = 300;

/// Acapela provider
#[derive(Clone)]
pub struct AcapelaProvider {
    transport: Arc<dyn HttpTransport>,
    login: String,
    application: String,
    password: String,
    voice: String,
    speed: i64,
}

impl AcapelaProvider {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        login: impl Into<String>,
        application: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            login: login.into(),
            application: application.into(),
            password: password.into(),
            voice: "rod".to_string(),
            speed: 180,
        }
    }

    /// 返回使用指定 voice 的新实例
    pub fn with_voice(&self, voice: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            voice: normalize_voice(voice)?,
            ..self.clone()
        })
    }

    /// 返回使用指定语速的新实例
    pub fn with_speed(&self, speed: i64) -> Result<Self, SpeechError> {
        Ok(Self {
            speed: validate_speed(speed)?,
            ..self.clone()
        })
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn speed(&self) -> i64 {
        self.speed
    }
}

fn normalize_voice(voice: &str) -> Result<String, SpeechError> {
    let voice = voice.trim();
    if voice.chars().count() < 3 {
        return Err(SpeechError::validation(format!(
            "Unexpected voice name ({}), names should be at least 3 characters long",
            voice
        )));
    }
    Ok(voice.to_lowercase())
}

fn validate_speed(speed: i64) -> Result<i64, SpeechError> {
    if !(60..=360).contains(&speed) {
        return Err(SpeechError::validation(format!(
            "Invalid speed ({}), must be a number between 60 and 360",
            speed
        )));
    }
    Ok(speed)
}

#[async_trait]
impl SpeechProvider for AcapelaProvider {
    fn options(&self) -> SynthesisOptions {
        SynthesisOptions::new()
            .with("voice", self.voice.as_str())
            .with("speed", self.speed)
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        ensure_max_chars(text, MAX_TEXT_CHARS)?;

        let params = [
            ("prot_vers", "2".to_string()),
            ("cl_login", self.login.clone()),
            ("cl_app", self.application.clone()),
            ("cl_pwd", self.password.clone()),
            ("req_voice", format!("{}22k", self.voice)),
            ("req_spd", self.speed.to_string()),
            ("req_text", text.to_string()),
        ];

        send_request(self.transport.as_ref(), ENDPOINT, &params).await
    }
}
