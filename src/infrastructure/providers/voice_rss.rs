//! VoiceRSS provider
//!
//! 语言代码统一小写: `en` -> `en-en`，`EN-GB` -> `en-gb`
//! 服务在 HTTP 200 时也可能返回 `ERROR: ...` 文本

use async_trait::async_trait;
use std::sync::Arc;

use super::base::send_request;
use crate::application::error::SpeechError;
use crate::application::ports::{HttpTransport, SpeechProvider};
use crate::domain::speech::SynthesisOptions;

const ENDPOINT: &str = "https://api.voicerss.org/";
const ERROR_PREFIX: &[u8] = b"ERROR:";

/// VoiceRSS provider
#[derive(Clone)]
pub struct VoiceRssProvider {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    language: String,
    speed: i64,
    voice: Option<String>,
}

impl VoiceRssProvider {
    pub fn new(transport: Arc<dyn HttpTransport>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            language: "en-gb".to_string(),
            speed: 0,
            voice: None,
        }
    }

    /// 返回使用指定语言的新实例
    pub fn with_language(&self, language: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            language: normalize_language(language)?,
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

    /// 返回使用指定 voice 的新实例
    pub fn with_voice(&self, voice: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            voice: Some(normalize_voice(voice)?),
            ..self.clone()
        })
    }
}

fn normalize_language(language: &str) -> Result<String, SpeechError> {
    let mut language = language.trim().to_lowercase();

    if language.len() == 2 {
        language = format!("{0}-{0}", language);
    }

    let bytes = language.as_bytes();
    let valid = bytes.len() == 5
        && bytes[2] == b'-'
        && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_lowercase);

    if !valid {
        return Err(SpeechError::validation(format!(
            "Unexpected language code ({}), codes should be 2 characters, a hyphen, and a further 2 characters",
            language
        )));
    }

    Ok(language)
}

fn validate_speed(speed: i64) -> Result<i64, SpeechError> {
    if !(-10..=10).contains(&speed) {
        return Err(SpeechError::validation(format!(
            "Invalid speed ({}), must be a number between -10 and 10",
            speed
        )));
    }
    Ok(speed)
}

fn normalize_voice(voice: &str) -> Result<String, SpeechError> {
    let voice = voice.trim();
    if voice.chars().count() < 2 {
        return Err(SpeechError::validation(format!(
            "Unexpected voice name ({}), names should be at least 2 characters long",
            voice
        )));
    }
    Ok(voice.to_string())
}

#[async_trait]
impl SpeechProvider for VoiceRssProvider {
    fn options(&self) -> SynthesisOptions {
        let options = SynthesisOptions::new()
            .with("language", self.language.as_str())
            .with("speed", self.speed);

        match &self.voice {
            Some(voice) => options.with("voice", voice.as_str()),
            None => options,
        }
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("src", text.to_string()),
            ("hl", self.language.clone()),
        ];
        if let Some(voice) = &self.voice {
            params.push(("v", voice.clone()));
        }
        params.push(("r", self.speed.to_string()));
        params.push(("c", "MP3".to_string()));
        params.push(("f", "16khz_16bit_stereo".to_string()));

        let body = send_request(self.transport.as_ref(), ENDPOINT, &params).await?;

        if body.starts_with(ERROR_PREFIX) {
            let message = String::from_utf8_lossy(&body);
            tracing::warn!(error = %message, "VoiceRSS returned an error");
            return Err(SpeechError::provider(format!("TextToSpeech {}", message)));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::OptionValue;
    use crate::infrastructure::adapters::fake::FakeTransport;

    const URL: &str =
        "https://api.voicerss.org/?key=APIKEY&src=Hello&hl=en-gb&r=0&c=MP3&f=16khz_16bit_stereo";

    fn provider(transport: &Arc<FakeTransport>) -> VoiceRssProvider {
        VoiceRssProvider::new(transport.clone(), "APIKEY")
    }

    #[tokio::test]
    async fn test_synthesize() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        assert_eq!(provider(&transport).synthesize("Hello").await.unwrap(), b"mp3");
        assert_eq!(transport.requests(), vec![URL]);
    }

    #[tokio::test]
    async fn test_vendor_error_on_200() {
        let transport = Arc::new(FakeTransport::ok("ERROR: Test Message"));
        let err = provider(&transport).synthesize("Hello").await.unwrap_err();

        assert!(matches!(err, SpeechError::Provider(_)));
        assert_eq!(err.message(), "TextToSpeech ERROR: Test Message");
    }

    #[tokio::test]
    async fn test_with_language() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        let original = provider(&transport);
        let french = original.with_language("fr").unwrap();

        assert_eq!(french.options().get("language"), Some(&OptionValue::from("fr-fr")));
        assert_eq!(original.options().get("language"), Some(&OptionValue::from("en-gb")));

        french.synthesize("Hello").await.unwrap();
        assert_eq!(
            transport.requests(),
            vec!["https://api.voicerss.org/?key=APIKEY&src=Hello&hl=fr-fr&r=0&c=MP3&f=16khz_16bit_stereo"]
        );
    }

    #[test]
    fn test_language_lowercased() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        let us = provider(&transport).with_language("EN-US").unwrap();
        assert_eq!(us.options().get("language"), Some(&OptionValue::from("en-us")));
    }

    #[test]
    fn test_with_language_failure() {
        let transport = Arc::new(FakeTransport::ok("mp3"));

        let err = provider(&transport).with_language("nope").err().unwrap();
        assert!(err
            .message()
            .starts_with("Unexpected language code (nope), codes should be 2 characters"));

        assert!(provider(&transport).with_language("who?").is_err());
        assert!(provider(&transport).with_language("e1-gb").is_err());
    }

    #[tokio::test]
    async fn test_with_speed() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        let original = provider(&transport);
        let slow = original.with_speed(-5).unwrap();

        assert_eq!(slow.options().get("speed"), Some(&OptionValue::Int(-5)));
        assert_eq!(original.options().get("speed"), Some(&OptionValue::Int(0)));

        slow.synthesize("Hello").await.unwrap();
        assert!(transport.requests()[0].contains("&r=-5&"));
    }

    #[test]
    fn test_with_speed_failure() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        let err = provider(&transport).with_speed(11).err().unwrap();
        assert_eq!(err.message(), "Invalid speed (11), must be a number between -10 and 10");
        assert!(provider(&transport).with_speed(-11).is_err());
        assert!(provider(&transport).with_speed(10).is_ok());
    }

    #[tokio::test]
    async fn test_with_voice() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        let original = provider(&transport);
        let linda = original.with_voice("Linda").unwrap();

        let expected = SynthesisOptions::new()
            .with("language", "en-gb")
            .with("speed", 0)
            .with("voice", "Linda");
        assert_eq!(linda.options(), expected);
        assert!(original.options().get("voice").is_none());

        linda.synthesize("Hello").await.unwrap();
        assert_eq!(
            transport.requests(),
            vec!["https://api.voicerss.org/?key=APIKEY&src=Hello&hl=en-gb&v=Linda&r=0&c=MP3&f=16khz_16bit_stereo"]
        );

        assert!(original.with_voice("L").is_err());
    }

    #[test]
    fn test_options() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        let expected = SynthesisOptions::new().with("language", "en-gb").with("speed", 0);
        assert_eq!(provider(&transport).options(), expected);

        let custom = provider(&transport)
            .with_language("ab-cd")
            .unwrap()
            .with_speed(10)
            .unwrap();
        let expected = SynthesisOptions::new().with("language", "ab-cd").with("speed", 10);
        assert_eq!(custom.options(), expected);
    }
}
