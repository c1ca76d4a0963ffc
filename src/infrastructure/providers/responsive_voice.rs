//! ResponsiveVoice provider
//!
//! 语言代码格式 `xx-YY`: `en` -> `en-EN`，`fr-ca` -> `fr-CA`

use async_trait::async_trait;
use std::sync::Arc;

use super::base::send_request;
use crate::application::error::SpeechError;
use crate::application::ports::{HttpTransport, SpeechProvider};
use crate::domain::speech::SynthesisOptions;

const ENDPOINT: &str = "https://code.responsivevoice.org/getvoice.php";

/// ResponsiveVoice provider
#[derive(Clone)]
pub struct ResponsiveVoiceProvider {
    transport: Arc<dyn HttpTransport>,
    language: String,
}

impl ResponsiveVoiceProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            language: "en-GB".to_string(),
        }
    }

    /// 返回使用指定语言的新实例
    pub fn with_language(&self, language: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            language: normalize_language(language)?,
            ..self.clone()
        })
    }
}

fn normalize_language(language: &str) -> Result<String, SpeechError> {
    let mut language = language.trim().to_string();

    if language.len() == 2 {
        language = format!("{0}-{0}", language);
    }

    match language.split_once('-') {
        Some((main, region))
            if main.len() == 2
                && region.len() == 2
                && main.chars().chain(region.chars()).all(|c| c.is_ascii_alphabetic()) =>
        {
            Ok(format!("{}-{}", main.to_ascii_lowercase(), region.to_ascii_uppercase()))
        }
        _ => Err(SpeechError::validation(format!(
            "Unexpected language code ({}), codes should be 2 characters, a hyphen, and a further 2 characters",
            language
        ))),
    }
}

#[async_trait]
impl SpeechProvider for ResponsiveVoiceProvider {
    fn options(&self) -> SynthesisOptions {
        SynthesisOptions::new().with("language", self.language.as_str())
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let params = [("tl", self.language.clone()), ("t", text.to_string())];
        send_request(self.transport.as_ref(), ENDPOINT, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::OptionValue;
    use crate::infrastructure::adapters::fake::FakeTransport;

    #[tokio::test]
    async fn test_synthesize() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        let provider = ResponsiveVoiceProvider::new(transport.clone());

        assert_eq!(provider.synthesize("Hello").await.unwrap(), b"mp3");
        assert_eq!(
            transport.requests(),
            vec!["https://code.responsivevoice.org/getvoice.php?tl=en-GB&t=Hello"]
        );
    }

    #[tokio::test]
    async fn test_with_language() {
        let transport = Arc::new(FakeTransport::ok("mp3"));
        let english = ResponsiveVoiceProvider::new(transport.clone());
        let french = english.with_language("fr").unwrap();

        assert_eq!(french.options().get("language"), Some(&OptionValue::from("fr-FR")));
        assert_eq!(english.options().get("language"), Some(&OptionValue::from("en-GB")));

        french.synthesize("Hello").await.unwrap();
        assert!(transport.requests()[0].contains("tl=fr-FR"));
    }

    #[test]
    fn test_language_case_normalized() {
        let provider = ResponsiveVoiceProvider::new(Arc::new(FakeTransport::ok("mp3")));
        let canada = provider.with_language("FR-ca").unwrap();
        assert_eq!(canada.options().get("language"), Some(&OptionValue::from("fr-CA")));
    }

    #[test]
    fn test_with_language_failure() {
        let provider = ResponsiveVoiceProvider::new(Arc::new(FakeTransport::ok("mp3")));
        let err = provider.with_language("k").err().unwrap();

        assert_eq!(
            err.message(),
            "Unexpected language code (k), codes should be 2 characters, a hyphen, and a further 2 characters"
        );
        assert!(provider.with_language("en_GB").is_err());
        assert!(provider.with_language("eng-GB").is_err());
    }
}
