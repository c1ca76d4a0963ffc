//! Provider Factory
//!
//! 根据配置构建 Provider，所有可选参数都经过对应后端的 `with_*` 校验

use std::sync::Arc;

use super::types::{AppConfig, ProviderKind};
use crate::application::error::SpeechError;
use crate::application::ports::{HttpTransport, ProcessRunner};
use crate::infrastructure::adapters::{ReqwestTransport, ReqwestTransportConfig, TokioProcessRunner};
use crate::infrastructure::providers::{
    AcapelaProvider, GoogleProvider, PicottsProvider, Provider, ResponsiveVoiceProvider,
    VoiceRssProvider,
};

/// 使用 reqwest / tokio::process 构建 Provider
pub fn build_provider(config: &AppConfig) -> Result<Provider, SpeechError> {
    let transport = ReqwestTransport::new(
        ReqwestTransportConfig::default().with_timeout(config.http.timeout_secs),
    )
    .map_err(|e| SpeechError::provider(e.to_string()))?;

    build_provider_with(config, Arc::new(transport), Arc::new(TokioProcessRunner::new()))
}

/// 使用指定的传输与进程执行器构建 Provider
pub fn build_provider_with(
    config: &AppConfig,
    transport: Arc<dyn HttpTransport>,
    runner: Arc<dyn ProcessRunner>,
) -> Result<Provider, SpeechError> {
    let settings = &config.provider;

    let provider = match settings.kind {
        ProviderKind::Acapela => {
            let mut acapela = AcapelaProvider::new(
                transport,
                credential(&settings.login),
                credential(&settings.application),
                credential(&settings.password),
            );
            if let Some(voice) = &settings.voice {
                acapela = acapela.with_voice(voice)?;
            }
            if let Some(speed) = settings.speed {
                acapela = acapela.with_speed(speed)?;
            }
            Provider::from(acapela)
        }
        ProviderKind::Google => {
            let mut google = GoogleProvider::new(transport);
            if let Some(language) = &settings.language {
                google = google.with_language(language)?;
            }
            Provider::from(google)
        }
        ProviderKind::VoiceRss => {
            let mut voice_rss = VoiceRssProvider::new(transport, credential(&settings.api_key));
            if let Some(language) = &settings.language {
                voice_rss = voice_rss.with_language(language)?;
            }
            if let Some(speed) = settings.speed {
                voice_rss = voice_rss.with_speed(speed)?;
            }
            if let Some(voice) = &settings.voice {
                voice_rss = voice_rss.with_voice(voice)?;
            }
            Provider::from(voice_rss)
        }
        ProviderKind::ResponsiveVoice => {
            let mut responsive = ResponsiveVoiceProvider::new(transport);
            if let Some(language) = &settings.language {
                responsive = responsive.with_language(language)?;
            }
            Provider::from(responsive)
        }
        ProviderKind::Picotts => {
            let mut pico = match &settings.binary {
                Some(binary) => PicottsProvider::with_binary(runner, binary)?,
                None => PicottsProvider::new(runner)?,
            };
            if let Some(language) = &settings.language {
                pico = pico.with_language(language)?;
            }
            Provider::from(pico)
        }
    };

    tracing::debug!(provider = provider.name(), "Provider built");
    Ok(provider)
}

fn credential(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ProcessOutput, SpeechProvider};
    use crate::domain::speech::{AudioFormat, SynthesisOptions};
    use crate::infrastructure::adapters::fake::{FakeProcessRunner, FakeTransport};

    fn build(config: &AppConfig) -> Result<Provider, SpeechError> {
        build_provider_with(
            config,
            Arc::new(FakeTransport::ok("mp3")),
            Arc::new(FakeProcessRunner::returning(ProcessOutput::success())),
        )
    }

    #[test]
    fn test_build_default_google() {
        let provider = build(&AppConfig::default()).ok().unwrap();
        assert_eq!(provider.name(), "google");
        assert_eq!(provider.options(), SynthesisOptions::new().with("language", "en"));
    }

    #[test]
    fn test_build_applies_validated_options() {
        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::Acapela;
        config.provider.voice = Some("Lucy".to_string());
        config.provider.speed = Some(190);

        let provider = build(&config).ok().unwrap();
        assert_eq!(
            provider.options(),
            SynthesisOptions::new().with("voice", "lucy").with("speed", 190)
        );
    }

    #[test]
    fn test_build_rejects_invalid_options() {
        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::VoiceRss;
        config.provider.api_key = Some("APIKEY".to_string());
        config.provider.speed = Some(999);

        let err = build(&config).err().unwrap();
        assert!(matches!(err, SpeechError::Validation(_)));
    }

    #[test]
    fn test_build_responsive_voice() {
        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::ResponsiveVoice;
        config.provider.language = Some("fr".to_string());

        let provider = build(&config).ok().unwrap();
        assert_eq!(provider.options(), SynthesisOptions::new().with("language", "fr-FR"));
    }

    #[test]
    fn test_build_picotts_with_binary() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("pico2wave");
        std::fs::write(&binary, "bin").unwrap();

        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::Picotts;
        config.provider.binary = Some(binary);

        let provider = build(&config).ok().unwrap();
        assert_eq!(provider.format(), AudioFormat::Wav);
        assert_eq!(provider.options(), SynthesisOptions::new().with("language", "en-US"));

        config.provider.binary = Some(dir.path().join("missing"));
        assert!(matches!(build(&config).err().unwrap(), SpeechError::Provider(_)));
    }
}
