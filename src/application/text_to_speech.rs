//! TextToSpeech - 合成编排与文件缓存
//!
//! 一个实例 = 一段文本 + 一个 provider:
//! - 音频懒加载，成功后在实例内缓存，provider 最多调用一次
//! - 失败不缓存，下次调用重新合成
//! - 文件缓存以指纹命名，磁盘上是否存在即是唯一的命中依据
//!
//! 并发调用同一指纹时可能同时未命中并重复写入同一路径，需要时由宿主加锁。

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::OnceCell;

use crate::application::error::SpeechError;
use crate::application::ports::SpeechProvider;
use crate::domain::speech::fingerprint;

/// 文本转语音
pub struct TextToSpeech<P> {
    text: String,
    provider: P,
    audio: OnceCell<Vec<u8>>,
}

impl<P: SpeechProvider> TextToSpeech<P> {
    pub fn new(text: impl Into<String>, provider: P) -> Self {
        Self {
            text: text.into(),
            provider,
            audio: OnceCell::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 获取音频数据
    pub async fn fetch_audio(&self) -> Result<&[u8], SpeechError> {
        let audio = self
            .audio
            .get_or_try_init(|| async {
                tracing::debug!(text_len = self.text.len(), "Synthesizing audio");
                let audio = self.provider.synthesize(&self.text).await?;
                tracing::info!(
                    audio_size = audio.len(),
                    format = %self.provider.format(),
                    "Synthesis completed"
                );
                Ok::<_, SpeechError>(audio)
            })
            .await?;

        Ok(audio.as_slice())
    }

    /// 缓存文件名: `<md5>.<format>`
    pub fn fingerprint(&self) -> String {
        fingerprint(
            &self.provider.options(),
            &self.text,
            self.provider.format(),
        )
    }

    /// 将音频写入指定文件
    pub async fn write_to(&self, path: impl AsRef<Path>) -> Result<(), SpeechError> {
        let path = path.as_ref();
        let audio = self.fetch_audio().await?;

        fs::write(path, audio)
            .await
            .map_err(|e| SpeechError::io(path, e))?;

        tracing::debug!(path = %path.display(), size = audio.len(), "Saved audio file");
        Ok(())
    }

    /// 获取缓存文件路径，未命中时合成并写入
    ///
    /// `directory` 为空时使用系统临时目录
    pub async fn resolve_cached_path(
        &self,
        directory: Option<&Path>,
    ) -> Result<PathBuf, SpeechError> {
        let directory = directory
            .map(Path::to_path_buf)
            .unwrap_or_else(std::env::temp_dir);
        let path = directory.join(self.fingerprint());

        if is_file(&path).await {
            tracing::info!(path = %path.display(), "Audio cache hit");
        } else {
            tracing::info!(path = %path.display(), "Audio cache miss");
            self.write_to(&path).await?;
        }

        Ok(path)
    }
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::{AudioFormat, SynthesisOptions};
    use crate::infrastructure::adapters::fake::FakeSpeechProvider;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn english_provider() -> Arc<FakeSpeechProvider> {
        Arc::new(
            FakeSpeechProvider::new(b"test-mp3-data".to_vec())
                .with_options(SynthesisOptions::new().with("language", "en")),
        )
    }

    #[tokio::test]
    async fn test_fetch_audio_calls_provider_once() {
        let provider = english_provider();
        let tts = TextToSpeech::new("hello", provider.clone());

        assert_eq!(tts.fetch_audio().await.unwrap(), b"test-mp3-data");
        assert_eq!(tts.fetch_audio().await.unwrap(), b"test-mp3-data");
        assert_eq!(provider.calls(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_memoized() {
        let provider = Arc::new(FakeSpeechProvider::new(b"mp3".to_vec()).failing_times(1));
        let tts = TextToSpeech::new("hello", provider.clone());

        let err = tts.fetch_audio().await.unwrap_err();
        assert!(matches!(err, SpeechError::Provider(_)));

        assert_eq!(tts.fetch_audio().await.unwrap(), b"mp3");
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_fingerprint_known_vector() {
        let tts = TextToSpeech::new("hello", english_provider());
        assert_eq!(tts.fingerprint(), "5ee35ff512372af8cee8ddf79edec5ea.mp3");

        let wav = FakeSpeechProvider::new(Vec::new())
            .with_options(SynthesisOptions::new().with("language", "en"))
            .with_format(AudioFormat::Wav);
        let tts = TextToSpeech::new("hello", wav);
        assert_eq!(tts.fingerprint(), "5ee35ff512372af8cee8ddf79edec5ea.wav");
    }

    #[test]
    fn test_fingerprint_depends_on_options_not_instance() {
        let a = TextToSpeech::new("hello", english_provider());
        let b = TextToSpeech::new("hello", english_provider());
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c = TextToSpeech::new("hello", FakeSpeechProvider::new(Vec::new()));
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[tokio::test]
    async fn test_write_to() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.mp3");
        let tts = TextToSpeech::new("hello", english_provider());

        tts.write_to(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"test-mp3-data");
    }

    #[tokio::test]
    async fn test_write_to_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/path/test.mp3");
        let tts = TextToSpeech::new("hello", english_provider());

        let err = tts.write_to(&path).await.unwrap_err();
        assert!(matches!(err, SpeechError::Io { .. }));
        assert_eq!(
            err.to_string(),
            format!("Unable to save the file ({})", path.display())
        );
    }

    #[tokio::test]
    async fn test_resolve_cached_path_synthesizes_once() {
        let dir = tempdir().unwrap();
        let provider = english_provider();
        let tts = TextToSpeech::new("hello", provider.clone());

        let expected = dir.path().join("5ee35ff512372af8cee8ddf79edec5ea.mp3");

        let first = tts.resolve_cached_path(Some(dir.path())).await.unwrap();
        assert_eq!(first, expected);
        assert_eq!(std::fs::read(&first).unwrap(), b"test-mp3-data");

        let second = tts.resolve_cached_path(Some(dir.path())).await.unwrap();
        assert_eq!(second, expected);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_cached_path_defaults_to_temp_dir() {
        let text = format!("temp dir default {}", std::process::id());
        let provider = english_provider();
        let tts = TextToSpeech::new(text.as_str(), provider.clone());

        let path = tts.resolve_cached_path(None).await.unwrap();

        assert!(path.starts_with(std::env::temp_dir()));
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), tts.fingerprint());
        assert!(tts.fingerprint().ends_with(".mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"test-mp3-data");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_resolve_cached_path_shared_across_instances() {
        let dir = tempdir().unwrap();

        let first = english_provider();
        TextToSpeech::new("hello", first.clone())
            .resolve_cached_path(Some(dir.path()))
            .await
            .unwrap();

        // 新实例、相同选项：命中磁盘缓存，不再调用 provider
        let second = english_provider();
        let path = TextToSpeech::new("hello", second.clone())
            .resolve_cached_path(Some(dir.path()))
            .await
            .unwrap();

        assert!(path.is_file());
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 0);
    }
}
