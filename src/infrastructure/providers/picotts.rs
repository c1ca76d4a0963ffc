//! Pico TTS provider - 调用本地 pico2wave
//!
//! 每次合成:
//! 1. 在工作目录生成确定的目标文件名，删除残留文件
//! 2. `pico2wave --wave={target} --lang={language} {text}`
//! 3. 读取并删除目标文件

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::application::error::SpeechError;
use crate::application::ports::{ProcessRunner, SpeechProvider};
use crate::domain::speech::{AudioFormat, SynthesisOptions};

const BINARY_NAME: &str = "pico2wave";
const NOT_INSTALLED: &str =
    "Unable to find picotts program, please install pico2wave before trying again";

/// Pico TTS provider
#[derive(Clone)]
pub struct PicottsProvider {
    runner: Arc<dyn ProcessRunner>,
    binary: PathBuf,
    work_dir: PathBuf,
    language: String,
}

impl PicottsProvider {
    /// 从 PATH 查找 pico2wave
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Result<Self, SpeechError> {
        let binary = which::which(BINARY_NAME).map_err(|e| {
            tracing::warn!(error = %e, "pico2wave not found on PATH");
            SpeechError::provider(NOT_INSTALLED)
        })?;

        Self::with_binary(runner, binary)
    }

    /// 使用指定路径的 pico2wave
    pub fn with_binary(
        runner: Arc<dyn ProcessRunner>,
        binary: impl Into<PathBuf>,
    ) -> Result<Self, SpeechError> {
        let binary = binary.into();
        if !binary.is_file() {
            return Err(SpeechError::provider(NOT_INSTALLED));
        }

        tracing::debug!(binary = %binary.display(), "PicottsProvider initialized");

        Ok(Self {
            runner,
            binary,
            work_dir: std::env::temp_dir(),
            language: "en-US".to_string(),
        })
    }

    /// 返回使用指定语言的新实例
    pub fn with_language(&self, language: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            language: normalize_language(language)?,
            ..self.clone()
        })
    }

    /// 返回使用指定临时目录的新实例
    pub fn with_work_dir(&self, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..self.clone()
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn target_path(&self, text: &str) -> PathBuf {
        let digest = md5::compute(text.as_bytes());
        self.work_dir.join(format!(
            "speaker_picotts_{}_{:x}.wav",
            self.language, digest
        ))
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

/// 删除残留的目标文件，失败时中止合成
async fn remove_stale(path: &Path) -> Result<(), SpeechError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove stale pico2wave output");
            Err(SpeechError::provider(format!(
                "TextToSpeech unable to remove file: {}",
                path.display()
            )))
        }
    }
}

async fn remove_if_exists(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove file");
        }
    }
}

#[async_trait]
impl SpeechProvider for PicottsProvider {
    fn options(&self) -> SynthesisOptions {
        SynthesisOptions::new().with("language", self.language.as_str())
    }

    fn format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let target = self.target_path(text);
        remove_stale(&target).await?;

        let args = vec![
            format!("--wave={}", target.display()),
            format!("--lang={}", self.language),
            text.to_string(),
        ];

        let output = self
            .runner
            .run(&self.binary, &args)
            .await
            .map_err(|e| SpeechError::provider(e.to_string()))?;

        if !output.is_success() {
            tracing::warn!(status = output.status, "pico2wave failed");
            return Err(SpeechError::provider(output.first_line()));
        }

        if !fs::try_exists(&target).await.unwrap_or(false) {
            return Err(SpeechError::provider(format!(
                "TextToSpeech unable to create file: {}",
                target.display()
            )));
        }

        let audio = fs::read(&target).await.map_err(|e| {
            tracing::warn!(path = %target.display(), error = %e, "Failed to read pico2wave output");
            SpeechError::provider(format!(
                "TextToSpeech unable to read file: {}",
                target.display()
            ))
        })?;

        remove_if_exists(&target).await;

        tracing::info!(language = %self.language, audio_size = audio.len(), "pico2wave completed");
        Ok(audio)
    }
}
