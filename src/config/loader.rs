//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（speaker.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, ProviderConfig, ProviderKind};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["speaker", "speaker.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SPEAKER_`，层级分隔符 `__`）
/// 2. 配置文件（speaker.toml 或 speaker.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SPEAKER_PROVIDER__KIND=voice_rss`
/// - `SPEAKER_PROVIDER__API_KEY=xxxx`
/// - `SPEAKER_PROVIDER__LANGUAGE=fr`
/// - `SPEAKER_CACHE__DIR=/var/cache/speaker`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("provider.kind", "google")?
        .set_default("http.timeout_secs", 30)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: SPEAKER_PROVIDER__KIND=picotts
    builder = builder.add_source(
        Environment::with_prefix("SPEAKER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn require(value: &Option<String>, name: &str, kind: ProviderKind) -> Result<(), ConfigError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ConfigError::ValidationError(format!(
            "provider.{} is required for the {} provider",
            name, kind
        ))),
    }
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.http.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "HTTP timeout cannot be 0".to_string(),
        ));
    }

    let provider = &config.provider;
    match provider.kind {
        ProviderKind::Acapela => {
            require(&provider.login, "login", provider.kind)?;
            require(&provider.application, "application", provider.kind)?;
            require(&provider.password, "password", provider.kind)?;
        }
        ProviderKind::VoiceRss => {
            require(&provider.api_key, "api_key", provider.kind)?;
        }
        ProviderKind::Google | ProviderKind::ResponsiveVoice | ProviderKind::Picotts => {}
    }

    Ok(())
}

fn mask(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "******",
        None => "<unset>",
    }
}

/// 当前后端的凭据，全部脱敏
fn credential_lines(provider: &ProviderConfig) -> Vec<(&'static str, &'static str)> {
    match provider.kind {
        ProviderKind::Acapela => vec![
            ("Login", mask(&provider.login)),
            ("Application", mask(&provider.application)),
            ("Password", mask(&provider.password)),
        ],
        ProviderKind::VoiceRss => vec![("API Key", mask(&provider.api_key))],
        ProviderKind::Google | ProviderKind::ResponsiveVoice | ProviderKind::Picotts => Vec::new(),
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    let provider = &config.provider;
    tracing::info!("=== Speaker Configuration ===");
    tracing::info!("Provider: {}", provider.kind);
    tracing::info!("Language: {:?}", provider.language);
    tracing::info!("Voice: {:?}", provider.voice);
    tracing::info!("Speed: {:?}", provider.speed);
    for (label, value) in credential_lines(provider) {
        tracing::info!("{}: {}", label, value);
    }
    if provider.kind == ProviderKind::Picotts {
        tracing::info!("Binary: {:?}", provider.binary);
    }
    tracing::info!("HTTP Timeout: {}s", config.http.timeout_secs);
    tracing::info!("Cache Directory: {:?}", config.cache.dir);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=============================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validation_passes_for_default_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.http.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_requires_acapela_credentials() {
        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::Acapela;
        config.provider.login = Some("LOGIN".to_string());
        config.provider.application = Some("APP".to_string());

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("provider.password"));

        config.provider.password = Some("PASSWORD".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_requires_voice_rss_key() {
        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::VoiceRss;
        config.provider.api_key = Some(String::new());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_credentials_are_masked() {
        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::Acapela;
        config.provider.login = Some("LOGIN".to_string());
        config.provider.application = Some("APP".to_string());

        assert_eq!(
            credential_lines(&config.provider),
            vec![
                ("Login", "******"),
                ("Application", "******"),
                ("Password", "<unset>"),
            ]
        );

        config.provider.kind = ProviderKind::VoiceRss;
        config.provider.api_key = Some("APIKEY".to_string());
        assert_eq!(credential_lines(&config.provider), vec![("API Key", "******")]);

        config.provider.kind = ProviderKind::Google;
        assert!(credential_lines(&config.provider).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("speaker.toml");
        std::fs::write(
            &path,
            r#"
[provider]
kind = "voice_rss"
api_key = "APIKEY"
language = "fr"
speed = -3

[cache]
dir = "/var/cache/speaker"
"#,
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::VoiceRss);
        assert_eq!(config.provider.api_key.as_deref(), Some("APIKEY"));
        assert_eq!(config.provider.language.as_deref(), Some("fr"));
        assert_eq!(config.provider.speed, Some(-3));
        assert_eq!(
            config.cache.dir.as_deref(),
            Some(Path::new("/var/cache/speaker"))
        );
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(load_config_from_path(Some(&path)).is_err());
    }
}
