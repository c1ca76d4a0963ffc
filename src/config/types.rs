//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 语音合成后端配置
    #[serde(default)]
    pub provider: ProviderConfig,

    /// HTTP 传输配置
    #[serde(default)]
    pub http: HttpConfig,

    /// 缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 后端类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Acapela,
    #[default]
    Google,
    VoiceRss,
    ResponsiveVoice,
    Picotts,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Acapela => "acapela",
            Self::Google => "google",
            Self::VoiceRss => "voice_rss",
            Self::ResponsiveVoice => "responsive_voice",
            Self::Picotts => "picotts",
        };
        f.write_str(name)
    }
}

/// 后端配置
///
/// 未设置的可选参数使用各后端的默认值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    /// 后端类型
    #[serde(default)]
    pub kind: ProviderKind,

    /// 语言代码（google / voice_rss / responsive_voice / picotts）
    #[serde(default)]
    pub language: Option<String>,

    /// 音色（acapela / voice_rss）
    #[serde(default)]
    pub voice: Option<String>,

    /// 语速（acapela: 60..=360，voice_rss: -10..=10）
    #[serde(default)]
    pub speed: Option<i64>,

    /// Acapela 登录名
    #[serde(default)]
    pub login: Option<String>,

    /// Acapela 应用名
    #[serde(default)]
    pub application: Option<String>,

    /// Acapela 密码
    #[serde(default)]
    pub password: Option<String>,

    /// VoiceRSS API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// pico2wave 路径，未设置时从 PATH 查找
    #[serde(default)]
    pub binary: Option<PathBuf>,
}

/// HTTP 传输配置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
}

fn default_http_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout(),
        }
    }
}

/// 缓存配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    /// 缓存目录，未设置时使用系统临时目录
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
