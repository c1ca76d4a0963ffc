//! Speaker - 命令行入口
//!
//! 用法: `speaker <text>...`
//! 输出缓存音频文件的路径

use speaker::config::{build_provider, load_config, print_config};
use speaker::TextToSpeech;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志（写到 stderr，stdout 只输出文件路径）
    let log_filter = format!("{},speaker={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        anyhow::bail!("Usage: speaker <text>");
    }

    print_config(&config);

    if let Some(dir) = &config.cache.dir {
        tokio::fs::create_dir_all(dir).await?;
    }

    let provider = build_provider(&config)?;
    tracing::info!(provider = provider.name(), "Provider ready");

    let tts = TextToSpeech::new(text, provider);
    let path = tts.resolve_cached_path(config.cache.dir.as_deref()).await?;

    println!("{}", path.display());
    Ok(())
}
