//! Process Runner Port - 出站端口
//!
//! 本地 provider 通过此接口执行外部程序。参数逐个传递，不经过 shell。

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 进程执行错误
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to spawn {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("Process terminated by signal: {0}")]
    Terminated(String),
}

/// 进程执行结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// 退出码
    pub status: i32,
    /// 输出行（stdout 在前，stderr 在后）
    pub lines: Vec<String>,
}

impl ProcessOutput {
    pub fn new(status: i32, lines: Vec<String>) -> Self {
        Self { status, lines }
    }

    pub fn success() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// 第一行输出，没有输出时为空字符串
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }
}

/// Process Runner Port
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, ProcessError>;
}
