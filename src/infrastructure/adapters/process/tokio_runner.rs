//! Tokio Process Runner - ProcessRunner 的 tokio::process 实现

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::application::ports::{ProcessError, ProcessOutput, ProcessRunner};

/// 基于 tokio::process 的进程执行器
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, ProcessError> {
        tracing::debug!(program = %program.display(), args = args.len(), "Running process");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ProcessError::SpawnFailed {
                program: program.display().to_string(),
                message: e.to_string(),
            })?;

        let status = output
            .status
            .code()
            .ok_or_else(|| ProcessError::Terminated(output.status.to_string()))?;

        let lines = String::from_utf8_lossy(&output.stdout)
            .lines()
            .chain(String::from_utf8_lossy(&output.stderr).lines())
            .map(str::to_string)
            .collect();

        Ok(ProcessOutput::new(status, lines))
    }
}
