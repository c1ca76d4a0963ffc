//! Fake Process Runner - 用闭包模拟外部程序

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ports::{ProcessError, ProcessOutput, ProcessRunner};

type Handler = dyn Fn(&Path, &[String]) -> ProcessOutput + Send + Sync;

/// Fake Process Runner
///
/// 每次调用交给 handler 处理，handler 可以模拟程序写出的文件
pub struct FakeProcessRunner {
    handler: Box<Handler>,
    invocations: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeProcessRunner {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Path, &[String]) -> ProcessOutput + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// 总是返回同一结果
    pub fn returning(output: ProcessOutput) -> Self {
        Self::new(move |_, _| output.clone())
    }

    /// 已执行的 (程序, 参数)
    pub fn invocations(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.invocations
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[async_trait]
impl ProcessRunner for FakeProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, ProcessError> {
        self.invocations
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((program.to_path_buf(), args.to_vec()));

        Ok((self.handler)(program, args))
    }
}
