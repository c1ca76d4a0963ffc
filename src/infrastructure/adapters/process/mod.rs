//! Process Adapter - 本地程序执行

mod tokio_runner;

pub use tokio_runner::TokioProcessRunner;
