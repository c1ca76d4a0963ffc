//! Fake Adapters - 测试替身
//!
//! 不访问网络或外部程序，记录调用以便断言

mod fake_process_runner;
mod fake_provider;
mod fake_transport;

pub use fake_process_runner::FakeProcessRunner;
pub use fake_provider::FakeSpeechProvider;
pub use fake_transport::FakeTransport;
