//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod http_transport;
mod polly_client;
mod process_runner;
mod speech_provider;

pub use http_transport::{HttpResponse, HttpTransport, TransportError};
pub use polly_client::{PollyClient, PollyError, PollyRequest};
pub use process_runner::{ProcessError, ProcessOutput, ProcessRunner};
pub use speech_provider::SpeechProvider;
