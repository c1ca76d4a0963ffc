//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod fake;
pub mod http;
pub mod process;

pub use http::{ReqwestTransport, ReqwestTransportConfig};
pub use process::TokioProcessRunner;
