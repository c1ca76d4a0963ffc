//! HTTP Adapter - reqwest 传输实现

mod reqwest_transport;

pub use reqwest_transport::{ReqwestTransport, ReqwestTransportConfig};
