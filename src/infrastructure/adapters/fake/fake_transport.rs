//! Fake Transport - 记录请求 URL 并返回预设响应

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::application::ports::{HttpResponse, HttpTransport, TransportError};

/// Fake HTTP Transport
///
/// 响应队列按顺序消费，队列为空时返回最后一个默认响应
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    fallback: HttpResponse,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    /// 所有请求都返回给定响应
    pub fn new(response: HttpResponse) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 状态 200，body 为给定内容
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(HttpResponse::ok(body))
    }

    /// 追加一次性响应
    pub fn then(self, response: Result<HttpResponse, TransportError>) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push_back(response);
        self
    }

    /// 已发出的请求 URL
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(url.to_string());

        let queued = self
            .responses
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front();

        match queued {
            Some(response) => response,
            None => Ok(self.fallback.clone()),
        }
    }
}
