//! 远程 provider 共用的请求逻辑
//!
//! GET {endpoint}?{query}，仅 200 视为成功

use url::form_urlencoded;

use crate::application::error::SpeechError;
use crate::application::ports::HttpTransport;

/// 外部服务调用失败的统一消息
pub const SERVICE_FAILURE: &str = "Failed to call the external text-to-speech service";

/// 拼接 URL（application/x-www-form-urlencoded，空格编码为 `+`）
pub fn build_url(endpoint: &str, params: &[(&str, String)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}?{}", endpoint, query)
}

/// 发送请求并返回 body
pub async fn send_request(
    transport: &dyn HttpTransport,
    endpoint: &str,
    params: &[(&str, String)],
) -> Result<Vec<u8>, SpeechError> {
    let url = build_url(endpoint, params);

    // URL 中可能包含凭证，只记录 endpoint
    tracing::debug!(endpoint = %endpoint, "Sending TTS request");

    let response = transport.get(&url).await.map_err(|e| {
        tracing::warn!(endpoint = %endpoint, error = %e, "TTS request failed");
        SpeechError::provider(SERVICE_FAILURE)
    })?;

    if response.status != 200 {
        tracing::warn!(endpoint = %endpoint, status = response.status, "TTS service returned non-200");
        return Err(SpeechError::provider(SERVICE_FAILURE));
    }

    Ok(response.body)
}

/// 校验文本长度（按字符计）
pub fn ensure_max_chars(text: &str, max: usize) -> Result<(), SpeechError> {
    if text.chars().count() > max {
        return Err(SpeechError::validation(format!(
            "Only messages under {} characters are supported",
            max
        )));
    }
    Ok(())
}
