//! 体积探测：`HEAD` 请求取 `Content-Length`。

use std::sync::Arc;

use reqwest::{Client, Method};

use crate::internal::transfer::structs::engine_state::EngineState;
use crate::internal::transfer::structs::probed_size::ProbedSize;
use crate::internal::transfer::structs::request_target::RequestTarget;

use super::transport::{self, HttpRequestParams};

/// 探测资源体积。归类优先级：
/// 传输失败 → `Unknown`；`304` → `NotModified`；其他非 2xx → `Unknown`；
/// 2xx 且 `Content-Length > 0` → `Size`；否则 → `Unknown`。
pub(crate) async fn probe_content_size(
    client: &Client,
    state: &Arc<EngineState>,
    target: &RequestTarget,
) -> ProbedSize {
    let params = HttpRequestParams {
        method: Method::HEAD,
        url: target.url(),
        content_type: "",
        extra_headers: target.headers(),
        body: None,
        timeout_secs: target.timeout_secs(),
    };

    let mut no_progress = |_sent: i64, _recv: i64, _len: i64| {};
    let response = match transport::issue_request(client, state, params, &mut no_progress).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("探测 {} 体积失败: {}", target.url(), e);
            return ProbedSize::Unknown;
        }
    };

    if response.status == 304 {
        tracing::debug!("探测 {} 返回 304 Not Modified", target.url());
        return ProbedSize::NotModified;
    }
    if !response.is_2xx() {
        tracing::warn!("探测 {} 体积失败: 状态码 {}", target.url(), response.status);
        return ProbedSize::Unknown;
    }
    if response.content_length > 0 {
        tracing::debug!("探测到 {} 体积: {} 字节", target.url(), response.content_length);
        ProbedSize::Size(response.content_length)
    } else {
        tracing::warn!(
            "探测 {} 体积失败: Content-Length 为 {}",
            target.url(),
            response.content_length
        );
        ProbedSize::Unknown
    }
}
