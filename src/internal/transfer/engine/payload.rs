//! 整体拉取：不带 Range 的单次 `GET`，分块方案不可行时的退路。

use std::sync::Arc;

use reqwest::{Client, Method};

use crate::internal::transfer::structs::download_outcome::DownloadOutcome;
use crate::internal::transfer::structs::engine_state::EngineState;
use crate::internal::transfer::structs::memory_download_result::MemoryDownloadResult;
use crate::internal::transfer::structs::request_target::RequestTarget;
use crate::internal::transfer::structs::transfer_hooks_container::TransferHooksContainer;
use crate::internal::transfer::structs::transport_error::TransportError;

use super::transport::{self, HttpRequestParams};

/// 整体拉取资源。进度按 `(已收字节, 响应报告的长度)` 上抛；
/// 服务端不给长度时第二个参数 <= 0，进度应视为不确定。
///
/// 归类与分块拉取一致，但不做区间长度比对；2xx 在这里标记为 `Success`，
/// 由编排器在回退入口改写为 `SucceededByPayload`。
pub(crate) async fn fetch_payload(
    client: &Client,
    state: &Arc<EngineState>,
    target: &RequestTarget,
    hooks: &mut TransferHooksContainer,
) -> DownloadOutcome {
    if state.is_cancelled() {
        tracing::warn!("已取消，对 {} 的整体拉取未发出", target.url());
        return DownloadOutcome::of(MemoryDownloadResult::Cancelled);
    }

    let params = HttpRequestParams {
        method: Method::GET,
        url: target.url(),
        content_type: target.content_type_value(),
        extra_headers: target.headers(),
        body: None,
        timeout_secs: target.timeout_secs(),
    };

    let mut on_progress = |_sent: i64, recv: i64, len: i64| hooks.run_on_progress(recv, len);
    let response = match transport::issue_request(client, state, params, &mut on_progress).await {
        Ok(response) => response,
        Err(TransportError::Aborted) => {
            tracing::warn!("对 {} 的整体拉取被取消", target.url());
            return DownloadOutcome::of(MemoryDownloadResult::Cancelled);
        }
        Err(e) => {
            tracing::error!("对 {} 的整体拉取失败: {}", target.url(), e);
            return DownloadOutcome::of(MemoryDownloadResult::DownloadFailed);
        }
    };

    if response.status == 304 {
        tracing::debug!("对 {} 的整体拉取返回 304 Not Modified", target.url());
        return DownloadOutcome::with_headers(MemoryDownloadResult::NotModified, response.headers);
    }
    if !response.is_2xx() {
        tracing::error!(
            "对 {} 的整体拉取失败: 状态码 {}",
            target.url(),
            response.status
        );
        return DownloadOutcome::with_headers(MemoryDownloadResult::DownloadFailed, response.headers);
    }
    if response.body.is_empty() {
        tracing::error!("对 {} 的整体拉取失败: 响应体为空", target.url());
        return DownloadOutcome::with_headers(MemoryDownloadResult::DownloadFailed, response.headers);
    }

    tracing::debug!(
        "对 {} 的整体拉取完成，共 {} 字节",
        target.url(),
        response.body.len()
    );
    DownloadOutcome {
        result: MemoryDownloadResult::Success,
        data: response.body,
        headers: response.headers,
    }
}
