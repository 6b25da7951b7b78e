//! 单个分块的 Range 拉取与响应校验。

use std::sync::Arc;

use reqwest::{Client, Method};

use crate::internal::transfer::structs::chunk_range::ChunkRange;
use crate::internal::transfer::structs::download_outcome::DownloadOutcome;
use crate::internal::transfer::structs::engine_state::EngineState;
use crate::internal::transfer::structs::memory_download_result::MemoryDownloadResult;
use crate::internal::transfer::structs::request_target::RequestTarget;
use crate::internal::transfer::structs::transfer_hooks_container::TransferHooksContainer;
use crate::internal::transfer::structs::transport_error::TransportError;

use super::transport::{self, HttpRequestParams};

/// 发起 Range 拉取时的参数（形参超过 3 个时用 struct 承载）。
pub(crate) struct RangedFetchParams<'a> {
    pub target: &'a RequestTarget,
    /// 整个资源的体积（来自体积探测），用于整体进度换算与区间校验
    pub total_size: i64,
    pub range: ChunkRange,
}

/// 拉取一个分块：`GET` + `Range: bytes=lo-hi`。
///
/// 前置条件不满足时不发请求，直接判 `DownloadFailed`。
/// 进度按 `(已收字节 + range.lo, total_size)` 上抛，调用方看到的是整体进度。
pub(crate) async fn fetch_range(
    client: &Client,
    state: &Arc<EngineState>,
    params: RangedFetchParams<'_>,
    hooks: &mut TransferHooksContainer,
) -> DownloadOutcome {
    let RangedFetchParams {
        target,
        total_size,
        range,
    } = params;

    if state.is_cancelled() {
        tracing::warn!("已取消，对 {} 的分块拉取未发出", target.url());
        return DownloadOutcome::of(MemoryDownloadResult::Cancelled);
    }
    if !range.is_valid() {
        tracing::error!(
            "对 {} 的分块区间 ({}, {}) 非法",
            target.url(),
            range.lo,
            range.hi
        );
        return DownloadOutcome::of(MemoryDownloadResult::DownloadFailed);
    }
    if range.len() > total_size {
        tracing::error!(
            "对 {} 的分块区间 ({}, {}) 超出体积 {}",
            target.url(),
            range.lo,
            range.hi,
            total_size
        );
        return DownloadOutcome::of(MemoryDownloadResult::DownloadFailed);
    }

    let mut headers: Vec<(String, String)> = target.headers().to_vec();
    headers.push(("Range".to_string(), range.header_value()));

    let request_params = HttpRequestParams {
        method: Method::GET,
        url: target.url(),
        content_type: target.content_type_value(),
        extra_headers: &headers,
        body: None,
        timeout_secs: target.timeout_secs(),
    };

    let lo = range.lo;
    let mut on_progress =
        |_sent: i64, recv: i64, _len: i64| hooks.run_on_progress(recv + lo, total_size);
    let response =
        match transport::issue_request(client, state, request_params, &mut on_progress).await {
            Ok(response) => response,
            Err(TransportError::Aborted) => {
                tracing::warn!("对 {} 的分块拉取被取消", target.url());
                return DownloadOutcome::of(MemoryDownloadResult::Cancelled);
            }
            Err(e) => {
                tracing::error!("对 {} 的分块拉取失败: {}", target.url(), e);
                return DownloadOutcome::of(MemoryDownloadResult::DownloadFailed);
            }
        };

    if response.status == 304 {
        tracing::debug!("对 {} 的分块拉取返回 304 Not Modified", target.url());
        return DownloadOutcome::with_headers(MemoryDownloadResult::NotModified, response.headers);
    }
    if !response.is_2xx() {
        tracing::error!(
            "对 {} 的分块拉取失败: 状态码 {}",
            target.url(),
            response.status
        );
        return DownloadOutcome::with_headers(MemoryDownloadResult::DownloadFailed, response.headers);
    }
    if response.body.is_empty() {
        tracing::error!("对 {} 的分块拉取失败: 响应体为空", target.url());
        return DownloadOutcome::with_headers(MemoryDownloadResult::DownloadFailed, response.headers);
    }
    if response.content_length != range.len() {
        // 服务端忽略或放宽了 Range
        tracing::error!(
            "对 {} 的分块拉取失败: Content-Length {} 与期望的 {} 不符",
            target.url(),
            response.content_length,
            range.len()
        );
        return DownloadOutcome::with_headers(MemoryDownloadResult::DownloadFailed, response.headers);
    }

    tracing::debug!(
        "对 {} 的分块拉取完成，区间 ({}, {})",
        target.url(),
        range.lo,
        range.hi
    );
    DownloadOutcome {
        result: MemoryDownloadResult::Success,
        data: response.body,
        headers: response.headers,
    }
}
