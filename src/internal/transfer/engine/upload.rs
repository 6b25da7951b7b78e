//! 上传驱动：单次 `PUT` 送出整个请求体。

use std::sync::Weak;

use reqwest::{Client, Method};

use crate::internal::transfer::structs::engine_state::EngineState;
use crate::internal::transfer::structs::request_target::RequestTarget;
use crate::internal::transfer::structs::transfer_hooks_container::TransferHooksContainer;
use crate::internal::transfer::structs::transport_error::TransportError;
use crate::internal::transfer::structs::upload_drive_result::UploadDriveResult;

use super::transport::{self, HttpRequestParams};

/// 上传整个请求体。进度按 `(已发送字节, 请求体总长)` 上抛。
///
/// 只接受状态码恰为 `200`；其余一律判 `UploadFailed`。
pub(crate) async fn run_upload(
    client: &Client,
    state: &Weak<EngineState>,
    target: &RequestTarget,
    body: Vec<u8>,
    hooks: &mut TransferHooksContainer,
) -> UploadDriveResult {
    let Some(strong) = state.upgrade() else {
        tracing::warn!("上传到 {} 失败: 引擎已被销毁", target.url());
        return UploadDriveResult::UploadFailed;
    };
    if strong.is_cancelled() {
        tracing::warn!("对 {} 的上传已被取消", target.url());
        return UploadDriveResult::Cancelled;
    }

    if hooks.run_before_start().await.is_err() {
        tracing::warn!("对 {} 的上传被钩子中止", target.url());
        return UploadDriveResult::UploadFailed;
    }

    let total = body.len() as i64;
    let params = HttpRequestParams {
        method: Method::PUT,
        url: target.url(),
        content_type: target.content_type_value(),
        extra_headers: target.headers(),
        body: Some(body),
        timeout_secs: target.timeout_secs(),
    };

    let mut on_progress = |sent: i64, _recv: i64, _len: i64| hooks.run_on_progress(sent, total);
    let response = match transport::issue_request(client, &strong, params, &mut on_progress).await {
        Ok(response) => response,
        Err(TransportError::Aborted) => {
            tracing::warn!("对 {} 的上传被取消", target.url());
            return UploadDriveResult::Cancelled;
        }
        Err(e) => {
            tracing::error!("上传到 {} 失败: {}", target.url(), e);
            return UploadDriveResult::UploadFailed;
        }
    };
    drop(strong);

    let Some(strong) = state.upgrade() else {
        tracing::warn!("上传到 {} 失败: 引擎已被销毁", target.url());
        return UploadDriveResult::UploadFailed;
    };
    if strong.is_cancelled() {
        tracing::warn!("对 {} 的上传已被取消", target.url());
        return UploadDriveResult::Cancelled;
    }
    drop(strong);

    if response.status != 200 {
        tracing::error!("上传到 {} 失败: 状态码 {}", target.url(), response.status);
        return UploadDriveResult::UploadFailed;
    }

    tracing::debug!("上传到 {} 完成", target.url());
    hooks.run_after_complete().await;
    UploadDriveResult::Success
}
