//! 下载编排：探测 → 规划 → 串行分块拉取 → 拼装，失败时退回整体拉取。
//!
//! 每个恢复点（探测完成、每次分块完成、整体拉取完成）都先升级引擎弱引用、
//! 再查取消标志，之后才允许看结果。升级失败即引擎已被销毁，判
//! `DownloadFailed`；标志已置即判 `Cancelled`。

use std::sync::Weak;

use reqwest::Client;

use crate::internal::transfer::structs::chunk_range::ChunkRange;
use crate::internal::transfer::structs::download_outcome::DownloadOutcome;
use crate::internal::transfer::structs::engine_state::EngineState;
use crate::internal::transfer::structs::memory_download_result::MemoryDownloadResult;
use crate::internal::transfer::structs::probed_size::ProbedSize;
use crate::internal::transfer::structs::request_target::RequestTarget;
use crate::internal::transfer::structs::transfer_hooks_container::TransferHooksContainer;

use super::payload;
use super::probe;
use super::ranged::{self, RangedFetchParams};

/// 启动下载的参数（形参超过 3 个时用 struct 承载）。
pub(crate) struct DownloadParams<'a> {
    pub target: &'a RequestTarget,
    /// 单个分块的体积上限；<= 0 时放弃分块方案
    pub max_chunk_size: i64,
    /// 为 true 时跳过探测，直接整体拉取
    pub force_by_payload: bool,
}

/// 驱动完整的下载状态机。
pub(crate) async fn run_download(
    client: &Client,
    state: &Weak<EngineState>,
    params: DownloadParams<'_>,
    hooks: &mut TransferHooksContainer,
) -> DownloadOutcome {
    let target = params.target;

    let Some(strong) = state.upgrade() else {
        return destroyed(target.url());
    };
    if strong.is_cancelled() {
        tracing::warn!("对 {} 的下载已被取消", target.url());
        return DownloadOutcome::of(MemoryDownloadResult::Cancelled);
    }

    if hooks.run_before_start().await.is_err() {
        tracing::warn!("对 {} 的下载被钩子中止", target.url());
        return DownloadOutcome::of(MemoryDownloadResult::DownloadFailed);
    }

    if params.force_by_payload {
        drop(strong);
        return fallback_by_payload(client, state, target, hooks).await;
    }

    let probed = probe::probe_content_size(client, &strong, target).await;
    drop(strong);

    let Some(strong) = state.upgrade() else {
        return destroyed(target.url());
    };
    if strong.is_cancelled() {
        tracing::warn!("对 {} 的下载已被取消", target.url());
        return DownloadOutcome::of(MemoryDownloadResult::Cancelled);
    }

    let content_size = match probed {
        ProbedSize::NotModified => {
            return DownloadOutcome::of(MemoryDownloadResult::NotModified);
        }
        ProbedSize::Unknown => {
            tracing::warn!("无法得知 {} 的体积，改用整体拉取", target.url());
            drop(strong);
            return fallback_by_payload(client, state, target, hooks).await;
        }
        ProbedSize::Size(size) => size,
    };

    if params.max_chunk_size <= 0 {
        tracing::error!(
            "对 {} 的分块下载不可行: max_chunk_size 为 {}，改用整体拉取",
            target.url(),
            params.max_chunk_size
        );
        drop(strong);
        return fallback_by_payload(client, state, target, hooks).await;
    }

    // 规划：预分配目标缓冲；成功路径上每个字节都会被分块覆盖
    tracing::debug!("为 {} 预分配 {} 字节", target.url(), content_size);
    let mut buffer = vec![0u8; content_size as usize];
    let mut offset: i64 = 0;
    let mut range = ChunkRange::first(params.max_chunk_size, content_size);
    // 一旦有分块写入缓冲，后续失败只能直接上抛，不能再与整体结果混拼
    let mut chunk_delivered = false;
    let mut strong = strong;

    loop {
        let fetched = ranged::fetch_range(
            client,
            &strong,
            RangedFetchParams {
                target,
                total_size: content_size,
                range,
            },
            hooks,
        )
        .await;
        drop(strong);

        let Some(upgraded) = state.upgrade() else {
            return destroyed(target.url());
        };
        strong = upgraded;
        if strong.is_cancelled() {
            tracing::warn!("对 {} 的下载已被取消", target.url());
            return DownloadOutcome::with_headers(MemoryDownloadResult::Cancelled, fetched.headers);
        }

        match fetched.result {
            MemoryDownloadResult::Cancelled => {
                return DownloadOutcome::with_headers(
                    MemoryDownloadResult::Cancelled,
                    fetched.headers,
                );
            }
            MemoryDownloadResult::NotModified => {
                return DownloadOutcome::with_headers(
                    MemoryDownloadResult::NotModified,
                    fetched.headers,
                );
            }
            MemoryDownloadResult::Success => {
                let len = fetched.data.len() as i64;
                if offset < 0 || offset >= content_size || offset + len > content_size {
                    tracing::error!(
                        "对 {} 的分块越界 (offset {}, len {}, 体积 {})，改用整体拉取",
                        target.url(),
                        offset,
                        len,
                        content_size
                    );
                    break;
                }

                buffer[offset as usize..(offset + len) as usize].copy_from_slice(&fetched.data);
                chunk_delivered = true;
                hooks.run_on_chunk(&fetched.data);

                if offset + len >= content_size {
                    hooks.run_after_complete().await;
                    return DownloadOutcome {
                        result: MemoryDownloadResult::Success,
                        data: buffer,
                        headers: fetched.headers,
                    };
                }

                offset += len;
                range = ChunkRange::next_from(offset, params.max_chunk_size, content_size);
            }
            // 分块拉取不会产出 SucceededByPayload；若出现按失败处理
            MemoryDownloadResult::SucceededByPayload | MemoryDownloadResult::DownloadFailed => {
                if chunk_delivered {
                    tracing::error!(
                        "对 {} 的分块拉取失败，已丢弃部分缓冲",
                        target.url()
                    );
                    return DownloadOutcome::with_headers(
                        MemoryDownloadResult::DownloadFailed,
                        fetched.headers,
                    );
                }
                tracing::warn!("对 {} 的分块拉取失败，改用整体拉取", target.url());
                break;
            }
        }
    }

    drop(strong);
    fallback_by_payload(client, state, target, hooks).await
}

/// 整体拉取入口：2xx 在这条路径上以 `SucceededByPayload` 上抛，
/// 表示体积不可得或分块方案已被放弃。
async fn fallback_by_payload(
    client: &Client,
    state: &Weak<EngineState>,
    target: &RequestTarget,
    hooks: &mut TransferHooksContainer,
) -> DownloadOutcome {
    let Some(strong) = state.upgrade() else {
        return destroyed(target.url());
    };
    if strong.is_cancelled() {
        tracing::warn!("对 {} 的整体拉取已被取消", target.url());
        return DownloadOutcome::of(MemoryDownloadResult::Cancelled);
    }

    let mut outcome = payload::fetch_payload(client, &strong, target, hooks).await;
    drop(strong);

    let Some(strong) = state.upgrade() else {
        return destroyed(target.url());
    };
    if strong.is_cancelled() {
        tracing::warn!("对 {} 的整体拉取已被取消", target.url());
        return DownloadOutcome::with_headers(MemoryDownloadResult::Cancelled, outcome.headers);
    }
    drop(strong);

    if outcome.result == MemoryDownloadResult::Success {
        outcome.result = MemoryDownloadResult::SucceededByPayload;
        hooks.run_after_complete().await;
    }
    outcome
}

fn destroyed(url: &str) -> DownloadOutcome {
    tracing::warn!("下载 {} 失败: 引擎已被销毁", url);
    DownloadOutcome::of(MemoryDownloadResult::DownloadFailed)
}
