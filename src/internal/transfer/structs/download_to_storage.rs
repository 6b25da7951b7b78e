//! 下载并保存到本地存储的任务。
//!
//! 在内存下载之上叠加文件语义：URL/路径校验、父目录创建、落盘，
//! 各自有独立的失败标签。

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::internal::states::progress_state::ProgressState;
use crate::internal::transfer::engine::{ChunkDownloader, DEFAULT_MAX_CHUNK_SIZE};
use crate::internal::transfer::traits::transfer_hook::{HookAbort, TransferHook};

use super::hook_adapters::{
    AfterCompleteHookAdapter, BeforeStartHookAdapter, OnChunkHookAdapter, OnProgressHookAdapter,
};
use super::memory_download_result::MemoryDownloadResult;
use super::request_target::RequestTarget;
use super::storage_download_result::StorageDownloadResult;
use super::transfer_controller::TransferController;
use super::transfer_hooks_container::TransferHooksContainer;
use super::transfer_progress::TransferProgress;

/// 下载到本地存储的任务。内容先在内存中拼装完整，再一次性落盘。
pub struct DownloadToStorage {
    target: RequestTarget,
    save_path: PathBuf,
    max_chunk_size: i64,
    force_by_payload: bool,
    hooks: TransferHooksContainer,
    engine: ChunkDownloader,
    progress_state: ProgressState,
}

impl DownloadToStorage {
    pub fn new(url: impl Into<String>, save_path: impl AsRef<Path>) -> Self {
        Self {
            target: RequestTarget::new(url),
            save_path: save_path.as_ref().to_path_buf(),
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            force_by_payload: false,
            hooks: TransferHooksContainer::default(),
            engine: ChunkDownloader::new(),
            progress_state: ProgressState::default(),
        }
    }

    /// 设置单次请求的超时（秒）。负值矫正为 0。
    pub fn timeout(mut self, secs: f32) -> Self {
        self.target = self.target.timeout(secs);
        self
    }

    /// 设置 `Content-Type` 请求头；空字符串表示不携带。
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.target = self.target.content_type(content_type);
        self
    }

    /// 附加一个请求头；同名头（不区分大小写）会被替换。
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.target = self.target.header(name, value);
        self
    }

    /// 设置单个分块的体积上限（字节）；<= 0 时放弃分块方案，整体拉取。
    pub fn max_chunk_size(mut self, max_chunk_size: i64) -> Self {
        self.max_chunk_size = max_chunk_size;
        self
    }

    /// 跳过体积探测，直接整体拉取。
    pub fn force_by_payload(mut self, force: bool) -> Self {
        self.force_by_payload = force;
        self
    }

    /// 注册「开始前」钩子；闭包返回 `Err(HookAbort)` 会中止本次下载。
    pub fn with_before_start_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
    {
        self.hooks.add(BeforeStartHookAdapter(f));
        self
    }

    /// 注册「每个分块」钩子。
    pub fn with_on_chunk_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[u8]) + Send + Sync + 'static,
    {
        self.hooks.add(OnChunkHookAdapter(f));
        self
    }

    /// 注册「进度」钩子；参数为已传输字节数、总大小（未知时 <= 0）。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(i64, i64) + Send + Sync + 'static,
    {
        self.hooks.add(OnProgressHookAdapter(f));
        self
    }

    /// 注册「完成后」钩子；下载成功结束后调用。
    pub fn with_after_complete_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.hooks.add(AfterCompleteHookAdapter(f));
        self
    }

    /// 添加完整钩子。
    pub fn with_hook(mut self, hook: impl TransferHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 取消句柄。
    pub fn controller(&self) -> TransferController {
        self.engine.controller()
    }

    /// 内置的下载进度属性。
    pub fn progress(&self) -> ProgressState {
        self.progress_state.clone()
    }

    /// 执行下载并落盘。
    pub async fn send(mut self) -> StorageDownloadResult {
        if url::Url::parse(self.target.url()).is_err() {
            tracing::error!("保存下载失败: URL {:?} 无法解析", self.target.url());
            return StorageDownloadResult::InvalidUrl;
        }
        if self.save_path.as_os_str().is_empty() {
            tracing::error!("保存下载失败: 未提供保存路径");
            return StorageDownloadResult::InvalidSavePath;
        }

        let progress = self.progress_state.clone();
        self.hooks.add(OnProgressHookAdapter(move |bytes_done, total| {
            progress.update(TransferProgress { bytes_done, total });
        }));

        let outcome = self
            .engine
            .download(
                &self.target,
                self.max_chunk_size,
                self.force_by_payload,
                &mut self.hooks,
            )
            .await;

        let result = match outcome.result {
            MemoryDownloadResult::Success => StorageDownloadResult::Success,
            MemoryDownloadResult::SucceededByPayload => StorageDownloadResult::SucceededByPayload,
            MemoryDownloadResult::NotModified => return StorageDownloadResult::NotModified,
            MemoryDownloadResult::Cancelled => return StorageDownloadResult::Cancelled,
            MemoryDownloadResult::DownloadFailed => return StorageDownloadResult::DownloadFailed,
        };

        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    tracing::error!("创建目录 {} 失败: {}", parent.display(), e);
                    return StorageDownloadResult::DirectoryCreationFailed;
                }
            }
        }

        if let Err(e) = tokio::fs::write(&self.save_path, &outcome.data).await {
            tracing::error!("写入文件 {} 失败: {}", self.save_path.display(), e);
            return StorageDownloadResult::SaveFailed;
        }

        tracing::debug!(
            "已保存 {} 字节到 {}",
            outcome.data.len(),
            self.save_path.display()
        );
        result
    }
}
