//! 从本地存储读取文件并上传的任务。

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::internal::states::progress_state::ProgressState;
use crate::internal::transfer::engine::ChunkDownloader;
use crate::internal::transfer::traits::transfer_hook::{HookAbort, TransferHook};

use super::hook_adapters::{
    AfterCompleteHookAdapter, BeforeStartHookAdapter, OnProgressHookAdapter,
};
use super::request_target::RequestTarget;
use super::storage_upload_result::StorageUploadResult;
use super::transfer_controller::TransferController;
use super::transfer_hooks_container::TransferHooksContainer;
use super::transfer_progress::TransferProgress;
use super::upload_drive_result::UploadDriveResult;

/// 从本地文件上传的任务：整个文件读进内存后以 `PUT` 一次送出。
pub struct UploadFromStorage {
    target: RequestTarget,
    source_path: PathBuf,
    hooks: TransferHooksContainer,
    engine: ChunkDownloader,
    progress_state: ProgressState,
}

impl UploadFromStorage {
    pub fn new(url: impl Into<String>, source_path: impl AsRef<Path>) -> Self {
        Self {
            target: RequestTarget::new(url),
            source_path: source_path.as_ref().to_path_buf(),
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

    /// 注册「开始前」钩子；闭包返回 `Err(HookAbort)` 会中止本次上传。
    pub fn with_before_start_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
    {
        self.hooks.add(BeforeStartHookAdapter(f));
        self
    }

    /// 注册「进度」钩子；参数为已发送字节数、请求体总长。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(i64, i64) + Send + Sync + 'static,
    {
        self.hooks.add(OnProgressHookAdapter(f));
        self
    }

    /// 注册「完成后」钩子；上传成功结束后调用。
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

    /// 内置的上传进度属性。
    pub fn progress(&self) -> ProgressState {
        self.progress_state.clone()
    }

    /// 读取源文件并执行上传。
    pub async fn send(mut self) -> StorageUploadResult {
        if url::Url::parse(self.target.url()).is_err() {
            tracing::error!("上传失败: URL {:?} 无法解析", self.target.url());
            return StorageUploadResult::InvalidUrl;
        }
        if self.source_path.as_os_str().is_empty() {
            tracing::error!("上传失败: 未提供源文件路径");
            return StorageUploadResult::InvalidPath;
        }

        let body = match tokio::fs::read(&self.source_path).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("读取文件 {} 失败: {}", self.source_path.display(), e);
                return StorageUploadResult::LoadFailed;
            }
        };

        let progress = self.progress_state.clone();
        self.hooks.add(OnProgressHookAdapter(move |bytes_done, total| {
            progress.update(TransferProgress { bytes_done, total });
        }));

        match self.engine.upload(&self.target, body, &mut self.hooks).await {
            UploadDriveResult::Success => StorageUploadResult::Success,
            UploadDriveResult::Cancelled => StorageUploadResult::Cancelled,
            UploadDriveResult::UploadFailed => StorageUploadResult::UploadFailed,
        }
    }
}
