//! 下载到内存的任务。
//!
//! 使用方式：`DownloadToMemory::new(url).timeout(30.0).max_chunk_size(n).send().await`，
//! 可链式注册钩子；`controller()` 取得取消句柄，`progress()` 取得进度属性。

use std::future::Future;

use crate::internal::states::progress_state::ProgressState;
use crate::internal::transfer::engine::{ChunkDownloader, DEFAULT_MAX_CHUNK_SIZE};
use crate::internal::transfer::traits::transfer_hook::{HookAbort, TransferHook};

use super::download_outcome::DownloadOutcome;
use super::hook_adapters::{
    AfterCompleteHookAdapter, BeforeStartHookAdapter, OnChunkHookAdapter, OnProgressHookAdapter,
};
use super::request_target::RequestTarget;
use super::transfer_controller::TransferController;
use super::transfer_hooks_container::TransferHooksContainer;
use super::transfer_progress::TransferProgress;

/// 下载到内存的任务：探测体积后分块拉取，体积不可得时整体拉取。
///
/// 一个任务只执行一次；`send()` 消耗任务并返回完整产出。
pub struct DownloadToMemory {
    target: RequestTarget,
    max_chunk_size: i64,
    force_by_payload: bool,
    hooks: TransferHooksContainer,
    engine: ChunkDownloader,
    progress_state: ProgressState,
}

impl DownloadToMemory {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            target: RequestTarget::new(url),
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

    /// 跳过体积探测，直接整体拉取（适配不支持 `Content-Length` 的服务端）。
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

    /// 注册「每个分块」钩子；参数为写入缓冲的分块字节。
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

    /// 添加完整钩子，在下载各阶段插入逻辑。
    pub fn with_hook(mut self, hook: impl TransferHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 取消句柄；可克隆并移交给其他任务，`send()` 之后依然有效。
    pub fn controller(&self) -> TransferController {
        self.engine.controller()
    }

    /// 内置的下载进度属性；`.watch()` 后 `changed().await` 监听进度。
    pub fn progress(&self) -> ProgressState {
        self.progress_state.clone()
    }

    /// 执行下载。结果标签、数据与响应头一并返回。
    pub async fn send(mut self) -> DownloadOutcome {
        let progress = self.progress_state.clone();
        self.hooks.add(OnProgressHookAdapter(move |bytes_done, total| {
            progress.update(TransferProgress { bytes_done, total });
        }));

        self.engine
            .download(
                &self.target,
                self.max_chunk_size,
                self.force_by_payload,
                &mut self.hooks,
            )
            .await
    }
}
