//! 传输引擎：分块下载状态机与整体上传驱动。
//!
//! 引擎实例按操作创建：一次下载或一次上传用一个
//! [`ChunkDownloader`]，结果送达后即可丢弃。取消通过
//! [`controller()`](ChunkDownloader::controller) 拿到的句柄从任意任务发起。
//!
//! 状态机（见 [`download`] 模块）：探测 → 规划 → 串行分块 → 拼装，
//! 体积不可得或分块方案失败时退回整体拉取。

pub(crate) mod download;
pub(crate) mod payload;
pub(crate) mod probe;
pub(crate) mod ranged;
pub(crate) mod transport;
pub(crate) mod upload;

use std::sync::Arc;

use reqwest::Client;

use crate::internal::transfer::structs::download_outcome::DownloadOutcome;
use crate::internal::transfer::structs::engine_state::EngineState;
use crate::internal::transfer::structs::request_target::RequestTarget;
use crate::internal::transfer::structs::transfer_controller::TransferController;
use crate::internal::transfer::structs::transfer_hooks_container::TransferHooksContainer;
use crate::internal::transfer::structs::upload_drive_result::UploadDriveResult;

use self::download::DownloadParams;

/// 默认单个分块的体积上限（4MB）。
pub const DEFAULT_MAX_CHUNK_SIZE: i64 = 4 * 1024 * 1024;

/// 单次传输操作的引擎。
///
/// 不实现 Clone：一个引擎只承载一次操作，取消语义也绑定在这一次上。
/// 需要从别处取消时克隆 [`TransferController`]。
pub struct ChunkDownloader {
    client: Client,
    state: Arc<EngineState>,
}

impl ChunkDownloader {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// 复用外部构建的 HTTP 客户端（连接池、TLS 等配置随客户端走）。
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            state: EngineState::new(),
        }
    }

    /// 取消句柄；可克隆并移交给其他任务。
    pub fn controller(&self) -> TransferController {
        TransferController::new(Arc::clone(&self.state))
    }

    /// 取消当前操作：置标志并中止在途请求。幂等。
    pub fn cancel(&self) {
        self.state.cancel();
    }

    /// 把资源下载进内存缓冲。
    ///
    /// `max_chunk_size <= 0` 或体积不可得时退回整体拉取；
    /// `force_by_payload` 为 true 时跳过探测直接整体拉取。
    pub async fn download(
        &self,
        target: &RequestTarget,
        max_chunk_size: i64,
        force_by_payload: bool,
        hooks: &mut TransferHooksContainer,
    ) -> DownloadOutcome {
        let weak = Arc::downgrade(&self.state);
        download::run_download(
            &self.client,
            &weak,
            DownloadParams {
                target,
                max_chunk_size,
                force_by_payload,
            },
            hooks,
        )
        .await
    }

    /// 把整个请求体上传到目标 URL（`PUT`）。
    pub async fn upload(
        &self,
        target: &RequestTarget,
        body: Vec<u8>,
        hooks: &mut TransferHooksContainer,
    ) -> UploadDriveResult {
        let weak = Arc::downgrade(&self.state);
        upload::run_upload(&self.client, &weak, target, body, hooks).await
    }
}

impl Default for ChunkDownloader {
    fn default() -> Self {
        Self::new()
    }
}
