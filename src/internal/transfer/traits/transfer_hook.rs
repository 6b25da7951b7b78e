//! 传输流程钩子 trait，供下载/上传任务调用。

use async_trait::async_trait;

/// 钩子在 `before_start` 中请求中止传输时使用的错误。
#[derive(Debug, Clone)]
pub struct HookAbort;

impl std::fmt::Display for HookAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("传输被钩子中止")
    }
}

impl std::error::Error for HookAbort {}

/// 传输流程钩子：在「开始前 / 每个分块 / 进度 / 完成后」插入自定义逻辑。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用任务上的 `with_before_start_hook` / `with_on_chunk_hook` /
///   `with_on_progress_hook` / `with_after_complete_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过任务的 `with_hook` 注册。
#[async_trait]
pub trait TransferHook: Send + Sync {
    /// 传输开始前调用。返回 `Err` 则中止本次传输。
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        Ok(())
    }

    /// 每个分块写入目标缓冲后调用。`chunk` 为该分块的字节；
    /// 整体请求与上传路径不产生分块，不会触发。
    fn on_chunk(&mut self, _chunk: &[u8]) {}

    /// 进度更新（已传输字节、总大小）。`total <= 0` 表示总大小未知。
    fn on_progress(&mut self, _bytes_done: i64, _total: i64) {}

    /// 传输成功结束后调用。
    async fn after_complete(&mut self) {}
}
