//! 下载到内存的结果标签。

/// 下载到内存的最终结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryDownloadResult {
    /// 分块路径全部完成
    Success,
    /// 无法得知体积或分块路径被放弃，最终由整体请求完成
    SucceededByPayload,
    /// 服务端返回 `304 Not Modified`（常配合 `If-None-Match` 使用）
    NotModified,
    /// 被 cancel() 取消
    Cancelled,
    /// 传输失败、协议失败或前置条件不满足
    DownloadFailed,
}
