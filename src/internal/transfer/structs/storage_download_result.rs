//! 下载到本地存储的结果标签。

/// 下载并落盘的最终结果；在内存下载标签之上叠加文件语义。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageDownloadResult {
    Success,
    /// 下载成功，但走的是整体请求路径（响应缺少 `Content-Length` 等）
    SucceededByPayload,
    NotModified,
    Cancelled,
    DownloadFailed,
    /// 内容已取回，但写入目标文件失败
    SaveFailed,
    /// 保存路径的父目录无法创建
    DirectoryCreationFailed,
    /// URL 为空或无法解析
    InvalidUrl,
    /// 保存路径为空
    InvalidSavePath,
}
