//! 从本地存储上传的结果标签。

/// 读取本地文件并上传的最终结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageUploadResult {
    Success,
    Cancelled,
    UploadFailed,
    /// 源文件读取失败
    LoadFailed,
    /// URL 为空或无法解析
    InvalidUrl,
    /// 源文件路径为空
    InvalidPath,
}
