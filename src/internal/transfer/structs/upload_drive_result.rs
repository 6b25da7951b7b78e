//! 上传驱动的结果标签。

/// 引擎层上传（`PUT`）的最终结果。
///
/// 注意与下载不对称：上传只接受状态码恰为 `200`，其余 2xx 一律视为失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadDriveResult {
    Success,
    Cancelled,
    UploadFailed,
}
