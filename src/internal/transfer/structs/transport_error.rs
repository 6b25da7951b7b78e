//! 传输层错误：连接层面的失败，不含 HTTP 状态码分类。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// 请求无法送出或连接中断。
    #[error("HTTP 请求失败: {0}")]
    Wire(#[from] reqwest::Error),

    /// 在途请求被 cancel() 中止。
    #[error("请求已被中止")]
    Aborted,
}
