//! 体积探测结果。

/// `HEAD` 探测的归类结果，仅供编排器消费。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbedSize {
    /// 服务端返回 `304 Not Modified`
    NotModified,
    /// 请求失败、非 2xx 或 `Content-Length` 缺失/非正
    Unknown,
    /// 2xx 且 `Content-Length` 为正
    Size(i64),
}
