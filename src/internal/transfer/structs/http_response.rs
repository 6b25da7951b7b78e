//! 传输层响应：状态码 + 响应头列表 + 服务端报告的长度 + 响应体。

/// 单次 HTTP 请求的响应快照。
///
/// 3xx/4xx/5xx 在这一层都是"成功送达的响应"，由上层按状态码归类；
/// 只有连接层面的失败才会走 [`super::transport_error::TransportError`]。
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    /// HTTP 状态码
    pub status: u16,
    /// 响应头，逐条渲染为 `Name: Value`
    pub headers: Vec<String>,
    /// 服务端报告的 `Content-Length`；缺失时为 -1
    pub content_length: i64,
    /// 响应体字节
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// 状态码是否属于 2xx。
    pub fn is_2xx(&self) -> bool {
        self.status / 100 == 2
    }
}
