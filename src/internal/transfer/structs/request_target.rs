//! 传输目标：URL + 附加请求头 + Content-Type + 超时。

/// 一次传输的目标描述。
///
/// 请求头键不区分大小写（与 HTTP 语义一致），后设的同名头会覆盖先前的值。
/// 超时单位为秒；负值会被矫正为 0，0 表示交由传输层默认行为。
#[derive(Debug, Clone, Default)]
pub struct RequestTarget {
    url: String,
    headers: Vec<(String, String)>,
    content_type: String,
    timeout_secs: f32,
}

impl RequestTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 附加一个请求头；同名头（不区分大小写）会被替换。
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// 设置 `Content-Type` 请求头的值；空字符串表示不携带。
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// 设置单次请求的超时（秒）。负值矫正为 0。
    pub fn timeout(mut self, secs: f32) -> Self {
        if secs < 0.0 {
            tracing::warn!("超时 {} 秒小于 0，已矫正为 0", secs);
            self.timeout_secs = 0.0;
        } else {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn content_type_value(&self) -> &str {
        &self.content_type
    }

    pub fn timeout_secs(&self) -> f32 {
        self.timeout_secs
    }
}
