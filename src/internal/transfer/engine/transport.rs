//! 传输适配器：发出单个 HTTP 请求，流式收发并回报进度。
//!
//! 这一层只认连接层面的成败：3xx/4xx/5xx 都是"送达的响应"，
//! 状态码归类交给上层。取消通过 [`EngineState`] 的中止通知送达，
//! 在途请求会在下一个收发边界被掐断。

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client, Method};
use tokio::sync::mpsc;

use crate::internal::transfer::structs::engine_state::EngineState;
use crate::internal::transfer::structs::http_response::HttpResponse;
use crate::internal::transfer::structs::transport_error::TransportError;

/// 上传体分帧大小；每交出一帧回报一次发送进度。
const UPLOAD_FRAME_SIZE: usize = 64 * 1024;

/// 进度回调：(已发送字节, 已接收字节, 响应报告的 Content-Length，未知为 -1)。
pub(crate) type ProgressFn<'a> = &'a mut (dyn FnMut(i64, i64, i64) + Send);

/// 发起单个请求的参数（形参超过 3 个时用 struct 承载）。
pub(crate) struct HttpRequestParams<'a> {
    pub method: Method,
    pub url: &'a str,
    /// `Content-Type` 请求头的值；空字符串表示不携带
    pub content_type: &'a str,
    pub extra_headers: &'a [(String, String)],
    /// 请求体；`Some` 时以分帧流上送以便回报发送进度
    pub body: Option<Vec<u8>>,
    /// 单次请求超时（秒）；<= 0 表示交由客户端默认
    pub timeout_secs: f32,
}

/// 发出一个请求并完整读取响应体。
///
/// 返回 `Err(Aborted)` 表示请求被 cancel() 掐断；`Err(Wire)` 表示请求
/// 无法送出或连接中断。请求在途期间持有引擎状态的强引用。
pub(crate) async fn issue_request(
    client: &Client,
    state: &Arc<EngineState>,
    params: HttpRequestParams<'_>,
    on_progress: ProgressFn<'_>,
) -> Result<HttpResponse, TransportError> {
    let mut request = client.request(params.method, params.url);
    if params.timeout_secs > 0.0 {
        request = request.timeout(Duration::from_secs_f32(params.timeout_secs));
    }
    if !params.content_type.is_empty() {
        request = request.header(CONTENT_TYPE, params.content_type);
    }
    for (name, value) in params.extra_headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(n), Ok(v)) => request = request.header(n, v),
            _ => tracing::warn!("跳过非法请求头: {}", name),
        }
    }

    let mut sent_rx = None;
    if let Some(body) = params.body {
        let (with_body, rx) = attach_streaming_body(request, body);
        request = with_body;
        sent_rx = Some(rx);
    }

    // 先注册中止通知再检查标志，cancel() 不会在两者之间被错过。
    let aborted = state.abort_notified();
    tokio::pin!(aborted);
    aborted.as_mut().enable();
    if state.is_cancelled() {
        return Err(TransportError::Aborted);
    }

    let send_fut = request.send();
    tokio::pin!(send_fut);

    let mut bytes_sent: i64 = 0;
    let response = loop {
        tokio::select! {
            _ = aborted.as_mut() => return Err(TransportError::Aborted),
            sent = next_sent(&mut sent_rx) => {
                bytes_sent = sent;
                on_progress(bytes_sent, 0, -1);
            }
            resp = send_fut.as_mut() => break resp?,
        }
    };

    // 请求体已全部交给连接层；补发积压的发送进度。
    if let Some(rx) = sent_rx.as_mut() {
        while let Ok(sent) = rx.try_recv() {
            bytes_sent = sent;
            on_progress(bytes_sent, 0, -1);
        }
    }

    let status = response.status().as_u16();
    let headers = render_headers(&response);
    let content_length = reported_content_length(&response);

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    loop {
        tokio::select! {
            _ = aborted.as_mut() => return Err(TransportError::Aborted),
            frame = stream.next() => match frame {
                Some(Ok(frame)) => {
                    body.extend_from_slice(&frame);
                    on_progress(bytes_sent, body.len() as i64, content_length);
                }
                Some(Err(e)) => return Err(TransportError::Wire(e)),
                None => break,
            },
        }
    }

    Ok(HttpResponse {
        status,
        headers,
        content_length,
        body,
    })
}

/// 把请求体包装成分帧流：连接层每拉取一帧，向返回的通道推送累计发送量。
fn attach_streaming_body(
    request: reqwest::RequestBuilder,
    body: Vec<u8>,
) -> (reqwest::RequestBuilder, mpsc::UnboundedReceiver<i64>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let frames = futures_util::stream::unfold((body, 0usize), move |(body, offset)| {
        let tx = tx.clone();
        async move {
            if offset >= body.len() {
                return None;
            }
            let end = (offset + UPLOAD_FRAME_SIZE).min(body.len());
            let frame = body[offset..end].to_vec();
            let _ = tx.send(end as i64);
            Some((Ok::<_, std::io::Error>(frame), (body, end)))
        }
    });
    (request.body(Body::wrap_stream(frames)), rx)
}

/// 下一条发送进度；通道耗尽后永远挂起，让 select 只剩响应分支。
async fn next_sent(rx: &mut Option<mpsc::UnboundedReceiver<i64>>) -> i64 {
    loop {
        match rx {
            Some(inner) => match inner.recv().await {
                Some(sent) => return sent,
                None => *rx = None,
            },
            None => std::future::pending::<()>().await,
        }
    }
}

/// 响应头逐条渲染为 `Name: Value`。
fn render_headers(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .iter()
        .map(|(name, value)| format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())))
        .collect()
}

/// 服务端报告的 `Content-Length`；缺失或无法解析时为 -1。
fn reported_content_length(response: &reqwest::Response) -> i64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(-1)
}
