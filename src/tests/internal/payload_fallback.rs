//! 整体拉取回退测试：体积不可得、服务端无视 Range、5xx、304 各条路径。

use crate::tests::support::{GetMode, HeadMode, ServerOptions, TestServer};
use crate::transfer::{DownloadToMemory, MemoryDownloadResult};

fn deterministic_body(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn missing_content_length_falls_back_to_payload() {
    let body = deterministic_body(500);
    let server = TestServer::start_with_options(
        body.clone(),
        ServerOptions {
            head: HeadMode::MissingLength,
            ..Default::default()
        },
    );

    let outcome = DownloadToMemory::new(server.url())
        .max_chunk_size(100)
        .send()
        .await;

    assert_eq!(outcome.result, MemoryDownloadResult::SucceededByPayload);
    assert_eq!(outcome.data, body, "整体拉取应取回全部 500 字节");
    assert_eq!(server.count("HEAD"), 1);
    assert!(server.ranged_gets().is_empty(), "体积不可得时不应发 Range 请求");
    assert_eq!(server.count("GET"), 1);
}

#[tokio::test]
async fn head_not_modified_short_circuits() {
    let body = deterministic_body(500);
    let server = TestServer::start_with_options(
        body,
        ServerOptions {
            head: HeadMode::NotModified,
            ..Default::default()
        },
    );

    let outcome = DownloadToMemory::new(server.url())
        .header("If-None-Match", "\"etag\"")
        .send()
        .await;

    assert_eq!(outcome.result, MemoryDownloadResult::NotModified);
    assert!(outcome.data.is_empty(), "304 不应返回任何字节");
    assert_eq!(server.count("GET"), 0, "304 之后不应再发 GET");
}

#[tokio::test]
async fn range_ignoring_server_falls_back_to_payload() {
    // 服务端无视 Range 返回 200 + 完整内容：Content-Length 与期望区间不符，
    // 放弃分块方案后由整体拉取完成
    let body = deterministic_body(1_000);
    let server = TestServer::start_with_options(
        body.clone(),
        ServerOptions {
            get: GetMode::IgnoreRange,
            ..Default::default()
        },
    );

    let outcome = DownloadToMemory::new(server.url())
        .max_chunk_size(300)
        .send()
        .await;

    assert_eq!(outcome.result, MemoryDownloadResult::SucceededByPayload);
    assert_eq!(outcome.data, body);
    assert_eq!(server.ranged_gets().len(), 1, "第一次 Range 失败后不应再试分块");
    assert_eq!(server.count("GET"), 2, "一次带 Range 的失败 + 一次整体拉取");
}

#[tokio::test]
async fn server_error_on_first_range_falls_back() {
    let body = deterministic_body(2_000);
    let server = TestServer::start_with_options(
        body.clone(),
        ServerOptions {
            get: GetMode::RangeFails(500),
            ..Default::default()
        },
    );

    let outcome = DownloadToMemory::new(server.url())
        .max_chunk_size(512)
        .send()
        .await;

    assert_eq!(outcome.result, MemoryDownloadResult::SucceededByPayload);
    assert_eq!(outcome.data, body);
}

#[tokio::test]
async fn ranged_not_modified_does_not_fall_back() {
    let body = deterministic_body(1_000);
    let server = TestServer::start_with_options(
        body,
        ServerOptions {
            get: GetMode::NotModified,
            ..Default::default()
        },
    );

    let outcome = DownloadToMemory::new(server.url())
        .max_chunk_size(300)
        .send()
        .await;

    assert_eq!(outcome.result, MemoryDownloadResult::NotModified);
    assert!(outcome.data.is_empty());
    assert_eq!(server.count("GET"), 1, "Range 请求收到 304 后不应改走整体拉取");
}

#[tokio::test]
async fn force_by_payload_skips_probe() {
    let body = deterministic_body(800);
    let server = TestServer::start(body.clone());

    let outcome = DownloadToMemory::new(server.url())
        .force_by_payload(true)
        .send()
        .await;

    assert_eq!(outcome.result, MemoryDownloadResult::SucceededByPayload);
    assert_eq!(outcome.data, body);
    assert_eq!(server.count("HEAD"), 0, "强制整体拉取时不应探测体积");
    assert!(server.ranged_gets().is_empty());
    assert_eq!(server.count("GET"), 1);
}

#[tokio::test]
async fn non_positive_max_chunk_size_downgrades_to_payload() {
    let body = deterministic_body(800);
    let server = TestServer::start(body.clone());

    let outcome = DownloadToMemory::new(server.url())
        .max_chunk_size(0)
        .send()
        .await;

    assert_eq!(outcome.result, MemoryDownloadResult::SucceededByPayload);
    assert_eq!(outcome.data, body);
    assert!(server.ranged_gets().is_empty());
}

#[tokio::test]
async fn empty_payload_body_fails() {
    let server = TestServer::start_with_options(
        Vec::new(),
        ServerOptions {
            head: HeadMode::MissingLength,
            ..Default::default()
        },
    );

    let outcome = DownloadToMemory::new(server.url()).send().await;

    assert_eq!(outcome.result, MemoryDownloadResult::DownloadFailed, "空响应体应判失败");
}

#[tokio::test]
async fn payload_progress_reports_received_bytes() {
    let body = deterministic_body(4_096);
    let server = TestServer::start(body.clone());

    let last = std::sync::Arc::new(std::sync::Mutex::new((0i64, 0i64)));
    let last_c = std::sync::Arc::clone(&last);

    let outcome = DownloadToMemory::new(server.url())
        .force_by_payload(true)
        .with_on_progress_hook(move |done, total| {
            *last_c.lock().unwrap() = (done, total);
        })
        .send()
        .await;

    assert_eq!(outcome.result, MemoryDownloadResult::SucceededByPayload);
    let (done, total) = *last.lock().unwrap();
    assert_eq!(done, 4_096, "最后一次进度应为响应体总长");
    assert_eq!(total, 4_096, "服务端报告了 Content-Length 时总大小随之");
}
