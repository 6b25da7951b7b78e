//! 上传驱动测试：状态码严格性、请求体完整性、发送进度、在途取消。

use std::sync::{Arc, Mutex};

use crate::engine::{ChunkDownloader, RequestTarget, TransferHooksContainer, UploadDriveResult};
use crate::internal::transfer::structs::hook_adapters::OnProgressHookAdapter;
use crate::tests::support::{ServerOptions, TestServer};

#[tokio::test]
async fn upload_of_1kib_body_succeeds_on_200() {
    let server = TestServer::start(Vec::new());

    let engine = ChunkDownloader::new();
    let mut hooks = TransferHooksContainer::default();
    let body = vec![7u8; 1024];
    let result = engine
        .upload(&RequestTarget::new(server.url()), body.clone(), &mut hooks)
        .await;

    assert_eq!(result, UploadDriveResult::Success);
    assert_eq!(server.put_bodies(), vec![body], "服务端应收到完整请求体");
}

#[tokio::test]
async fn upload_fails_on_500() {
    let server = TestServer::start_with_options(
        Vec::new(),
        ServerOptions {
            put_status: 500,
            ..Default::default()
        },
    );

    let engine = ChunkDownloader::new();
    let mut hooks = TransferHooksContainer::default();
    let result = engine
        .upload(&RequestTarget::new(server.url()), vec![7u8; 1024], &mut hooks)
        .await;

    assert_eq!(result, UploadDriveResult::UploadFailed);
}

#[tokio::test]
async fn upload_rejects_201_created() {
    // 下载接受整个 2xx，上传只接受恰为 200
    let server = TestServer::start_with_options(
        Vec::new(),
        ServerOptions {
            put_status: 201,
            ..Default::default()
        },
    );

    let engine = ChunkDownloader::new();
    let mut hooks = TransferHooksContainer::default();
    let result = engine
        .upload(&RequestTarget::new(server.url()), vec![7u8; 1024], &mut hooks)
        .await;

    assert_eq!(result, UploadDriveResult::UploadFailed, "201 也应判上传失败");
}

#[tokio::test]
async fn upload_progress_reaches_body_length() {
    let server = TestServer::start(Vec::new());

    let calls: Arc<Mutex<Vec<(i64, i64)>>> = Arc::new(Mutex::new(Vec::new()));
    let calls_c = Arc::clone(&calls);

    let engine = ChunkDownloader::new();
    let mut hooks = TransferHooksContainer::default();
    hooks.add(OnProgressHookAdapter(move |sent, total| {
        calls_c.lock().unwrap().push((sent, total));
    }));

    let body = vec![3u8; 200_000];
    let result = engine
        .upload(&RequestTarget::new(server.url()), body, &mut hooks)
        .await;

    assert_eq!(result, UploadDriveResult::Success);
    let calls = calls.lock().unwrap();
    assert!(!calls.is_empty(), "发送进度至少应回调一次");
    let mut prev = 0i64;
    for &(sent, total) in calls.iter() {
        assert!(sent >= prev, "发送进度应单调不减");
        assert_eq!(total, 200_000, "总大小应为请求体长度");
        prev = sent;
    }
    assert_eq!(calls.last().unwrap().0, 200_000, "最后一次进度应到达请求体长度");
}

#[tokio::test]
async fn upload_cancel_mid_flight_yields_cancelled() {
    let server = TestServer::start_with_options(
        Vec::new(),
        ServerOptions {
            response_delay_ms: 800,
            ..Default::default()
        },
    );

    let engine = Arc::new(ChunkDownloader::new());
    let controller = engine.controller();
    let url = server.url();
    let handle = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move {
            let mut hooks = TransferHooksContainer::default();
            engine
                .upload(&RequestTarget::new(url), vec![9u8; 4096], &mut hooks)
                .await
        }
    });

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    controller.cancel();

    let result = handle.await.expect("任务不应 panic");
    assert_eq!(result, UploadDriveResult::Cancelled);
}
