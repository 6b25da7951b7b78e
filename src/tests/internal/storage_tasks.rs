//! 存储任务测试：落盘、目录创建、各类校验失败标签、从文件上传。

use tempfile::tempdir;

use crate::tests::support::{HeadMode, ServerOptions, TestServer};
use crate::transfer::{
    DownloadToStorage, StorageDownloadResult, StorageUploadResult, UploadFromStorage,
};

fn deterministic_body(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn storage_download_saves_file_and_creates_dirs() {
    let body = deterministic_body(10_000);
    let server = TestServer::start(body.clone());

    let dir = tempdir().expect("创建临时目录失败");
    let save_path = dir.path().join("a").join("b").join("out.bin");

    let result = DownloadToStorage::new(server.url(), &save_path).send().await;

    assert_eq!(result, StorageDownloadResult::Success);
    let saved = std::fs::read(&save_path).expect("文件应已保存");
    assert_eq!(saved, body, "落盘内容应与服务端一致");
}

#[tokio::test]
async fn storage_download_relabels_payload_success() {
    let body = deterministic_body(500);
    let server = TestServer::start_with_options(
        body.clone(),
        ServerOptions {
            head: HeadMode::MissingLength,
            ..Default::default()
        },
    );

    let dir = tempdir().expect("创建临时目录失败");
    let save_path = dir.path().join("out.bin");

    let result = DownloadToStorage::new(server.url(), &save_path).send().await;

    assert_eq!(result, StorageDownloadResult::SucceededByPayload);
    assert_eq!(std::fs::read(&save_path).unwrap(), body);
}

#[tokio::test]
async fn storage_download_invalid_url() {
    let dir = tempdir().expect("创建临时目录失败");
    let result = DownloadToStorage::new("这不是 URL", dir.path().join("out.bin"))
        .send()
        .await;
    assert_eq!(result, StorageDownloadResult::InvalidUrl);
}

#[tokio::test]
async fn storage_download_empty_save_path() {
    let server = TestServer::start(deterministic_body(10));
    let result = DownloadToStorage::new(server.url(), "").send().await;
    assert_eq!(result, StorageDownloadResult::InvalidSavePath);
}

#[tokio::test]
async fn storage_download_dir_creation_failure() {
    let body = deterministic_body(100);
    let server = TestServer::start(body);

    let dir = tempdir().expect("创建临时目录失败");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"occupied").expect("写占位文件失败");

    // 父路径中有同名普通文件，目录无法创建
    let save_path = blocker.join("sub").join("out.bin");
    let result = DownloadToStorage::new(server.url(), save_path).send().await;

    assert_eq!(result, StorageDownloadResult::DirectoryCreationFailed);
}

#[tokio::test]
async fn storage_download_save_failure() {
    let body = deterministic_body(100);
    let server = TestServer::start(body);

    // 保存路径本身是个已存在的目录，写入必然失败
    let dir = tempdir().expect("创建临时目录失败");
    let result = DownloadToStorage::new(server.url(), dir.path()).send().await;

    assert_eq!(result, StorageDownloadResult::SaveFailed);
}

#[tokio::test]
async fn storage_download_not_modified_writes_nothing() {
    let server = TestServer::start_with_options(
        deterministic_body(100),
        ServerOptions {
            head: HeadMode::NotModified,
            ..Default::default()
        },
    );

    let dir = tempdir().expect("创建临时目录失败");
    let save_path = dir.path().join("out.bin");
    let result = DownloadToStorage::new(server.url(), &save_path).send().await;

    assert_eq!(result, StorageDownloadResult::NotModified);
    assert!(!save_path.exists(), "304 时不应产生文件");
}

#[tokio::test]
async fn upload_from_storage_round_trip() {
    let server = TestServer::start(Vec::new());

    let dir = tempdir().expect("创建临时目录失败");
    let source = dir.path().join("payload.bin");
    let body = deterministic_body(30_000);
    std::fs::write(&source, &body).expect("写源文件失败");

    let result = UploadFromStorage::new(server.url(), &source).send().await;

    assert_eq!(result, StorageUploadResult::Success);
    assert_eq!(server.put_bodies(), vec![body], "服务端应收到完整文件内容");
}

#[tokio::test]
async fn upload_from_storage_missing_file() {
    let server = TestServer::start(Vec::new());
    let dir = tempdir().expect("创建临时目录失败");

    let result = UploadFromStorage::new(server.url(), dir.path().join("不存在.bin"))
        .send()
        .await;

    assert_eq!(result, StorageUploadResult::LoadFailed);
    assert!(server.requests().is_empty(), "读不到源文件时不应发请求");
}

#[tokio::test]
async fn upload_from_storage_invalid_inputs() {
    let dir = tempdir().expect("创建临时目录失败");
    let source = dir.path().join("payload.bin");
    std::fs::write(&source, b"x").expect("写源文件失败");

    let result = UploadFromStorage::new("这不是 URL", &source).send().await;
    assert_eq!(result, StorageUploadResult::InvalidUrl);

    let result = UploadFromStorage::new("http://127.0.0.1:9/void", "").send().await;
    assert_eq!(result, StorageUploadResult::InvalidPath);
}
