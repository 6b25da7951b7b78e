//! 进度属性测试：watch 监听、快照读取、销毁语义，以及任务进度联动。

use crate::states::progress::ProgressState;
use crate::tests::support::TestServer;
use crate::transfer::{DownloadToMemory, MemoryDownloadResult, TransferProgress};

#[test]
fn pct_is_nan_when_total_unknown() {
    let progress = TransferProgress {
        bytes_done: 100,
        total: 0,
    };
    assert!(progress.pct().is_nan(), "总大小未知时百分比应为 NAN");

    let progress = TransferProgress {
        bytes_done: 250,
        total: 1_000,
    };
    assert!((progress.pct() - 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn watcher_receives_updates() {
    let state = ProgressState::default();
    let mut watcher = state.watch();

    state.update(TransferProgress {
        bytes_done: 42,
        total: 100,
    });

    let seen = watcher.changed().await.expect("应收到更新");
    assert_eq!(seen.bytes_done, 42);
    assert_eq!(seen.total, 100);
    assert_eq!(state.get_current().bytes_done, 42);
}

#[tokio::test]
async fn watcher_errors_after_state_dropped() {
    let state = ProgressState::default();
    let mut watcher = state.watch();
    drop(state);

    assert!(watcher.changed().await.is_err(), "写端全部销毁后应报错");
}

#[tokio::test]
async fn task_progress_reaches_total_after_send() {
    let body: Vec<u8> = (0..50_000).map(|i| (i % 251) as u8).collect();
    let server = TestServer::start(body);

    let task = DownloadToMemory::new(server.url()).max_chunk_size(16_384);
    let progress = task.progress();
    let outcome = task.send().await;

    assert_eq!(outcome.result, MemoryDownloadResult::Success);
    let last = progress.get_current();
    assert_eq!(last.bytes_done, 50_000, "任务进度属性应推进到总大小");
    assert_eq!(last.total, 50_000);
}
