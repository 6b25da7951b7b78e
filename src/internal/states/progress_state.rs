//! # ProgressState — 传输进度的响应式属性
//!
//! 基于 [`tokio::sync::watch`] 的轻量通知容器：任务内部高频写入进度，
//! 外部通过 `watch()` 拿到监听器后 `changed().await` 异步跟踪。
//! 读写均不加锁，适合进度条这类高频更新场景。

use thiserror::Error;
use tokio::sync::watch;

use crate::internal::transfer::structs::transfer_progress::TransferProgress;

/// 进度属性已无存活的写端。
#[derive(Debug, Error)]
#[error("进度属性已被销毁")]
pub struct ProgressClosed;

/// 传输进度的响应式属性（可共享句柄）。
///
/// 克隆共享同一份状态；所有克隆与所属任务被丢弃后，监听器的
/// `changed()` 返回 [`ProgressClosed`]。
#[derive(Debug, Clone)]
pub struct ProgressState {
    sender: std::sync::Arc<watch::Sender<TransferProgress>>,
    receiver: watch::Receiver<TransferProgress>,
}

impl ProgressState {
    pub fn new(initial: TransferProgress) -> Self {
        let (sender, receiver) = watch::channel(initial);
        Self {
            sender: std::sync::Arc::new(sender),
            receiver,
        }
    }

    /// 更新进度，所有监听者都会收到通知。
    pub fn update(&self, progress: TransferProgress) {
        self.sender.send_replace(progress);
    }

    /// 当前进度快照。
    pub fn get_current(&self) -> TransferProgress {
        *self.receiver.borrow()
    }

    /// 创建一个监听器，用于异步跟踪进度变化。
    pub fn watch(&self) -> ProgressWatcher {
        ProgressWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new(TransferProgress::default())
    }
}

/// 进度监听器。
pub struct ProgressWatcher {
    receiver: watch::Receiver<TransferProgress>,
}

impl ProgressWatcher {
    /// 异步等待进度变化，返回新值。
    pub async fn changed(&mut self) -> Result<TransferProgress, ProgressClosed> {
        self.receiver.changed().await.map_err(|_| ProgressClosed)?;
        Ok(*self.receiver.borrow())
    }

    /// 同步读取当前值。
    pub fn current(&self) -> TransferProgress {
        *self.receiver.borrow()
    }
}
