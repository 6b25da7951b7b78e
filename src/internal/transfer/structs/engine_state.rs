//! 引擎共享状态：取消标志 + 在途请求的中止通知。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::futures::Notified;
use tokio::sync::Notify;

/// 单次传输操作的共享状态。
///
/// 取消标志单调：false → true，从不复位。写者是 `cancel()` 的调用方，
/// 读者是各续延；没有任何字段依赖该标志与其他写入的观察顺序，Relaxed 足够。
///
/// 编排器持有 `Weak<EngineState>` 并在每个恢复点升级；传输适配器只在单个
/// 请求在途期间持有强引用（自留引用在请求结束时释放）。
#[derive(Debug, Default)]
pub struct EngineState {
    cancelled: AtomicBool,
    abort: Notify,
}

impl EngineState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 置取消标志并唤醒在途请求。幂等。
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.abort.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// 中止通知的等待句柄；配合 `enable()` + 标志检查使用以避免错过唤醒。
    pub(crate) fn abort_notified(&self) -> Notified<'_> {
        self.abort.notified()
    }
}
