//! 传输控制句柄：从任意任务取消在途传输。

use std::sync::Arc;

use super::engine_state::EngineState;

/// 可克隆的取消句柄，与一次传输的引擎状态绑定。
///
/// `cancel()` 幂等：置标志并中止在途请求；已经送达的结果不会被回改，
/// 尚未送达的结果只会是 `Cancelled` 或失败，绝不会是成功。
#[derive(Debug, Clone)]
pub struct TransferController {
    state: Arc<EngineState>,
}

impl TransferController {
    pub(crate) fn new(state: Arc<EngineState>) -> Self {
        Self { state }
    }

    pub fn cancel(&self) {
        self.state.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.is_cancelled()
    }
}
