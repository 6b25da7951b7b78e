use crate::internal::transfer::traits::transfer_hook::{HookAbort, TransferHook};

/// 钩子容器：按注册顺序依次执行多个钩子。
///
/// 取消标志不在这里——它属于
/// [`EngineState`](super::engine_state::EngineState)，由控制句柄写入。
#[derive(Default)]
pub struct TransferHooksContainer {
    hooks: Vec<Box<dyn TransferHook>>,
}

impl TransferHooksContainer {
    /// 添加一个钩子；可多次调用注册多个。
    pub fn add(&mut self, hook: impl TransferHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub async fn run_before_start(&mut self) -> Result<(), HookAbort> {
        for h in self.hooks.iter_mut() {
            h.before_start().await?;
        }
        Ok(())
    }

    pub fn run_on_chunk(&mut self, chunk: &[u8]) {
        for h in self.hooks.iter_mut() {
            h.on_chunk(chunk);
        }
    }

    pub fn run_on_progress(&mut self, bytes_done: i64, total: i64) {
        for h in self.hooks.iter_mut() {
            h.on_progress(bytes_done, total);
        }
    }

    pub async fn run_after_complete(&mut self) {
        for h in self.hooks.iter_mut() {
            h.after_complete().await;
        }
    }
}
