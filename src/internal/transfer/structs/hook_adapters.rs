//! 单阶段钩子适配器：将闭包包装成 [`TransferHook`]，供 `with_xx_hook` 使用。

use std::future::Future;

use async_trait::async_trait;

use crate::internal::transfer::traits::transfer_hook::{HookAbort, TransferHook};

/// 仅实现「开始前」的钩子适配器。
pub(crate) struct BeforeStartHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> TransferHook for BeforeStartHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
{
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        (self.0)().await
    }
}

/// 仅实现「每个分块」的钩子适配器。
pub(crate) struct OnChunkHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> TransferHook for OnChunkHookAdapter<F>
where
    F: FnMut(&[u8]) + Send + Sync + 'static,
{
    fn on_chunk(&mut self, chunk: &[u8]) {
        (self.0)(chunk);
    }
}

/// 仅实现「进度」的钩子适配器。
pub(crate) struct OnProgressHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> TransferHook for OnProgressHookAdapter<F>
where
    F: FnMut(i64, i64) + Send + Sync + 'static,
{
    fn on_progress(&mut self, bytes_done: i64, total: i64) {
        (self.0)(bytes_done, total);
    }
}

/// 仅实现「完成后」的钩子适配器。
pub(crate) struct AfterCompleteHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> TransferHook for AfterCompleteHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn after_complete(&mut self) {
        (self.0)().await
    }
}
