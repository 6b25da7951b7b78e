//! 响应式状态模块：任务进度的 watch 属性。

pub mod progress_state;
