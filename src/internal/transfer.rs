//! 传输领域模块：引擎（分块下载状态机 + 上传驱动）与面向调用方的任务。
//!
//! 使用方式：`DownloadToMemory::new(url).with_hook(hook).send().await`；
//! 对外导出以 [`crate::transfer`] 为准，此处仅做模块划分，不重复 pub use。

pub mod engine;
pub mod structs;
pub mod traits;
