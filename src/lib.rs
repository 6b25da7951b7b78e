/// 内部导出的模块
mod internal;


/// 面向调用方的传输任务与结果标签
pub mod transfer {
    use crate::internal;
    pub use internal::transfer::structs::{
        DownloadOutcome, DownloadToMemory, DownloadToStorage, MemoryDownloadResult,
        StorageDownloadResult, StorageUploadResult, TransferController, TransferProgress,
        UploadFromStorage,
    };
    pub use internal::transfer::traits::transfer_hook::{HookAbort, TransferHook};
}

/// 对外提供引擎核心能力，不能限制死在任务中，以防有人自己要用
pub mod engine {
    use crate::internal;
    pub use internal::transfer::engine::{ChunkDownloader, DEFAULT_MAX_CHUNK_SIZE};
    pub use internal::transfer::structs::{
        ChunkRange, EngineState, HttpResponse, ProbedSize, RequestTarget, TransferHooksContainer,
        TransportError, UploadDriveResult,
    };
}

pub mod states {
    pub mod progress {
        use crate::internal;
        pub use internal::states::progress_state::*;
    }
}
