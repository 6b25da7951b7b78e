pub mod chunk_range;
pub mod download_outcome;
pub mod download_to_memory;
pub mod download_to_storage;
pub mod engine_state;
pub mod hook_adapters;
pub mod http_response;
pub mod memory_download_result;
pub mod probed_size;
pub mod request_target;
pub mod storage_download_result;
pub mod storage_upload_result;
pub mod transfer_controller;
pub mod transfer_hooks_container;
pub mod transfer_progress;
pub mod transport_error;
pub mod upload_drive_result;
pub mod upload_from_storage;

// 重导出公共类型
pub use chunk_range::ChunkRange;
pub use download_outcome::DownloadOutcome;
pub use download_to_memory::DownloadToMemory;
pub use download_to_storage::DownloadToStorage;
pub use engine_state::EngineState;
pub use http_response::HttpResponse;
pub use memory_download_result::MemoryDownloadResult;
pub use probed_size::ProbedSize;
pub use request_target::RequestTarget;
pub use storage_download_result::StorageDownloadResult;
pub use storage_upload_result::StorageUploadResult;
pub use transfer_controller::TransferController;
pub use transfer_hooks_container::TransferHooksContainer;
pub use transfer_progress::TransferProgress;
pub use transport_error::TransportError;
pub use upload_drive_result::UploadDriveResult;
pub use upload_from_storage::UploadFromStorage;
