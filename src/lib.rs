// Talent Map Library - client-facing hiring pipeline board
// This exposes the core components for testing and integration

pub mod blob;
pub mod board;
pub mod cli;
pub mod config;
pub mod interviews;
pub mod pipeline;
pub mod records;
pub mod store;
pub mod telemetry;

// Re-export key types for easy access
pub use blob::{BlobError, BlobRef, BlobStore, DriveBlobStore, LocalBlobStore};
pub use board::{select, list_processes, upload_allowed, ActionReport, BoardView, TalentBoard};
pub use crate::config::{config, init_config, TalentMapConfig};
pub use interviews::{AttachmentError, AttachmentManager, InterviewAttachment};
pub use pipeline::{
    PipelineError, PipelineStage, PipelineStateMachine, StageCell, StageTransition,
    TransitionResult, UnchangedReason,
};
pub use records::{CandidateRecord, Classification, RecordCache};
pub use store::{
    LocalRecordStore, MemoryRecordStore, RecordStore, RowHandle, SheetsRecordStore, StoreError,
};
pub use telemetry::{create_action_span, generate_correlation_id, init_telemetry};
