// Interview reports attached to candidate records

pub mod codec;
pub mod manager;

use thiserror::Error;

use crate::blob::BlobError;
use crate::store::StoreError;

pub use codec::{
    append_entry, decode, encode_all, validate_display_name, Attachments, InterviewAttachment,
};
pub use manager::{AttachmentManager, INTERVIEW_CONTENT_TYPE};

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("candidate '{0}' was not found in the store")]
    RecordNotFound(String),

    #[error("invalid interview entry: {0}")]
    InvalidEntry(String),

    #[error("interview upload failed: {0}")]
    Upload(#[from] BlobError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
