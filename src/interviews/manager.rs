use std::sync::Arc;
use tracing::{debug, info};

use super::codec::{append_entry, decode, validate_display_name, InterviewAttachment};
use super::AttachmentError;
use crate::blob::BlobStore;
use crate::records::{columns, RecordCache};
use crate::store::{RecordStore, RowHandle};

/// Content type used for every interview report upload.
pub const INTERVIEW_CONTENT_TYPE: &str = "application/pdf";

/// Appends interview reports to candidate records.
///
/// Appends are read-modify-write on a single cell and are not coordinated
/// with other writers: two sessions appending to the same candidate at the
/// same moment can lose one entry (last write wins). The current cell is
/// always read from the store right before writing, never from the cache.
///
/// Stage gating is not applied here; see [`crate::board::upload_allowed`].
#[derive(Clone)]
pub struct AttachmentManager {
    store: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    cache: Arc<RecordCache>,
    parent_folder: Option<String>,
}

impl AttachmentManager {
    pub fn new(
        store: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        cache: Arc<RecordCache>,
    ) -> Self {
        Self {
            store,
            blobs,
            cache,
            parent_folder: None,
        }
    }

    /// Folder passed to the blob store for every upload.
    pub fn with_parent_folder(mut self, parent_folder: Option<String>) -> Self {
        self.parent_folder = parent_folder;
        self
    }

    async fn locate(&self, record_key: &str) -> Result<RowHandle, AttachmentError> {
        self.store
            .find_row(record_key)
            .await?
            .ok_or_else(|| AttachmentError::RecordNotFound(record_key.to_string()))
    }

    /// Appends one `(url, display_name)` entry to the record's interview cell.
    /// Creates the interviews column when the sheet lacks it. Returns the
    /// number of entries now stored.
    pub async fn append(
        &self,
        record_key: &str,
        url: &str,
        display_name: &str,
    ) -> Result<usize, AttachmentError> {
        let attachment = InterviewAttachment::new(url, display_name);
        attachment.validate()?;

        let row = self.locate(record_key).await?;
        self.store.ensure_column(columns::INTERVIEWS).await?;

        let current = self.store.read_cell(row, columns::INTERVIEWS).await?;
        let updated = append_entry(&current, &attachment)?;
        self.store
            .write_cell(row, columns::INTERVIEWS, &updated)
            .await?;
        self.cache.invalidate().await;

        let count = decode(&updated).count();
        info!(record_key, count, "Interview report attached");
        Ok(count)
    }

    /// Every well-formed interview entry currently stored for the record.
    pub async fn list(&self, record_key: &str) -> Result<Vec<InterviewAttachment>, AttachmentError> {
        let row = self.locate(record_key).await?;
        let header = self.store.read_header_row().await?;
        if !header.iter().any(|h| h.trim() == columns::INTERVIEWS) {
            return Ok(Vec::new());
        }
        let raw = self.store.read_cell(row, columns::INTERVIEWS).await?;
        Ok(decode(&raw).collect())
    }

    /// Uploads a report to the blob store and attaches the resulting link.
    ///
    /// The stored document is named `Entrevista_{record_key}_{file_name}`; the
    /// entry shown on the card keeps the uploaded `file_name`.
    pub async fn upload(
        &self,
        record_key: &str,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<InterviewAttachment, AttachmentError> {
        // Fail before uploading if the entry could never be linked.
        validate_display_name(file_name)?;
        self.locate(record_key).await?;

        let stored_name = format!("Entrevista_{record_key}_{file_name}");
        debug!(record_key, %stored_name, bytes = bytes.len(), "Uploading interview report");
        let blob = self
            .blobs
            .upload(
                bytes,
                &stored_name,
                INTERVIEW_CONTENT_TYPE,
                self.parent_folder.clone(),
            )
            .await?;

        self.append(record_key, &blob.url, file_name).await?;
        Ok(InterviewAttachment::new(blob.url, file_name))
    }
}
