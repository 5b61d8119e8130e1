//! The client-facing board: selection, rendering and operator actions.
//!
//! [`TalentBoard`] is the action boundary. Every action runs in its own
//! `board_action` span and ends in an [`ActionReport`]; store, blob and
//! pipeline errors are turned into messages here and never escape.

pub mod render;
pub mod selector;

use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

use crate::blob::{self, BlobStore};
use crate::config::TalentMapConfig;
use crate::interviews::{AttachmentError, AttachmentManager, InterviewAttachment};
use crate::pipeline::{
    PipelineError, PipelineStage, PipelineStateMachine, StageTransition, TransitionResult,
    UnchangedReason,
};
use crate::records::{CandidateRecord, RecordCache};
use crate::store::{self, RecordStore, StoreError};
use crate::telemetry::{create_action_span, generate_correlation_id};

pub use render::{render_board, render_card};
pub use selector::{is_client_visible, list_processes, select, sort_newest_first, BoardView};

/// Whether interview reports may be uploaded while `stage` is selected.
///
/// Presentation policy only: [`AttachmentManager`] accepts appends on any
/// stage when called directly.
pub fn upload_allowed(stage: PipelineStage) -> bool {
    stage.allows_interview_upload()
}

/// User-visible outcome of one board action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReport {
    Success(String),
    /// Nothing was written, but nothing failed either.
    Warning(String),
    Failure(String),
}

impl ActionReport {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionReport::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ActionReport::Success(m) | ActionReport::Warning(m) | ActionReport::Failure(m) => m,
        }
    }
}

impl fmt::Display for ActionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionReport::Success(m) => write!(f, "✅ {m}"),
            ActionReport::Warning(m) => write!(f, "⚠️  {m}"),
            ActionReport::Failure(m) => write!(f, "❌ {m}"),
        }
    }
}

#[derive(Clone)]
pub struct TalentBoard {
    store: Arc<dyn RecordStore>,
    cache: Arc<RecordCache>,
    pipeline: PipelineStateMachine,
    attachments: AttachmentManager,
}

impl TalentBoard {
    pub fn new(
        store: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        cache: Arc<RecordCache>,
        parent_folder: Option<String>,
    ) -> Self {
        let pipeline = PipelineStateMachine::new(store.clone(), cache.clone());
        let attachments = AttachmentManager::new(store.clone(), blobs, cache.clone())
            .with_parent_folder(parent_folder);
        Self {
            store,
            cache,
            pipeline,
            attachments,
        }
    }

    /// Wires the adapters selected by the configuration.
    pub fn from_config(config: &TalentMapConfig) -> anyhow::Result<Self> {
        let store = store::from_config(config)?;
        let blobs = blob::from_config(config)?;
        let cache = Arc::new(RecordCache::new(config.cache_ttl()));
        Ok(Self::new(
            store,
            blobs,
            cache,
            config.blob.parent_folder_id.clone(),
        ))
    }

    pub fn attachments(&self) -> &AttachmentManager {
        &self.attachments
    }

    /// Current snapshot of every record, served from the cache when fresh.
    pub async fn records(&self) -> Result<Arc<Vec<CandidateRecord>>, StoreError> {
        self.cache.get(self.store.as_ref()).await
    }

    pub async fn view(&self, process: &str, stage: PipelineStage) -> Result<BoardView, StoreError> {
        let records = self.records().await?;
        Ok(select(&records, process, stage))
    }

    pub async fn processes(&self) -> Result<Vec<String>, StoreError> {
        let records = self.records().await?;
        Ok(list_processes(&records))
    }

    pub async fn advance(&self, file_id: &str) -> ActionReport {
        self.transition(file_id, StageTransition::Advance).await
    }

    pub async fn reject(&self, file_id: &str) -> ActionReport {
        self.transition(file_id, StageTransition::Reject).await
    }

    pub async fn restore(&self, file_id: &str) -> ActionReport {
        self.transition(file_id, StageTransition::Restore).await
    }

    async fn transition(&self, file_id: &str, transition: StageTransition) -> ActionReport {
        let correlation_id = generate_correlation_id();
        let span = create_action_span(transition.name(), Some(file_id), &correlation_id);

        let outcome = self
            .pipeline
            .execute_transition(file_id, transition)
            .instrument(span)
            .await;

        match outcome {
            Ok(TransitionResult::Success { new_stage, .. }) => {
                ActionReport::Success(format!("{file_id} → {}", new_stage.label()))
            }
            Ok(TransitionResult::Unchanged { stage, reason }) => {
                let why = match reason {
                    UnchangedReason::AlreadyFinal => "is already in the final stage",
                    UnchangedReason::Rejected => "is rejected; restore it first",
                };
                ActionReport::Warning(format!("{file_id} {why} ({})", stage.label()))
            }
            Err(err) => {
                error!(file_id, %correlation_id, error = %err, "Transition failed");
                ActionReport::Failure(describe_pipeline_error(&err))
            }
        }
    }

    /// Attaches an already-stored document link, subject to the upload gate.
    pub async fn attach_interview(
        &self,
        file_id: &str,
        url: &str,
        display_name: &str,
        selected_stage: PipelineStage,
    ) -> ActionReport {
        if let Some(report) = gate(selected_stage) {
            return report;
        }
        let correlation_id = generate_correlation_id();
        let span = create_action_span("attach", Some(file_id), &correlation_id);

        match self
            .attachments
            .append(file_id, url, display_name)
            .instrument(span)
            .await
        {
            Ok(count) => ActionReport::Success(format!(
                "{display_name} attached to {file_id} ({count} report(s))"
            )),
            Err(err) => attachment_failure(file_id, &correlation_id, err),
        }
    }

    /// Uploads an interview report and attaches it, subject to the upload gate.
    pub async fn upload_interview(
        &self,
        file_id: &str,
        bytes: Vec<u8>,
        file_name: &str,
        selected_stage: PipelineStage,
    ) -> ActionReport {
        if let Some(report) = gate(selected_stage) {
            return report;
        }
        let correlation_id = generate_correlation_id();
        let span = create_action_span("upload", Some(file_id), &correlation_id);

        match self
            .attachments
            .upload(file_id, bytes, file_name)
            .instrument(span)
            .await
        {
            Ok(InterviewAttachment { url, display_name }) => {
                info!(file_id, %url, "Interview report uploaded");
                ActionReport::Success(format!("{display_name} uploaded for {file_id}: {url}"))
            }
            Err(err) => attachment_failure(file_id, &correlation_id, err),
        }
    }

    pub async fn interviews(&self, file_id: &str) -> Result<Vec<InterviewAttachment>, AttachmentError> {
        self.attachments.list(file_id).await
    }
}

fn gate(stage: PipelineStage) -> Option<ActionReport> {
    if upload_allowed(stage) {
        return None;
    }
    warn!(stage = stage.slug(), "Interview upload refused on this stage");
    Some(ActionReport::Warning(format!(
        "Interview reports can only be attached on the {} boards, not on {}",
        PipelineStage::INTERVIEW_STAGES
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(" / "),
        stage.label()
    )))
}

fn describe_pipeline_error(err: &PipelineError) -> String {
    match err {
        PipelineError::RecordNotFound(key) => format!("Candidate {key} was not found in the sheet"),
        PipelineError::MissingStageColumn(column) => {
            format!("The sheet has no '{column}' column; add it and try again")
        }
        PipelineError::UnrecognizedStage { file_id, value } => {
            format!("{file_id} has stage '{value}', which the board cannot advance")
        }
        PipelineError::Store(store) => describe_store_error(store),
    }
}

fn attachment_failure(file_id: &str, correlation_id: &str, err: AttachmentError) -> ActionReport {
    error!(file_id, %correlation_id, error = %err, "Attachment failed");
    let message = match &err {
        AttachmentError::RecordNotFound(key) => format!("Candidate {key} was not found in the sheet"),
        AttachmentError::InvalidEntry(reason) => format!("Cannot store this report: {reason}"),
        AttachmentError::Upload(blob) => format!("Upload failed: {blob}"),
        AttachmentError::Store(store) => describe_store_error(store),
    };
    ActionReport::Failure(message)
}

/// One-line form of a store error; the quick-fix block is for logs, not cards.
fn describe_store_error(err: &StoreError) -> String {
    match err {
        StoreError::Connectivity(msg) => format!("The sheet is unreachable: {msg}"),
        StoreError::Unauthorized(msg) => format!("The sheet refused our credentials: {msg}"),
        StoreError::RecordNotFound(key) => format!("Candidate {key} was not found in the sheet"),
        StoreError::MissingColumn(column) => format!("The sheet has no '{column}' column"),
        StoreError::Configuration(msg) => format!("Store configuration problem: {msg}"),
        StoreError::InvalidResponse(msg) => format!("Unexpected answer from the sheet: {msg}"),
        StoreError::IoError(err) => format!("Could not access the local sheet: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MockBlobStore;
    use crate::records::columns;
    use crate::store::{MemoryRecordStore, MockRecordStore};

    fn board_with(store: Arc<dyn RecordStore>) -> TalentBoard {
        TalentBoard::new(store, Arc::new(MockBlobStore::new()), Arc::new(RecordCache::default()), None)
    }

    fn memory() -> Arc<MemoryRecordStore> {
        Arc::new(MemoryRecordStore::with_rows(vec![vec![
            (columns::FILE, "cv_1.pdf"),
            (columns::CLASSIFICATION, "🌟 Óptimo"),
            (columns::PROCESS, "Eng"),
            (columns::PIPELINE_STAGE, "✅ Aceptado"),
        ]]))
    }

    #[test]
    fn gate_matches_interview_stages() {
        let allowed: Vec<_> = PipelineStage::ALL
            .into_iter()
            .filter(|s| upload_allowed(*s))
            .collect();
        assert_eq!(allowed, PipelineStage::INTERVIEW_STAGES.to_vec());
    }

    #[tokio::test]
    async fn advancing_accepted_is_a_warning() {
        let store = memory();
        let report = board_with(store.clone()).advance("cv_1.pdf").await;
        assert!(matches!(report, ActionReport::Warning(ref m) if m.contains("final stage")));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn unreachable_store_is_reported_not_raised() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_row()
            .returning(|_| Err(StoreError::Connectivity("dns error".into())));

        let report = board_with(Arc::new(store)).reject("cv_1.pdf").await;
        assert!(matches!(report, ActionReport::Failure(_)));
    }

    #[tokio::test]
    async fn gated_attach_never_touches_store() {
        let mut store = MockRecordStore::new();
        store.expect_find_row().times(0);
        store.expect_write_cell().times(0);

        let report = board_with(Arc::new(store))
            .attach_interview("cv_1.pdf", "https://x/y", "a.pdf", PipelineStage::InReview)
            .await;
        assert!(matches!(report, ActionReport::Warning(_)));
    }

    #[tokio::test]
    async fn write_is_visible_on_next_view() {
        let store = memory();
        let board = board_with(store.clone());

        assert_eq!(board.view("Eng", PipelineStage::Accepted).await.unwrap().total(), 1);
        assert!(board.reject("cv_1.pdf").await.is_success());
        assert_eq!(board.view("Eng", PipelineStage::Accepted).await.unwrap().total(), 0);
        assert_eq!(board.view("Eng", PipelineStage::Rejected).await.unwrap().total(), 1);
    }
}
