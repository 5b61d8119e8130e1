// Stage transitions for candidate records
// The store is the source of truth: every transition reads the current stage
// from the store, writes a single cell, then drops the cached snapshot.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::stage::{PipelineStage, StageCell};
use crate::records::{columns, RecordCache};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTransition {
    /// One step forward along the ordered pipeline.
    Advance,
    /// Straight to `Rejected`, from anywhere.
    Reject,
    /// Back to `New`, from anywhere.
    Restore,
}

impl StageTransition {
    pub fn name(self) -> &'static str {
        match self {
            StageTransition::Advance => "advance",
            StageTransition::Reject => "reject",
            StageTransition::Restore => "restore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnchangedReason {
    /// Already at `Accepted`; there is no further stage.
    AlreadyFinal,
    /// `Rejected` only leaves through `Restore`.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    Success {
        previous: StageCell,
        new_stage: PipelineStage,
    },
    Unchanged {
        stage: PipelineStage,
        reason: UnchangedReason,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("candidate '{0}' was not found in the store")]
    RecordNotFound(String),

    #[error("the store has no '{0}' column")]
    MissingStageColumn(String),

    #[error("candidate '{file_id}' holds unrecognised stage '{value}'")]
    UnrecognizedStage { file_id: String, value: String },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for PipelineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingColumn(column) => PipelineError::MissingStageColumn(column),
            StoreError::RecordNotFound(key) => PipelineError::RecordNotFound(key),
            other => PipelineError::Store(other),
        }
    }
}

/// Target of `transition` applied to a record currently in `current`.
///
/// Pure: no store access. `Err` carries the unchanged stage and why.
pub fn next_stage(
    current: &StageCell,
    transition: StageTransition,
) -> Result<Option<PipelineStage>, (PipelineStage, UnchangedReason)> {
    match transition {
        StageTransition::Reject => Ok(Some(PipelineStage::Rejected)),
        StageTransition::Restore => Ok(Some(PipelineStage::New)),
        StageTransition::Advance => match current.stage() {
            None => Ok(None),
            Some(PipelineStage::Rejected) => {
                Err((PipelineStage::Rejected, UnchangedReason::Rejected))
            }
            Some(stage) => match stage.next() {
                Some(next) => Ok(Some(next)),
                None => Err((stage, UnchangedReason::AlreadyFinal)),
            },
        },
    }
}

#[derive(Clone)]
pub struct PipelineStateMachine {
    store: Arc<dyn RecordStore>,
    cache: Arc<RecordCache>,
}

impl PipelineStateMachine {
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<RecordCache>) -> Self {
        Self { store, cache }
    }

    pub async fn advance(&self, file_id: &str) -> Result<TransitionResult, PipelineError> {
        self.execute_transition(file_id, StageTransition::Advance).await
    }

    pub async fn reject(&self, file_id: &str) -> Result<TransitionResult, PipelineError> {
        self.execute_transition(file_id, StageTransition::Reject).await
    }

    pub async fn restore(&self, file_id: &str) -> Result<TransitionResult, PipelineError> {
        self.execute_transition(file_id, StageTransition::Restore).await
    }

    /// Applies one transition with a single-cell write. Either the cell is
    /// written and the cache invalidated, or nothing changes.
    pub async fn execute_transition(
        &self,
        file_id: &str,
        transition: StageTransition,
    ) -> Result<TransitionResult, PipelineError> {
        let row = self
            .store
            .find_row(file_id)
            .await?
            .ok_or_else(|| PipelineError::RecordNotFound(file_id.to_string()))?;

        let header = self.store.read_header_row().await?;
        if !header.iter().any(|h| h.trim() == columns::PIPELINE_STAGE) {
            return Err(PipelineError::MissingStageColumn(
                columns::PIPELINE_STAGE.to_string(),
            ));
        }

        let previous = StageCell::parse(&self.store.read_cell(row, columns::PIPELINE_STAGE).await?);
        let new_stage = match next_stage(&previous, transition) {
            Ok(Some(stage)) => stage,
            Ok(None) => {
                let value = match &previous {
                    StageCell::Other(value) => value.clone(),
                    _ => String::new(),
                };
                return Err(PipelineError::UnrecognizedStage {
                    file_id: file_id.to_string(),
                    value,
                });
            }
            Err((stage, reason)) => {
                warn!(file_id, ?stage, ?reason, "Transition left stage unchanged");
                return Ok(TransitionResult::Unchanged { stage, reason });
            }
        };

        self.store
            .write_cell(row, columns::PIPELINE_STAGE, new_stage.label())
            .await?;
        self.cache.invalidate().await;

        info!(
            file_id,
            transition = transition.name(),
            from = ?previous,
            to = new_stage.slug(),
            "Candidate moved"
        );
        Ok(TransitionResult::Success {
            previous,
            new_stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockRecordStore, RowHandle};

    #[test]
    fn advance_steps_each_ordered_stage_forward() {
        for window in PipelineStage::ORDERED.windows(2) {
            let current = StageCell::Known(window[0]);
            assert_eq!(
                next_stage(&current, StageTransition::Advance),
                Ok(Some(window[1]))
            );
        }
    }

    #[test]
    fn advance_stops_at_accepted_and_rejected() {
        assert_eq!(
            next_stage(&StageCell::Known(PipelineStage::Accepted), StageTransition::Advance),
            Err((PipelineStage::Accepted, UnchangedReason::AlreadyFinal))
        );
        assert_eq!(
            next_stage(&StageCell::Known(PipelineStage::Rejected), StageTransition::Advance),
            Err((PipelineStage::Rejected, UnchangedReason::Rejected))
        );
    }

    #[test]
    fn blank_stage_advances_like_new() {
        assert_eq!(
            next_stage(&StageCell::Empty, StageTransition::Advance),
            Ok(Some(PipelineStage::InReview))
        );
    }

    #[test]
    fn reject_and_restore_apply_from_every_state() {
        let mut cells: Vec<StageCell> =
            PipelineStage::ALL.into_iter().map(StageCell::Known).collect();
        cells.push(StageCell::Empty);
        cells.push(StageCell::Other("Descartado (Reclutador)".to_string()));

        for cell in &cells {
            assert_eq!(
                next_stage(cell, StageTransition::Reject),
                Ok(Some(PipelineStage::Rejected))
            );
            assert_eq!(
                next_stage(cell, StageTransition::Restore),
                Ok(Some(PipelineStage::New))
            );
        }
    }

    #[tokio::test]
    async fn store_failure_on_write_leaves_cache_alone() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_row()
            .returning(|_| Ok(Some(RowHandle(2))));
        store
            .expect_read_header_row()
            .returning(|| Ok(columns::ALL.iter().map(|c| c.to_string()).collect()));
        store
            .expect_read_cell()
            .returning(|_, _| Ok("📥 Nuevo".to_string()));
        store
            .expect_write_cell()
            .times(1)
            .returning(|_, _, _| Err(StoreError::Connectivity("connection reset".into())));
        store.expect_read_all().times(0);

        let machine = PipelineStateMachine::new(Arc::new(store), Arc::new(RecordCache::default()));
        let err = machine.advance("cv_1.pdf").await.unwrap_err();
        assert!(matches!(err, PipelineError::Store(StoreError::Connectivity(_))));
    }

    #[tokio::test]
    async fn missing_stage_column_is_reported_before_any_write() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_row()
            .returning(|_| Ok(Some(RowHandle(2))));
        store
            .expect_read_header_row()
            .returning(|| Ok(vec![columns::FILE.to_string(), columns::PROCESS.to_string()]));
        store.expect_write_cell().times(0);

        let machine = PipelineStateMachine::new(Arc::new(store), Arc::new(RecordCache::default()));
        let err = machine.reject("cv_1.pdf").await.unwrap_err();
        assert!(matches!(err, PipelineError::MissingStageColumn(ref c) if c == columns::PIPELINE_STAGE));
    }
}
