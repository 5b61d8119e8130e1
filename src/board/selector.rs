use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::pipeline::PipelineStage;
use crate::records::{CandidateRecord, Classification};

/// Records shown for one (process, stage) selection.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardView {
    /// Normal stages: two columns, newest submission first in each.
    Split {
        optimal: Vec<CandidateRecord>,
        adequate: Vec<CandidateRecord>,
    },
    /// The rejected stage: one flat list in store order, any classification.
    Rejected { candidates: Vec<CandidateRecord> },
}

impl BoardView {
    pub fn optimal_count(&self) -> usize {
        match self {
            BoardView::Split { optimal, .. } => optimal.len(),
            BoardView::Rejected { .. } => 0,
        }
    }

    pub fn adequate_count(&self) -> usize {
        match self {
            BoardView::Split { adequate, .. } => adequate.len(),
            BoardView::Rejected { .. } => 0,
        }
    }

    /// Number of cards on the board.
    pub fn total(&self) -> usize {
        match self {
            BoardView::Split { optimal, adequate } => optimal.len() + adequate.len(),
            BoardView::Rejected { candidates } => candidates.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Whether a record belongs on the client-facing board at all, regardless of
/// stage: it must be classified or already in the pipeline, and not discarded
/// by the internal reviewer.
pub fn is_client_visible(record: &CandidateRecord) -> bool {
    let eligible = record.classification.is_some() || record.stage().is_some();
    eligible && !record.pipeline_stage.is_discarded_by_recruiter()
}

/// Narrows the full record set to one board.
pub fn select(records: &[CandidateRecord], process: &str, stage: PipelineStage) -> BoardView {
    let matching = records
        .iter()
        .filter(|r| r.process == process)
        .filter(|r| is_client_visible(r))
        .filter(|r| r.stage() == Some(stage));

    if stage == PipelineStage::Rejected {
        return BoardView::Rejected {
            candidates: matching.cloned().collect(),
        };
    }

    let (mut optimal, mut adequate): (Vec<_>, Vec<_>) = matching
        .filter(|r| r.classification.is_some())
        .cloned()
        .partition(|r| r.classification == Some(Classification::Optimal));

    sort_newest_first(&mut optimal);
    sort_newest_first(&mut adequate);
    BoardView::Split { optimal, adequate }
}

/// Newest submission first; records without a usable date go last, in their
/// original order.
pub fn sort_newest_first(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| match (a.submitted_at, b.submitted_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Distinct, sorted, non-empty process names.
pub fn list_processes(records: &[CandidateRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.process.trim())
        .filter(|p| !p.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
