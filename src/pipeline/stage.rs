use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stage value written by the internal reviewer for candidates that must never
/// reach the client-facing board.
pub const DISCARDED_BY_RECRUITER: &str = "Descartado (Reclutador)";

/// One position of the hiring pipeline, or the out-of-band `Rejected` state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    New,
    InReview,
    ScheduleInterview,
    Interviewed,
    Accepted,
    Rejected,
}

impl PipelineStage {
    /// The forward pipeline, in order. `Rejected` is not part of it.
    pub const ORDERED: [PipelineStage; 5] = [
        PipelineStage::New,
        PipelineStage::InReview,
        PipelineStage::ScheduleInterview,
        PipelineStage::Interviewed,
        PipelineStage::Accepted,
    ];

    /// Stages whose boards allow interview reports to be uploaded.
    pub const INTERVIEW_STAGES: [PipelineStage; 3] = [
        PipelineStage::ScheduleInterview,
        PipelineStage::Interviewed,
        PipelineStage::Accepted,
    ];

    /// Every stage a record can legitimately hold, `Rejected` last.
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::New,
        PipelineStage::InReview,
        PipelineStage::ScheduleInterview,
        PipelineStage::Interviewed,
        PipelineStage::Accepted,
        PipelineStage::Rejected,
    ];

    /// Label stored in the `Estado_Pipeline` column.
    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::New => "📥 Nuevo",
            PipelineStage::InReview => "👀 En Revisión",
            PipelineStage::ScheduleInterview => "🗓️ Agendar Entrevista",
            PipelineStage::Interviewed => "🎤 Entrevistado",
            PipelineStage::Accepted => "✅ Aceptado",
            PipelineStage::Rejected => "❌ Rechazado",
        }
    }

    /// Command-line name of the stage.
    pub fn slug(self) -> &'static str {
        match self {
            PipelineStage::New => "new",
            PipelineStage::InReview => "in-review",
            PipelineStage::ScheduleInterview => "schedule-interview",
            PipelineStage::Interviewed => "interviewed",
            PipelineStage::Accepted => "accepted",
            PipelineStage::Rejected => "rejected",
        }
    }

    /// Position in the forward pipeline; `None` for `Rejected`.
    pub fn index(self) -> Option<usize> {
        Self::ORDERED.iter().position(|stage| *stage == self)
    }

    /// The stage one step forward, if any.
    pub fn next(self) -> Option<PipelineStage> {
        self.index()
            .and_then(|i| Self::ORDERED.get(i + 1))
            .copied()
    }

    pub fn allows_interview_upload(self) -> bool {
        Self::INTERVIEW_STAGES.contains(&self)
    }

    /// Parses a stored cell value. Accepts the stored label, the label without
    /// its leading emoji, and the command-line slug.
    pub fn from_cell(value: &str) -> Option<PipelineStage> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|stage| {
            stage.label() == value
                || strip_badge(stage.label()).eq_ignore_ascii_case(value)
                || stage.slug().eq_ignore_ascii_case(value)
        })
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PipelineStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cell(s).ok_or_else(|| format!("unknown pipeline stage '{s}'"))
    }
}

/// What a record's stage cell actually holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageCell {
    /// Blank cell; behaves as `New`.
    Empty,
    Known(PipelineStage),
    /// Any other text, e.g. the recruiter's discard marker.
    Other(String),
}

impl StageCell {
    pub fn parse(value: &str) -> StageCell {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return StageCell::Empty;
        }
        match PipelineStage::from_cell(trimmed) {
            Some(stage) => StageCell::Known(stage),
            None => StageCell::Other(trimmed.to_string()),
        }
    }

    /// The effective stage, with blank treated as `New`.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            StageCell::Empty => Some(PipelineStage::New),
            StageCell::Known(stage) => Some(*stage),
            StageCell::Other(_) => None,
        }
    }

    pub fn is_discarded_by_recruiter(&self) -> bool {
        matches!(self, StageCell::Other(value) if value == DISCARDED_BY_RECRUITER)
    }
}

/// Drops a leading emoji badge ("📥 Nuevo" -> "Nuevo").
pub(crate) fn strip_badge(label: &str) -> &str {
    match label.split_once(' ') {
        Some((badge, rest)) if !badge.chars().any(|c| c.is_alphanumeric()) => rest.trim(),
        _ => label.trim(),
    }
}
