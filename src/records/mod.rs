// Candidate records as read from the tabular store

pub mod cache;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pipeline::stage::{strip_badge, PipelineStage, StageCell};
use crate::store::RowMap;

pub use cache::RecordCache;

/// Column names of the candidate sheet, in their canonical order.
pub mod columns {
    pub const FILE: &str = "Archivo";
    pub const CLASSIFICATION: &str = "Clasificación";
    pub const COMMENTS: &str = "Comentarios";
    pub const SUBMITTED_AT: &str = "Fecha";
    pub const PROCESS: &str = "Proceso";
    pub const CV_LINK: &str = "CV_Link";
    pub const PIPELINE_STAGE: &str = "Estado_Pipeline";
    pub const INTERVIEWS: &str = "Entrevistas";

    pub const ALL: [&str; 8] = [
        FILE,
        CLASSIFICATION,
        COMMENTS,
        SUBMITTED_AT,
        PROCESS,
        CV_LINK,
        PIPELINE_STAGE,
        INTERVIEWS,
    ];
}

/// Quality label assigned by the recruiter before a candidate enters the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Optimal,
    Adequate,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::Optimal => "🌟 Óptimo",
            Classification::Adequate => "✅ Adecuado",
        }
    }

    /// Badge colour on the board.
    pub fn color(self) -> &'static str {
        match self {
            Classification::Optimal => "#D4ADFC",
            Classification::Adequate => "#A0E7E5",
        }
    }

    pub fn parse(value: &str) -> Option<Classification> {
        let value = value.trim();
        [Classification::Optimal, Classification::Adequate]
            .into_iter()
            .find(|c| {
                let bare = strip_badge(c.label());
                c.label() == value
                    || bare.to_lowercase() == value.to_lowercase()
                    || fold_accents(bare).eq_ignore_ascii_case(value)
                    || c.english().eq_ignore_ascii_case(value)
            })
    }

    fn english(self) -> &'static str {
        match self {
            Classification::Optimal => "optimal",
            Classification::Adequate => "adequate",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn fold_accents(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

/// One candidate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub file_id: String,
    pub classification: Option<Classification>,
    /// Raw classification text, kept for display when it is not a known label.
    pub classification_raw: String,
    pub comments: Option<String>,
    pub submitted_at: Option<NaiveDateTime>,
    pub process: String,
    pub cv_link: Option<String>,
    pub pipeline_stage: StageCell,
    pub interviews: String,
}

impl CandidateRecord {
    /// Builds a record from a row mapping. Missing columns read as empty.
    pub fn from_row(row: &RowMap) -> CandidateRecord {
        let cell = |name: &str| row.get(name).map(|v| v.trim()).unwrap_or_default();
        let optional = |name: &str| {
            let value = cell(name);
            (!value.is_empty()).then(|| value.to_string())
        };

        CandidateRecord {
            file_id: cell(columns::FILE).to_string(),
            classification: Classification::parse(cell(columns::CLASSIFICATION)),
            classification_raw: cell(columns::CLASSIFICATION).to_string(),
            comments: optional(columns::COMMENTS),
            submitted_at: parse_submitted_at(cell(columns::SUBMITTED_AT)),
            process: cell(columns::PROCESS).to_string(),
            cv_link: optional(columns::CV_LINK).filter(|link| link != "#"),
            pipeline_stage: StageCell::parse(cell(columns::PIPELINE_STAGE)),
            interviews: cell(columns::INTERVIEWS).to_string(),
        }
    }

    /// Effective stage, blank treated as `New`.
    pub fn stage(&self) -> Option<PipelineStage> {
        self.pipeline_stage.stage()
    }
}

/// Best-effort date parsing; anything unrecognised is treated as missing.
pub fn parse_submitted_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    // `%.f` also accepts a missing fractional part.
    const DATETIME_FORMATS: [&str; 8] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%d/%m/%Y %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
