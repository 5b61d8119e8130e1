// Plain-text rendering of a board for the terminal

use std::fmt;

use super::selector::BoardView;
use crate::interviews::decode;
use crate::pipeline::PipelineStage;
use crate::records::{CandidateRecord, Classification};

const RULE: &str = "────────────────────────────────────────";

/// Empty-column message for a classification column on the given stage.
pub fn empty_column_message(stage: PipelineStage, classification: Classification) -> String {
    let who = match classification {
        Classification::Optimal => "óptimos",
        Classification::Adequate => "adecuados",
    };
    match stage {
        PipelineStage::New => format!("No hay candidatos {who} nuevos."),
        other => format!("No hay candidatos {who} en '{}'.", other.label()),
    }
}

/// One candidate card, as shown on the board of `stage`.
pub struct Card<'a> {
    pub record: &'a CandidateRecord,
    pub stage: PipelineStage,
}

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        let badge = match record.classification {
            Some(c) => c.label(),
            None => record.classification_raw.as_str(),
        };

        writeln!(f, "  📄 {}  [{}]", record.file_id, badge)?;
        if let Some(comments) = &record.comments {
            writeln!(f, "     \"{comments}\"")?;
        }
        if let Some(date) = record.submitted_at {
            writeln!(f, "     🗓  {}", date.format("%Y-%m-%d %H:%M"))?;
        }
        match &record.cv_link {
            Some(link) => writeln!(f, "     🔗 CV: {link}")?,
            None => writeln!(f, "     🔗 CV: (sin enlace)")?,
        }

        let mut interviews = decode(&record.interviews).peekable();
        if interviews.peek().is_some() {
            writeln!(f, "     🎤 Entrevistas:")?;
            for attachment in interviews {
                writeln!(f, "        • {} <{}>", attachment.display_name, attachment.url)?;
            }
        }

        if let Some(next) = self.stage.next() {
            writeln!(
                f,
                "     ➡️  talent-map advance {}   (→ {})",
                record.file_id,
                next.label()
            )?;
        }
        writeln!(f, "     ❌ talent-map reject {}", record.file_id)
    }
}

/// A whole board with its header and counts.
pub struct Board<'a> {
    pub process: &'a str,
    pub stage: PipelineStage,
    pub view: &'a BoardView,
}

impl Board<'_> {
    fn column(
        &self,
        f: &mut fmt::Formatter<'_>,
        classification: Classification,
        records: &[CandidateRecord],
    ) -> fmt::Result {
        writeln!(
            f,
            "{} ({})  {}",
            classification.label(),
            records.len(),
            classification.color()
        )?;
        writeln!(f, "{RULE}")?;
        if records.is_empty() {
            writeln!(f, "  {}", empty_column_message(self.stage, classification))?;
        }
        for record in records {
            writeln!(f, "{}", Card { record, stage: self.stage })?;
        }
        Ok(())
    }
}

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🗂️  {} · {}", self.process, self.stage.label())?;
        writeln!(f, "{RULE}")?;

        match self.view {
            BoardView::Rejected { candidates } => {
                writeln!(f, "Rechazados: {}", candidates.len())?;
                writeln!(f)?;
                if candidates.is_empty() {
                    writeln!(f, "  No hay candidatos rechazados.")?;
                }
                for record in candidates {
                    let classification = if record.classification_raw.is_empty() {
                        "Sin clasificación"
                    } else {
                        record.classification_raw.as_str()
                    };
                    writeln!(f, "  ❌ {} ({classification})", record.file_id)?;
                    writeln!(f, "     ↩️  talent-map restore {}", record.file_id)?;
                }
                Ok(())
            }
            BoardView::Split { optimal, adequate } => {
                writeln!(
                    f,
                    "{}: {}   {}: {}",
                    Classification::Optimal.label(),
                    optimal.len(),
                    Classification::Adequate.label(),
                    adequate.len()
                )?;
                if self.stage.allows_interview_upload() {
                    writeln!(
                        f,
                        "📎 Modo entrevistas: adjunta informes con 'talent-map attach <archivo> <informe.pdf> --stage {}'",
                        self.stage.slug()
                    )?;
                }
                writeln!(f)?;
                self.column(f, Classification::Optimal, optimal)?;
                writeln!(f)?;
                self.column(f, Classification::Adequate, adequate)
            }
        }
    }
}

pub fn render_card(record: &CandidateRecord, stage: PipelineStage) -> String {
    Card { record, stage }.to_string()
}

pub fn render_board(process: &str, stage: PipelineStage, view: &BoardView) -> String {
    Board { process, stage, view }.to_string()
}
