use anyhow::{anyhow, Result};
use std::path::PathBuf;

use super::{with_board, Command};
use crate::board::upload_allowed;
use crate::pipeline::PipelineStage;

pub struct AttachCommand {
    pub file_id: String,
    pub report: PathBuf,
    pub stage: PipelineStage,
}

impl AttachCommand {
    pub fn new(file_id: String, report: PathBuf, stage: PipelineStage) -> Self {
        Self {
            file_id,
            report,
            stage,
        }
    }

    fn is_pdf(&self) -> bool {
        self.report
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }
}

impl Command for AttachCommand {
    async fn execute(&self) -> Result<()> {
        if !self.is_pdf() {
            println!("❌ Only PDF interview reports can be attached: {}", self.report.display());
            return Err(anyhow!("not a PDF file"));
        }
        if !upload_allowed(self.stage) {
            println!(
                "⚠️  Interview reports are attached from the interview boards ({})",
                PipelineStage::INTERVIEW_STAGES
                    .iter()
                    .map(|s| s.slug())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            return Ok(());
        }

        let bytes = tokio::fs::read(&self.report)
            .await
            .map_err(|e| anyhow!("cannot read {}: {e}", self.report.display()))?;
        let file_name = self
            .report
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("entrevista.pdf")
            .to_string();

        with_board(|board| async move {
            print!("📎 Uploading {file_name}... ");
            let report = board
                .upload_interview(&self.file_id, bytes, &file_name, self.stage)
                .await;
            println!();
            println!("{report}");
            Ok(())
        })
        .await
    }
}
