use anyhow::Result;

use super::{with_board, Command};
use crate::board::render_board;
use crate::pipeline::PipelineStage;

pub struct BoardCommand {
    pub process: String,
    pub stage: PipelineStage,
}

impl BoardCommand {
    pub fn new(process: String, stage: PipelineStage) -> Self {
        Self { process, stage }
    }
}

impl Command for BoardCommand {
    async fn execute(&self) -> Result<()> {
        with_board(|board| async move {
            match board.view(&self.process, self.stage).await {
                Ok(view) => {
                    print!("{}", render_board(&self.process, self.stage, &view));
                    if view.is_empty() && self.stage == PipelineStage::New {
                        let processes = board.processes().await.unwrap_or_default();
                        if !processes.contains(&self.process) {
                            println!();
                            println!("💡 No process named '{}'. Known processes: {}", self.process, processes.join(", "));
                        }
                    }
                    Ok(())
                }
                Err(e) => {
                    println!("❌ Could not load candidates:");
                    println!("{e}");
                    Ok(())
                }
            }
        })
        .await
    }
}
