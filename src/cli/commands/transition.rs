use anyhow::Result;

use super::{with_board, Command};
use crate::pipeline::StageTransition;

/// `advance`, `reject` and `restore`.
pub struct TransitionCommand {
    pub file_id: String,
    pub transition: StageTransition,
}

impl TransitionCommand {
    pub fn new(file_id: String, transition: StageTransition) -> Self {
        Self { file_id, transition }
    }
}

impl Command for TransitionCommand {
    async fn execute(&self) -> Result<()> {
        with_board(|board| async move {
            let report = match self.transition {
                StageTransition::Advance => board.advance(&self.file_id).await,
                StageTransition::Reject => board.reject(&self.file_id).await,
                StageTransition::Restore => board.restore(&self.file_id).await,
            };
            println!("{report}");
            Ok(())
        })
        .await
    }
}
