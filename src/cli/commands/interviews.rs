use anyhow::Result;

use super::{with_board, Command};

pub struct InterviewsCommand {
    pub file_id: String,
}

impl Command for InterviewsCommand {
    async fn execute(&self) -> Result<()> {
        with_board(|board| async move {
            match board.interviews(&self.file_id).await {
                Ok(attachments) if attachments.is_empty() => {
                    println!("🎤 No interview reports attached to {}", self.file_id);
                }
                Ok(attachments) => {
                    println!("🎤 INTERVIEW REPORTS FOR {}:", self.file_id);
                    for attachment in attachments {
                        println!("   • {}", attachment.display_name);
                        println!("     🔗 {}", attachment.url);
                    }
                }
                Err(e) => println!("❌ {e}"),
            }
            Ok(())
        })
        .await
    }
}
