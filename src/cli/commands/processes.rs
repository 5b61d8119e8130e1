use anyhow::Result;

use super::{with_board, Command};

pub struct ProcessesCommand;

impl Command for ProcessesCommand {
    async fn execute(&self) -> Result<()> {
        with_board(|board| async move {
            match board.processes().await {
                Ok(processes) if processes.is_empty() => {
                    println!("📋 No processes found in the sheet");
                    println!("   💡 Candidates need a value in the Proceso column");
                }
                Ok(processes) => {
                    println!("📋 HIRING PROCESSES ({}):", processes.len());
                    for process in processes {
                        println!("   • {process}");
                    }
                    println!();
                    println!("💡 Run 'talent-map board --process <name>' to open one");
                }
                Err(e) => {
                    println!("❌ Could not load candidates:");
                    println!("{e}");
                }
            }
            Ok(())
        })
        .await
    }
}
