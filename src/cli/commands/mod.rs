use crate::board::TalentBoard;
use crate::config::config;
use anyhow::Result;

pub mod attach;
pub mod board;
pub mod init;
pub mod interviews;
pub mod processes;
pub mod transition;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

pub async fn with_board<F, Fut, R>(f: F) -> Result<R>
where
    F: FnOnce(TalentBoard) -> Fut,
    Fut: std::future::Future<Output = Result<R>>,
{
    let settings = config()?;
    match TalentBoard::from_config(settings) {
        Ok(board) => f(board).await,
        Err(e) => {
            println!("❌ Failed to open the candidate sheet: {e}");
            println!("   💡 Run 'talent-map init' for a local sheet, or check talent-map.toml");
            Err(e)
        }
    }
}

pub async fn show_how_to_get_started() -> Result<()> {
    println!("🗂️  Talent Map - Hiring pipeline board");
    println!();
    println!("To get started:");
    println!("  📋 talent-map processes                      # List hiring processes");
    println!("  🗂️  talent-map board --process P --stage S     # Show one board");
    println!("  ➡️  talent-map advance <file>                 # Move a candidate forward");
    println!("  📎 talent-map attach <file> <report.pdf> -s S # Attach an interview report");
    println!();
    println!("Setup:");
    println!("  ⚙️  talent-map init                           # Local sheet + default config");
    println!();
    println!("💡 Start with 'talent-map processes' to see what is in the sheet!");
    Ok(())
}
