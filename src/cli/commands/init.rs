/// Init command: writes `talent-map.toml` and an empty local sheet.
///
/// Existing files are never overwritten without `--force`; an existing local
/// sheet is always preserved, since it holds candidate data.
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use super::Command;
use crate::config::{StoreBackend, TalentMapConfig};
use crate::store::LocalRecordStore;

pub const CONFIG_FILE: &str = "talent-map.toml";

pub struct InitCommand {
    pub force: bool,
    pub dry_run: bool,
    config_path: PathBuf,
}

impl InitCommand {
    pub fn new(force: bool, dry_run: bool) -> Self {
        Self {
            force,
            dry_run,
            config_path: PathBuf::from(CONFIG_FILE),
        }
    }

    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = path.as_ref().to_path_buf();
        self
    }
}

impl Command for InitCommand {
    async fn execute(&self) -> Result<()> {
        if self.dry_run {
            println!("🚀 TALENT MAP INIT (DRY RUN)");
        } else {
            println!("🚀 TALENT MAP INIT");
        }
        println!("==================");
        println!();

        let settings = TalentMapConfig::default();

        if self.config_path.exists() && !self.force {
            println!("❌ {} already exists", self.config_path.display());
            println!("   💡 Use --force to overwrite it");
            return Err(anyhow!("configuration already exists"));
        }

        if self.dry_run {
            println!("📝 Would write {}", self.config_path.display());
        } else {
            settings.save_to_file(&self.config_path)?;
            println!("📝 Wrote {}", self.config_path.display());
        }

        if settings.store.backend == StoreBackend::Local {
            let store = LocalRecordStore::new(&settings.store.local_path);
            if self.dry_run {
                println!("📄 Would create local sheet {}", store.path().display());
            } else if store.initialize().await? {
                println!("📄 Created local sheet {}", store.path().display());
            } else {
                println!("📄 Kept existing local sheet {}", store.path().display());
            }
        }

        println!();
        println!("💡 Switch to a shared spreadsheet by setting store.backend = \"sheets\" and store.spreadsheet_id");
        Ok(())
    }
}
