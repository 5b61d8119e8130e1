use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::store::StoreError;

/// Main configuration structure for Talent Map
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TalentMapConfig {
    /// Credentials shared by the spreadsheet and drive adapters
    pub google: GoogleConfig,
    /// Candidate record store
    pub store: StoreConfig,
    /// Interview document storage
    pub blob: BlobConfig,
    /// Record snapshot caching
    pub cache: CacheConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// OAuth access token (can be set via env var)
    pub access_token: Option<String>,
    /// Session file written by the external login helper
    pub token_file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Local,
    Sheets,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// JSON sheet used by the local backend
    pub local_path: String,
    /// Spreadsheet holding the candidate sheet
    pub spreadsheet_id: Option<String>,
    /// Worksheet (tab) name inside the spreadsheet
    pub worksheet: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    Local,
    Drive,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobConfig {
    pub backend: BlobBackend,
    /// Directory used by the local backend
    pub local_dir: String,
    /// Folder that receives uploaded interview reports (optional)
    pub parent_folder_id: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Staleness window of the record snapshot
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for TalentMapConfig {
    fn default() -> Self {
        Self {
            google: GoogleConfig {
                access_token: None, // Read from env var or token_file
                token_file: "token.json".to_string(),
            },
            store: StoreConfig {
                backend: StoreBackend::Local,
                local_path: ".talent-map/records.json".to_string(),
                spreadsheet_id: None,
                worksheet: "Sheet1".to_string(),
                api_base: "https://sheets.googleapis.com".to_string(),
            },
            blob: BlobConfig {
                backend: BlobBackend::Local,
                local_dir: ".talent-map/interviews".to_string(),
                parent_folder_id: None,
                api_base: "https://www.googleapis.com".to_string(),
            },
            cache: CacheConfig { ttl_seconds: 60 },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
            },
        }
    }
}

impl TalentMapConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (talent-map.toml, .talent-map-rc)
    /// 3. An explicit file, when given
    /// 4. Environment variables (prefixed with TALENT_MAP__)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("talent-map.toml").exists() {
            builder = builder.add_source(File::with_name("talent-map"));
        }

        if Path::new(".talent-map-rc").exists() {
            builder = builder.add_source(
                File::with_name(".talent-map-rc").format(config::FileFormat::Toml),
            );
        }

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TALENT_MAP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache.ttl_seconds)
    }
}

#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(alias = "access_token")]
    token: Option<String>,
}

impl GoogleConfig {
    /// Access token from, in order: the config value, `GOOGLE_OAUTH_ACCESS_TOKEN`,
    /// then the session file. Tokens are never refreshed here.
    pub fn resolve_access_token(&self) -> Result<String, StoreError> {
        if let Some(token) = self.access_token.as_ref().filter(|t| !t.trim().is_empty()) {
            return Ok(token.trim().to_string());
        }
        if let Ok(token) = std::env::var("GOOGLE_OAUTH_ACCESS_TOKEN") {
            if !token.trim().is_empty() {
                return Ok(token.trim().to_string());
            }
        }

        let path = PathBuf::from(&self.token_file);
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            StoreError::Unauthorized(format!(
                "no access token configured and session file '{}' is unreadable: {e}",
                path.display()
            ))
        })?;
        let parsed: TokenFile = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Unauthorized(format!("session file is not valid JSON: {e}")))?;
        parsed
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                StoreError::Unauthorized(format!(
                    "session file '{}' holds no access token",
                    path.display()
                ))
            })
    }
}

/// Global configuration instance
static CONFIG: OnceLock<TalentMapConfig> = OnceLock::new();

/// Get the global configuration, loading defaults if `init_config` was never called
pub fn config() -> Result<&'static TalentMapConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    init_config(None)
}

/// Initialize configuration (called at startup)
pub fn init_config(explicit: Option<&Path>) -> Result<&'static TalentMapConfig> {
    let _ = TalentMapConfig::load_env_file();
    let loaded = TalentMapConfig::load(explicit)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    Ok(CONFIG.get_or_init(|| loaded))
}
