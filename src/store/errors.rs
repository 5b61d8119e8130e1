#[derive(Debug)]
pub enum StoreError {
    /// Store unreachable or returned a server error.
    Connectivity(String),
    /// Credentials missing, expired, or lacking permission.
    Unauthorized(String),
    /// No row carries the requested key.
    RecordNotFound(String),
    /// The header row lacks a column the operation needs.
    MissingColumn(String),
    /// Store settings are incomplete.
    Configuration(String),
    /// The store answered with something we could not interpret.
    InvalidResponse(String),
    IoError(std::io::Error),
}

impl StoreError {
    /// Whether the failure is about reaching the store rather than its content.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            StoreError::Connectivity(_) | StoreError::Unauthorized(_) | StoreError::IoError(_)
        )
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidResponse(err.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                StoreError::Unauthorized(err.to_string())
            }
            _ if err.is_decode() => StoreError::InvalidResponse(err.to_string()),
            _ => StoreError::Connectivity(err.to_string()),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Connectivity(msg) => {
                writeln!(f, "Record Store Unreachable")?;
                writeln!(f, "────────────────────────")?;
                write!(f, "🌐 {msg}\n\n")?;
                writeln!(f, "🔧 QUICK FIXES:")?;
                writeln!(f, "   → Check your network connection")?;
                writeln!(f, "   → Verify store.spreadsheet_id and store.api_base")?;
                write!(f, "   → Retry the action once the store is reachable")
            }
            StoreError::Unauthorized(msg) => {
                writeln!(f, "Record Store Authentication Error")?;
                writeln!(f, "─────────────────────────────────")?;
                write!(f, "🔑 {msg}\n\n")?;
                writeln!(f, "🔧 QUICK FIXES:")?;
                writeln!(f, "   → Refresh the session token referenced by google.token_file")?;
                writeln!(f, "   → Or export GOOGLE_OAUTH_ACCESS_TOKEN=your_token")?;
                write!(f, "   → Make sure the account can edit the spreadsheet")
            }
            StoreError::RecordNotFound(key) => {
                writeln!(f, "Candidate Not Found")?;
                writeln!(f, "───────────────────")?;
                write!(f, "🔍 No row with file '{key}' exists in the store\n\n")?;
                write!(f, "🔧 The row may have been renamed or removed; reload the board")
            }
            StoreError::MissingColumn(column) => {
                writeln!(f, "Store Schema Mismatch")?;
                writeln!(f, "─────────────────────")?;
                write!(f, "📋 Column '{column}' is missing from the header row\n\n")?;
                write!(f, "🔧 Add the '{column}' column to the sheet and retry")
            }
            StoreError::Configuration(msg) => {
                writeln!(f, "Record Store Configuration Error")?;
                writeln!(f, "────────────────────────────────")?;
                write!(f, "📂 {msg}\n\n")?;
                writeln!(f, "🔧 QUICK FIXES:")?;
                writeln!(f, "   → Edit talent-map.toml")?;
                write!(f, "   → Or run: talent-map init")
            }
            StoreError::InvalidResponse(msg) => {
                writeln!(f, "Unexpected Store Response")?;
                writeln!(f, "─────────────────────────")?;
                write!(f, "⚠️  {msg}")
            }
            StoreError::IoError(io_err) => {
                writeln!(f, "File System Error")?;
                writeln!(f, "─────────────────")?;
                write!(f, "📁 {io_err}\n\n")?;
                writeln!(f, "🔧 POSSIBLE CAUSES:")?;
                writeln!(f, "   → File permissions issue")?;
                writeln!(f, "   → store.local_path points to a missing directory")?;
                write!(f, "   → Disk space or I/O error")
            }
        }
    }
}

impl std::error::Error for StoreError {}
