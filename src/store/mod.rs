// Record store adapters
// The tabular store is the only source of truth for candidate records.

pub mod errors;
pub mod local;
pub mod memory;
pub mod sheets;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{StoreBackend, TalentMapConfig};

pub use errors::StoreError;
pub use local::LocalRecordStore;
pub use memory::MemoryRecordStore;
pub use sheets::SheetsRecordStore;

/// One data row, keyed by column name.
pub type RowMap = HashMap<String, String>;

/// Position of a data row in the store, counted the way the sheet counts:
/// the header is row 1, so the first data row is row 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(pub usize);

impl RowHandle {
    pub const FIRST_DATA_ROW: usize = 2;

    pub fn from_data_index(index: usize) -> Self {
        RowHandle(index + Self::FIRST_DATA_ROW)
    }

    pub fn data_index(self) -> Option<usize> {
        self.0.checked_sub(Self::FIRST_DATA_ROW)
    }
}

/// Row-oriented tabular datastore holding the candidate sheet.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every data row in store order.
    async fn read_all(&self) -> Result<Vec<RowMap>, StoreError>;

    /// Locates the row whose key column equals `key`.
    async fn find_row(&self, key: &str) -> Result<Option<RowHandle>, StoreError>;

    /// Column names in header order.
    async fn read_header_row(&self) -> Result<Vec<String>, StoreError>;

    /// Current value of one cell; empty when the cell is blank.
    async fn read_cell(&self, row: RowHandle, column: &str) -> Result<String, StoreError>;

    /// Overwrites one cell. Fails with `MissingColumn` if the header lacks `column`.
    async fn write_cell(&self, row: RowHandle, column: &str, value: &str)
        -> Result<(), StoreError>;

    /// Appends `column` to the header row when absent.
    async fn ensure_column(&self, column: &str) -> Result<(), StoreError>;
}

/// Builds the record store selected by the configuration.
pub fn from_config(config: &TalentMapConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    match config.store.backend {
        StoreBackend::Local => Ok(Arc::new(LocalRecordStore::new(&config.store.local_path))),
        StoreBackend::Sheets => {
            let spreadsheet_id = config.store.spreadsheet_id.clone().ok_or_else(|| {
                StoreError::Configuration("store.spreadsheet_id is not set".to_string())
            })?;
            let token = config.google.resolve_access_token()?;
            Ok(Arc::new(SheetsRecordStore::new(
                &config.store.api_base,
                spreadsheet_id,
                config.store.worksheet.clone(),
                token,
            )?))
        }
    }
}

/// Linear scan for the first row whose key column equals `key`.
/// A blank key never matches, so blank rows are never addressed.
pub(crate) fn position_of_key<'a, I>(keys: I, key: &str) -> Option<RowHandle>
where
    I: IntoIterator<Item = &'a str>,
{
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    keys.into_iter()
        .position(|candidate| candidate.trim() == key)
        .map(RowHandle::from_data_index)
}
