use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::{position_of_key, RecordStore, RowHandle, RowMap, StoreError};
use crate::records::columns;

/// On-disk layout of the local sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetFile {
    pub header: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl SheetFile {
    /// Empty sheet with the canonical candidate columns.
    pub fn with_default_header() -> Self {
        Self {
            header: columns::ALL.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn column(&self, name: &str) -> Result<usize, StoreError> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
    }
}

/// Candidate sheet kept as a JSON file, for offline use.
///
/// Every call re-reads the file, so edits made by other processes are picked
/// up; writes replace the whole file through a temporary sibling.
#[derive(Debug, Clone)]
pub struct LocalRecordStore {
    path: PathBuf,
}

impl LocalRecordStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty sheet unless the file already exists.
    pub async fn initialize(&self) -> Result<bool, StoreError> {
        if fs::try_exists(&self.path).await? {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        self.save(&SheetFile::with_default_header()).await?;
        info!(path = %self.path.display(), "Created local record store");
        Ok(true)
    }

    pub async fn load(&self) -> Result<SheetFile, StoreError> {
        let raw = fs::read_to_string(&self.path).await?;
        let sheet: SheetFile = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), rows = sheet.rows.len(), "Loaded local sheet");
        Ok(sheet)
    }

    pub async fn save(&self, sheet: &SheetFile) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(sheet)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for LocalRecordStore {
    async fn read_all(&self) -> Result<Vec<RowMap>, StoreError> {
        let sheet = self.load().await?;
        Ok(sheet
            .rows
            .iter()
            .map(|row| {
                sheet
                    .header
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect())
    }

    async fn find_row(&self, key: &str) -> Result<Option<RowHandle>, StoreError> {
        let sheet = self.load().await?;
        let key_col = sheet.column(columns::FILE)?;
        Ok(position_of_key(
            sheet
                .rows
                .iter()
                .map(|row| row.get(key_col).map(String::as_str).unwrap_or_default()),
            key,
        ))
    }

    async fn read_header_row(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.load().await?.header)
    }

    async fn read_cell(&self, row: RowHandle, column: &str) -> Result<String, StoreError> {
        let sheet = self.load().await?;
        let col = sheet.column(column)?;
        Ok(row
            .data_index()
            .and_then(|i| sheet.rows.get(i))
            .and_then(|r| r.get(col))
            .cloned()
            .unwrap_or_default())
    }

    async fn write_cell(
        &self,
        row: RowHandle,
        column: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let mut sheet = self.load().await?;
        let col = sheet.column(column)?;
        let width = sheet.header.len();
        let target = row
            .data_index()
            .and_then(|i| sheet.rows.get_mut(i))
            .ok_or_else(|| StoreError::RecordNotFound(format!("row {}", row.0)))?;
        if target.len() < width {
            target.resize(width, String::new());
        }
        target[col] = value.to_string();
        self.save(&sheet).await?;
        debug!(row = row.0, column, "Wrote cell to local sheet");
        Ok(())
    }

    async fn ensure_column(&self, column: &str) -> Result<(), StoreError> {
        let mut sheet = self.load().await?;
        if sheet.header.iter().any(|h| h == column) {
            return Ok(());
        }
        sheet.header.push(column.to_string());
        self.save(&sheet).await?;
        info!(column, "Added missing column to local sheet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store(dir: &tempfile::TempDir) -> LocalRecordStore {
        let store = LocalRecordStore::new(dir.path().join("records.json"));
        let sheet = SheetFile {
            header: vec![columns::FILE.to_string(), columns::PIPELINE_STAGE.to_string()],
            rows: vec![
                vec!["cv_1.pdf".to_string(), "📥 Nuevo".to_string()],
                vec!["cv_2.pdf".to_string()],
            ],
        };
        store.save(&sheet).await.unwrap();
        store
    }

    #[tokio::test]
    async fn initialize_creates_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalRecordStore::new(dir.path().join("nested/records.json"));

        assert!(store.initialize().await.unwrap());
        assert!(!store.initialize().await.unwrap());
        assert_eq!(store.read_header_row().await.unwrap().len(), columns::ALL.len());
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn short_rows_are_padded_on_read_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let rows = store.read_all().await.unwrap();
        assert_eq!(rows[1][columns::PIPELINE_STAGE], "");

        let row = store.find_row("cv_2.pdf").await.unwrap().unwrap();
        store
            .write_cell(row, columns::PIPELINE_STAGE, "👀 En Revisión")
            .await
            .unwrap();
        assert_eq!(
            store.read_cell(row, columns::PIPELINE_STAGE).await.unwrap(),
            "👀 En Revisión"
        );
    }

    #[tokio::test]
    async fn writes_to_missing_column_fail_until_created() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;
        let row = store.find_row("cv_1.pdf").await.unwrap().unwrap();

        let err = store
            .write_cell(row, columns::INTERVIEWS, "https://x/y|a.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingColumn(ref c) if c == columns::INTERVIEWS));

        store.ensure_column(columns::INTERVIEWS).await.unwrap();
        store
            .write_cell(row, columns::INTERVIEWS, "https://x/y|a.pdf")
            .await
            .unwrap();
        assert_eq!(
            store.read_header_row().await.unwrap().last().map(String::as_str),
            Some(columns::INTERVIEWS)
        );
    }

    #[tokio::test]
    async fn missing_file_is_reported_as_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalRecordStore::new(dir.path().join("absent.json"));
        let err = store.read_all().await.unwrap_err();
        assert!(matches!(err, StoreError::IoError(_)));
        assert!(err.is_connectivity());
    }
}
