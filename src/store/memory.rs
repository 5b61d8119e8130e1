// In-process store used by tests and demos - no side effects

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{position_of_key, RecordStore, RowHandle, RowMap, StoreError};
use crate::records::columns;

#[derive(Debug, Default)]
struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A sheet held in memory, with the same row/column semantics as the real store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    table: Mutex<Table>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            table: Mutex::new(Table {
                header,
                rows: Vec::new(),
            }),
            ..Default::default()
        }
    }

    /// Store with the canonical header and one row per entry. Columns not
    /// named in an entry stay blank.
    pub fn with_rows(rows: Vec<Vec<(&str, &str)>>) -> Self {
        let store = Self::new(columns::ALL.iter().map(|c| c.to_string()).collect());
        for row in rows {
            store.push_row(&row);
        }
        store
    }

    /// Appends a data row; unknown column names are ignored.
    pub fn push_row(&self, cells: &[(&str, &str)]) {
        let mut table = self.lock();
        let mut row = vec![String::new(); table.header.len()];
        for (name, value) in cells {
            if let Some(i) = table.header.iter().position(|h| h == name) {
                row[i] = value.to_string();
            }
        }
        table.rows.push(row);
    }

    /// Number of `read_all` calls served.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of successful cell writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Reads a cell by key without going through the trait; handy in assertions.
    pub fn cell(&self, key: &str, column: &str) -> Option<String> {
        let table = self.lock();
        let key_col = table.header.iter().position(|h| h == columns::FILE)?;
        let col = table.header.iter().position(|h| h == column)?;
        table
            .rows
            .iter()
            .find(|row| row.get(key_col).map(|v| v.trim()) == Some(key))
            .map(|row| row.get(col).cloned().unwrap_or_default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn read_all(&self) -> Result<Vec<RowMap>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let table = self.lock();
        Ok(table
            .rows
            .iter()
            .map(|row| {
                table
                    .header
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect())
    }

    async fn find_row(&self, key: &str) -> Result<Option<RowHandle>, StoreError> {
        let table = self.lock();
        let Some(key_col) = table.header.iter().position(|h| h == columns::FILE) else {
            return Err(StoreError::MissingColumn(columns::FILE.to_string()));
        };
        Ok(position_of_key(
            table
                .rows
                .iter()
                .map(|row| row.get(key_col).map(String::as_str).unwrap_or_default()),
            key,
        ))
    }

    async fn read_header_row(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock().header.clone())
    }

    async fn read_cell(&self, row: RowHandle, column: &str) -> Result<String, StoreError> {
        let table = self.lock();
        let col = table
            .header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))?;
        Ok(row
            .data_index()
            .and_then(|i| table.rows.get(i))
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
        let mut table = self.lock();
        let col = table
            .header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))?;
        let width = table.header.len();
        let target = row
            .data_index()
            .and_then(|i| table.rows.get_mut(i))
            .ok_or_else(|| StoreError::RecordNotFound(format!("row {}", row.0)))?;
        if target.len() < width {
            target.resize(width, String::new());
        }
        target[col] = value.to_string();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ensure_column(&self, column: &str) -> Result<(), StoreError> {
        let mut table = self.lock();
        if !table.header.iter().any(|h| h == column) {
            table.header.push(column.to_string());
        }
        Ok(())
    }
}
